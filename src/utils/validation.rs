//! Input validation utilities
//!
//! Sanitation for names and flags typed at the shell.

/// Trim a file or user name and check it is usable
pub fn validate_name(input: &str, max_length: usize) -> Result<String, String> {
    let name = input.trim();

    if name.is_empty() {
        return Err("Name cannot be empty".into());
    }
    if name.chars().count() > max_length {
        return Err(format!("Name longer than {} characters", max_length));
    }
    if name.chars().any(char::is_control) {
        return Err("Name contains control characters".into());
    }

    Ok(name.to_string())
}

/// Parse a yes/no answer; anything unrecognised counts as no
pub fn parse_flag(input: &str) -> bool {
    matches!(
        input.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "si" | "sí"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_trims() {
        assert_eq!(validate_name("  notes ", 10).unwrap(), "notes");
    }

    #[test]
    fn test_validate_name_rejects_bad_input() {
        assert!(validate_name("   ", 10).is_err());
        assert!(validate_name("abcdefghijk", 10).is_err());
        assert!(validate_name("a\tb", 10).is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("y"));
        assert!(parse_flag("S"));
        assert!(parse_flag(" yes "));
        assert!(!parse_flag("n"));
        assert!(!parse_flag("maybe"));
        assert!(!parse_flag(""));
    }
}
