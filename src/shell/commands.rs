//! Shell command parsing
//!
//! Turns one input line into a `Command`. Keywords are case-insensitive and
//! each menu entry also answers to its menu digit.

use crate::utils::validation::parse_flag;

/// A parsed shell command
#[derive(Debug, PartialEq)]
pub enum Command {
    Create { name: String, content: String },
    List,
    ListTrash,
    Open(String),
    Modify { name: String, content: String },
    Remove(String),
    Restore(String),
    Grant {
        name: String,
        user: String,
        read: bool,
        write: bool,
    },
    Revoke { name: String, user: String },
    User(String),
    WhoAmI,
    Gc,
    Help,
    Quit,
    Usage(&'static str),
    Unknown(String),
}

/// Outcome status of executing a command
#[derive(Debug, PartialEq)]
pub enum CommandStatus {
    Success,
    Failure(String),
    Exit,
}

/// Full result of a command execution
#[derive(Debug)]
pub struct CommandResult {
    pub status: CommandStatus,
    pub message: Option<String>,
}

/// Splits off the first whitespace-delimited word; the remainder keeps its
/// inner spacing.
fn split_word(input: &str) -> (&str, &str) {
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (input, ""),
    }
}

/// Splits `<name> <content>`; whitespace between the two is not content,
/// whitespace inside the content is kept.
fn split_name_content(rest: &str) -> (&str, &str) {
    let (name, content) = split_word(rest.trim_start());
    (name, content.trim_start())
}

/// Parses a raw input line into the `Command` enum
pub fn parse_command(raw: &str) -> Command {
    let line = raw.trim_start().trim_end_matches(['\r', '\n']);
    let (keyword, rest) = split_word(line);
    let cmd = keyword.to_ascii_uppercase();
    let args: Vec<&str> = rest.split_whitespace().collect();

    match cmd.as_str() {
        "CREATE" | "1" => match split_name_content(rest) {
            ("", _) => Command::Usage("create <name> [content]"),
            (name, content) => Command::Create {
                name: name.to_string(),
                content: content.to_string(),
            },
        },
        "LS" | "LIST" | "2" => Command::List,
        "TRASH" | "3" => Command::ListTrash,
        "OPEN" | "4" => match args.as_slice() {
            [name] => Command::Open(name.to_string()),
            _ => Command::Usage("open <name>"),
        },
        "MODIFY" | "5" => match split_name_content(rest) {
            ("", _) => Command::Usage("modify <name> [content]"),
            (name, content) => Command::Modify {
                name: name.to_string(),
                content: content.to_string(),
            },
        },
        "RM" | "6" => match args.as_slice() {
            [name] => Command::Remove(name.to_string()),
            _ => Command::Usage("rm <name>"),
        },
        "RESTORE" | "7" => match args.as_slice() {
            [name] => Command::Restore(name.to_string()),
            _ => Command::Usage("restore <name>"),
        },
        "GRANT" | "8" => match args.as_slice() {
            [name, user, read, write] => Command::Grant {
                name: name.to_string(),
                user: user.to_string(),
                read: parse_flag(read),
                write: parse_flag(write),
            },
            _ => Command::Usage("grant <name> <user> <read y/n> <write y/n>"),
        },
        "REVOKE" | "9" => match args.as_slice() {
            [name, user] => Command::Revoke {
                name: name.to_string(),
                user: user.to_string(),
            },
            _ => Command::Usage("revoke <name> <user>"),
        },
        "USER" => match args.as_slice() {
            [user] => Command::User(user.to_string()),
            _ => Command::Usage("user <name>"),
        },
        "WHOAMI" => Command::WhoAmI,
        "GC" => Command::Gc,
        "HELP" | "?" => Command::Help,
        "QUIT" | "EXIT" | "0" => Command::Quit,
        _ => Command::Unknown(line.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_commands() {
        assert_eq!(parse_command("ls"), Command::List);
        assert_eq!(parse_command("2"), Command::List);
        assert_eq!(parse_command("TRASH"), Command::ListTrash);
        assert_eq!(parse_command("gc"), Command::Gc);
        assert_eq!(parse_command("quit\r\n"), Command::Quit);
        assert_eq!(parse_command("0"), Command::Quit);
    }

    #[test]
    fn test_parse_create_keeps_content_spacing() {
        assert_eq!(
            parse_command("create notes Hello  World, this is a test!"),
            Command::Create {
                name: "notes".into(),
                content: "Hello  World, this is a test!".into(),
            }
        );
        assert_eq!(
            parse_command("1 empty"),
            Command::Create {
                name: "empty".into(),
                content: String::new(),
            }
        );
        assert!(matches!(parse_command("create"), Command::Usage(_)));
    }

    #[test]
    fn test_parse_content_drops_separator_run() {
        assert_eq!(
            parse_command("create notes   hi there"),
            Command::Create {
                name: "notes".into(),
                content: "hi there".into(),
            }
        );
        assert_eq!(
            parse_command("modify notes \t new"),
            Command::Modify {
                name: "notes".into(),
                content: "new".into(),
            }
        );
    }

    #[test]
    fn test_parse_grant_flags() {
        assert_eq!(
            parse_command("grant notes bob s n"),
            Command::Grant {
                name: "notes".into(),
                user: "bob".into(),
                read: true,
                write: false,
            }
        );
        assert!(matches!(parse_command("grant notes bob"), Command::Usage(_)));
    }

    #[test]
    fn test_parse_single_argument_commands() {
        assert_eq!(parse_command("open notes"), Command::Open("notes".into()));
        assert_eq!(parse_command("RM notes"), Command::Remove("notes".into()));
        assert_eq!(parse_command("7 notes"), Command::Restore("notes".into()));
        assert_eq!(
            parse_command("revoke notes bob"),
            Command::Revoke {
                name: "notes".into(),
                user: "bob".into(),
            }
        );
        assert!(matches!(parse_command("open"), Command::Usage(_)));
        assert!(matches!(parse_command("open a b"), Command::Usage(_)));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(parse_command("format c:"), Command::Unknown("format c:".into()));
    }
}
