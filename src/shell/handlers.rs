//! Shell command handlers
//!
//! Dispatches parsed commands to the file table and renders the outcome as
//! text for the session.

use log::info;
use std::fmt::Write;

use crate::error::handlers::{error_message, handle_error};
use crate::error::FatError;
use crate::shell::commands::{Command, CommandResult, CommandStatus};
use crate::shell::session::Session;
use crate::storage::RecordStore;
use crate::table::{FatEntry, FileTable};
use crate::utils::validation::validate_name;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const HELP_TEXT: &str = "\
=== FAT SIMULATOR ===
1 | create <name> [content]     Create a file
2 | ls                          List files
3 | trash                       Show the trash
4 | open <name>                 Open a file
5 | modify <name> [content]     Replace a file's content
6 | rm <name>                   Move a file to the trash
7 | restore <name>              Restore a file from the trash
8 | grant <name> <user> <r> <w> Assign permissions (owner, y/n flags)
9 | revoke <name> <user>        Revoke permissions (owner)
    user <name> | whoami        Switch or show the acting user
    gc                          Reclaim orphaned blocks
0 | quit                        Exit
";

fn success(message: String) -> CommandResult {
    CommandResult {
        status: CommandStatus::Success,
        message: Some(message),
    }
}

fn failure(reason: String) -> CommandResult {
    CommandResult {
        message: Some(reason.clone()),
        status: CommandStatus::Failure(reason),
    }
}

/// Benign no-ops are reported without marking the command failed
fn from_error(err: FatError) -> CommandResult {
    handle_error(&err);
    let message = error_message(&err);
    if err.is_benign() {
        success(message)
    } else {
        failure(message)
    }
}

fn checked_name(session: &Session, input: &str) -> Result<String, CommandResult> {
    validate_name(input, session.max_name_length()).map_err(failure)
}

/// Dispatches a parsed command to its handler
pub fn handle_command<S: RecordStore>(
    session: &mut Session,
    table: &mut FileTable<S>,
    command: &Command,
) -> CommandResult {
    let result = match command {
        Command::Create { name, content } => handle_create(session, table, name, content),
        Command::List => handle_list(table, false),
        Command::ListTrash => handle_list(table, true),
        Command::Open(name) => handle_open(session, table, name),
        Command::Modify { name, content } => handle_modify(session, table, name, content),
        Command::Remove(name) => handle_remove(session, table, name),
        Command::Restore(name) => handle_restore(session, table, name),
        Command::Grant {
            name,
            user,
            read,
            write,
        } => handle_grant(session, table, name, user, *read, *write),
        Command::Revoke { name, user } => handle_revoke(session, table, name, user),
        Command::User(user) => handle_user(session, user),
        Command::WhoAmI => Ok(success(format!("Acting user: {}", session.user()))),
        Command::Gc => handle_gc(table),
        Command::Help => Ok(success(HELP_TEXT.to_string())),
        Command::Quit => Ok(CommandResult {
            status: CommandStatus::Exit,
            message: Some("Exiting...".into()),
        }),
        Command::Usage(usage) => Ok(failure(format!("Usage: {}", usage))),
        Command::Unknown(_) => Ok(failure("Invalid option. Type 'help' for commands.".into())),
    };

    result.unwrap_or_else(|rejected| rejected)
}

fn handle_create<S: RecordStore>(
    session: &Session,
    table: &mut FileTable<S>,
    name: &str,
    content: &str,
) -> Result<CommandResult, CommandResult> {
    let name = checked_name(session, name)?;
    Ok(match table.create(&name, content, session.user()) {
        Ok(_) => success("File created.".into()),
        Err(e) => from_error(e),
    })
}

fn handle_list<S: RecordStore>(
    table: &FileTable<S>,
    trashed: bool,
) -> Result<CommandResult, CommandResult> {
    let listing = if trashed {
        table.list_trashed()
    } else {
        table.list_active()
    };

    Ok(match listing {
        Ok(names) if names.is_empty() && trashed => success("Trash is empty.".into()),
        Ok(names) if names.is_empty() => {
            success("No files (or every file is in the trash).".into())
        }
        Ok(names) => {
            let mut out = String::from(if trashed { "In trash:" } else { "Files:" });
            for name in names {
                let _ = write!(out, "\n - {}", name);
            }
            success(out)
        }
        Err(e) => from_error(e),
    })
}

/// Renders the metadata block shown above a file's content
pub fn render_metadata(entry: &FatEntry) -> String {
    let stamp = |t: Option<chrono::DateTime<chrono::Utc>>| {
        t.map(|t| t.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_else(|| "-".into())
    };

    let mut out = String::from("=== METADATA ===");
    let _ = write!(out, "\nName: {}", entry.name);
    let _ = write!(out, "\nOwner: {}", entry.owner);
    let _ = write!(out, "\nSize (chars): {}", entry.total_size);
    let _ = write!(out, "\nCreated: {}", stamp(Some(entry.created_at)));
    let _ = write!(out, "\nModified: {}", stamp(entry.modified_at));
    let _ = write!(out, "\nDeleted: {}", stamp(entry.deleted_at));
    let _ = write!(out, "\nIn trash: {}", entry.in_trash);

    let grants: Vec<String> = entry
        .permissions
        .iter()
        .map(|(user, p)| format!("{} (read: {}, write: {})", user, p.read, p.write))
        .collect();
    let _ = write!(
        out,
        "\nPermissions: {}",
        if grants.is_empty() {
            "-".to_string()
        } else {
            grants.join(", ")
        }
    );
    out
}

fn handle_open<S: RecordStore>(
    session: &Session,
    table: &FileTable<S>,
    name: &str,
) -> Result<CommandResult, CommandResult> {
    let name = checked_name(session, name)?;
    Ok(match table.open(&name, session.user()) {
        Ok(opened) => success(format!(
            "{}\n\n=== CONTENT ===\n{}",
            render_metadata(&opened.entry),
            opened.content
        )),
        Err(e) => from_error(e),
    })
}

fn handle_modify<S: RecordStore>(
    session: &Session,
    table: &mut FileTable<S>,
    name: &str,
    content: &str,
) -> Result<CommandResult, CommandResult> {
    let name = checked_name(session, name)?;
    Ok(match table.modify(&name, session.user(), content) {
        Ok(result) => success(format!(
            "=== PREVIOUS CONTENT ===\n{}\nFile modified.",
            result.previous_content
        )),
        Err(e) => from_error(e),
    })
}

fn handle_remove<S: RecordStore>(
    session: &Session,
    table: &mut FileTable<S>,
    name: &str,
) -> Result<CommandResult, CommandResult> {
    let name = checked_name(session, name)?;
    Ok(match table.trash(&name, session.user()) {
        Ok(_) => success("File moved to the trash.".into()),
        Err(e) => from_error(e),
    })
}

fn handle_restore<S: RecordStore>(
    session: &Session,
    table: &mut FileTable<S>,
    name: &str,
) -> Result<CommandResult, CommandResult> {
    let name = checked_name(session, name)?;
    Ok(match table.restore(&name, session.user()) {
        Ok(_) => success("File restored.".into()),
        Err(e) => from_error(e),
    })
}

fn handle_grant<S: RecordStore>(
    session: &Session,
    table: &mut FileTable<S>,
    name: &str,
    user: &str,
    read: bool,
    write: bool,
) -> Result<CommandResult, CommandResult> {
    let name = checked_name(session, name)?;
    let target = checked_name(session, user)?;
    Ok(
        match table.grant(&name, session.user(), &target, read, write) {
            Ok(r) => success(format!(
                "Permissions updated for '{}'. (R:{}, W:{})",
                r.target_user, r.permission.read, r.permission.write
            )),
            Err(e) => from_error(e),
        },
    )
}

fn handle_revoke<S: RecordStore>(
    session: &Session,
    table: &mut FileTable<S>,
    name: &str,
    user: &str,
) -> Result<CommandResult, CommandResult> {
    let name = checked_name(session, name)?;
    let target = checked_name(session, user)?;
    Ok(match table.revoke(&name, session.user(), &target) {
        Ok(r) => success(format!("Permissions revoked for '{}'.", r.target_user)),
        Err(e) => from_error(e),
    })
}

fn handle_user(session: &mut Session, user: &str) -> Result<CommandResult, CommandResult> {
    let user = checked_name(session, user)?;
    info!("Acting user switched from {} to {}", session.user(), user);
    session.set_user(user);
    Ok(success(format!("Acting user: {}", session.user())))
}

fn handle_gc<S: RecordStore>(table: &mut FileTable<S>) -> Result<CommandResult, CommandResult> {
    Ok(match table.reclaim_orphans() {
        Ok(count) => success(format!("Reclaimed {} orphaned block(s).", count)),
        Err(e) => from_error(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::BlockChain;
    use crate::shell::commands::parse_command;
    use crate::storage::MemoryStore;

    fn run(session: &mut Session, table: &mut FileTable<MemoryStore>, line: &str) -> CommandResult {
        handle_command(session, table, &parse_command(line))
    }

    #[test]
    fn test_open_renders_metadata_then_content() {
        let mut table = FileTable::new(MemoryStore::new(), BlockChain::new(20));
        let mut session = Session::new("alice".into(), 64);

        run(&mut session, &mut table, "create notes hola mundo");
        let result = run(&mut session, &mut table, "open notes");

        assert_eq!(result.status, CommandStatus::Success);
        let text = result.message.unwrap();
        assert!(text.starts_with("=== METADATA ===\nName: notes\nOwner: alice"));
        assert!(text.contains("Modified: -"));
        assert!(text.ends_with("=== CONTENT ===\nhola mundo"));
    }

    #[test]
    fn test_benign_errors_are_not_failures() {
        let mut table = FileTable::new(MemoryStore::new(), BlockChain::new(20));
        let mut session = Session::new("alice".into(), 64);

        run(&mut session, &mut table, "create notes x");
        let result = run(&mut session, &mut table, "restore notes");
        assert_eq!(result.status, CommandStatus::Success);
        assert_eq!(result.message.as_deref(), Some("The file is not in the trash."));
    }

    #[test]
    fn test_denial_is_a_failure() {
        let mut table = FileTable::new(MemoryStore::new(), BlockChain::new(20));
        let mut session = Session::new("alice".into(), 64);

        run(&mut session, &mut table, "create notes x");
        run(&mut session, &mut table, "user bob");
        let result = run(&mut session, &mut table, "open notes");
        assert!(matches!(result.status, CommandStatus::Failure(_)));
    }

    #[test]
    fn test_overlong_name_never_reaches_table() {
        let mut table = FileTable::new(MemoryStore::new(), BlockChain::new(20));
        let mut session = Session::new("alice".into(), 4);

        let result = run(&mut session, &mut table, "create toolong x");
        assert!(matches!(result.status, CommandStatus::Failure(_)));
        assert!(table.list_active().unwrap().is_empty());
    }

    #[test]
    fn test_storage_failure_renders_as_failure() {
        let result = from_error(FatError::from(crate::error::StorageError::InvalidKey(
            String::new(),
        )));

        assert!(matches!(result.status, CommandStatus::Failure(_)));
        assert!(result.message.unwrap().starts_with("Storage failure"));
    }

    #[test]
    fn test_quit_exits() {
        let mut table = FileTable::new(MemoryStore::new(), BlockChain::new(20));
        let mut session = Session::new("alice".into(), 64);
        assert_eq!(run(&mut session, &mut table, "0").status, CommandStatus::Exit);
    }
}
