//! Interactive shell
//!
//! Thin text front end over the file table: parsing, dispatch, session
//! state and the read-eval loop.

pub mod commands;
pub mod handlers;
pub mod repl;
pub mod session;

pub use commands::{Command, CommandResult, CommandStatus, parse_command};
pub use handlers::handle_command;
pub use repl::run_shell;
pub use session::Session;
