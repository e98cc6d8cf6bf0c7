//! Interactive loop
//!
//! Reads command lines, dispatches them and writes responses. Generic over
//! the reader and writer so the binary binds it to stdin/stdout and tests to
//! in-memory buffers.

use log::{debug, info};
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::config::StoreConfig;
use crate::shell::commands::{CommandStatus, parse_command};
use crate::shell::handlers::{HELP_TEXT, handle_command};
use crate::shell::session::Session;
use crate::storage::RecordStore;
use crate::table::FileTable;
use crate::utils::validation::validate_name;

const PROMPT: &[u8] = b"> ";

async fn send<W: AsyncWrite + Unpin>(writer: &mut W, text: &str) -> io::Result<()> {
    writer.write_all(text.as_bytes()).await?;
    if !text.ends_with('\n') {
        writer.write_all(b"\n").await?;
    }
    writer.flush().await
}

/// Runs a session until the quit command or end of input
pub async fn run_shell<S, R, W>(
    table: &mut FileTable<S>,
    config: &StoreConfig,
    mut reader: R,
    mut writer: W,
) -> io::Result<()>
where
    S: RecordStore,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = String::new();

    writer
        .write_all(b"FAT SIMULATOR\nEnter your user name (no spaces): ")
        .await?;
    writer.flush().await?;

    reader.read_line(&mut line).await?;
    let user = validate_name(&line, config.max_name_length)
        .ok()
        .filter(|name| !name.contains(char::is_whitespace))
        .unwrap_or_else(|| config.default_user.clone());

    info!("Session started for {}", user);
    let mut session = Session::new(user, config.max_name_length);
    send(&mut writer, HELP_TEXT).await?;

    loop {
        writer.write_all(PROMPT).await?;
        writer.flush().await?;

        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            debug!("End of input");
            break;
        }

        let command = parse_command(&line);
        debug!("{} issued {:?}", session.user(), command);

        let result = handle_command(&mut session, table, &command);
        if let Some(msg) = result.message {
            send(&mut writer, &msg).await?;
        }
        if result.status == CommandStatus::Exit {
            break;
        }
    }

    info!("Session for {} closed", session.user());
    Ok(())
}
