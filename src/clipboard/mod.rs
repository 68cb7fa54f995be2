use std::io::{self, Write};
use std::process::{Command, Stdio};

use thiserror::Error;

const WL_COPY_COMMAND: &str = "wl-copy";
const MIME_TEXT_PLAIN_UTF8: &str = "text/plain;charset=utf-8";

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("failed to run clipboard command: {command}")]
    CommandIo {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("{command} exited with non-zero status: {status}")]
    CommandFailed { command: String, status: String },
    #[error("clipboard is unavailable")]
    Unavailable,
}

pub type ClipboardResult<T> = std::result::Result<T, ClipboardError>;

pub trait ClipboardBackend {
    fn copy_text(&self, text: &str) -> ClipboardResult<()>;
}

/// Writes text through `wl-copy`.
#[derive(Debug, Default)]
pub struct WlCopyBackend;

impl ClipboardBackend for WlCopyBackend {
    fn copy_text(&self, text: &str) -> ClipboardResult<()> {
        pipe_to_command(WL_COPY_COMMAND, &["--type", MIME_TEXT_PLAIN_UTF8], text)
    }
}

/// Feeds `text` to the command's stdin and waits for it. The child is always
/// reaped, including when the write fails.
fn pipe_to_command(program: &str, args: &[&str], text: &str) -> ClipboardResult<()> {
    let command_io = |source| ClipboardError::CommandIo {
        command: program.to_string(),
        source,
    };

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(command_io)?;

    if let Some(mut stdin) = child.stdin.take() {
        if let Err(source) = stdin.write_all(text.as_bytes()) {
            drop(stdin);
            let _ = child.kill();
            if let Err(err) = child.wait() {
                tracing::warn!("failed to reap {program}: {err}");
            }
            return Err(command_io(source));
        }
    }

    let status = child.wait().map_err(command_io)?;
    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::CommandFailed {
            command: program.to_string(),
            status: status.to_string(),
        })
    }
}

/// Stands in when no platform clipboard is available.
#[derive(Debug, Default)]
pub struct NoClipboard;

impl ClipboardBackend for NoClipboard {
    fn copy_text(&self, _text: &str) -> ClipboardResult<()> {
        Err(ClipboardError::Unavailable)
    }
}
