//! # Formatting
//!
//! Optional pass through an external `gofmt` binary, which realigns the
//! struct tag column after tags have been inserted.

use crate::error::{AppError, AppResult};
use log::debug;
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::process::{Command, Stdio};

/// Formats Go source by piping it through `binary`.
pub fn gofmt(source: &str, binary: &Path) -> AppResult<String> {
    debug!("formatting with {}", binary.display());

    let mut child = Command::new(binary)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| AppError::Format(format!("failed to run {}: {}", binary.display(), e)))?;

    {
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| AppError::Format("formatter stdin unavailable".into()))?;
        // A formatter that exits early closes its stdin; report its exit status instead.
        if let Err(e) = stdin.write_all(source.as_bytes()) {
            if e.kind() != ErrorKind::BrokenPipe {
                return Err(e.into());
            }
        }
    }

    let output = child.wait_with_output()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AppError::Format(format!(
            "{} exited with {}: {}",
            binary.display(),
            output.status,
            stderr.trim()
        )));
    }

    String::from_utf8(output.stdout)
        .map_err(|_| AppError::Format("formatter produced invalid UTF-8".into()))
}
