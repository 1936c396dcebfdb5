//! One analyzer run: spawn, drain, wait, parse.
//!
//! Both output pipes are drained concurrently while the process runs. This is
//! a correctness requirement, not an optimization: the tool blocks once the
//! OS pipe buffer for an undrained stream fills, and a sequential read of the
//! other stream then deadlocks the run.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::io::AsyncReadExt;
use tokio::process::Command;

use rucop_types::RunReport;

use crate::config::RunnerConfig;
use crate::error::RunError;
use crate::parser;

/// Run the analyzer over `paths` from `workdir` and decode its report.
///
/// Resolves only when the process has exited and both streams hit
/// end-of-stream; exit codes 0 and 1 are expected outcomes (clean run, or
/// offenses found) and anything else is logged without discarding a report
/// that still parsed. Dropping the returned future abandons the run; the
/// child is reaped via `kill_on_drop`.
pub async fn run(
    config: &RunnerConfig,
    workdir: &Path,
    paths: &[PathBuf],
) -> Result<RunReport, RunError> {
    let (program, args) = config.command_line(paths);
    tracing::debug!(
        program = %program,
        paths = paths.len(),
        workdir = %workdir.display(),
        "launching analyzer"
    );

    let mut child = Command::new(&program)
        .args(&args)
        .current_dir(workdir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| RunError::LaunchFailed {
            workdir: workdir.to_path_buf(),
            source,
        })?;

    let stdout = child.stdout.take().ok_or(RunError::StreamCapture)?;
    let stderr = child.stderr.take().ok_or(RunError::StreamCapture)?;

    let cap = config.max_capture_bytes;
    let stdout_task = tokio::spawn(read_to_end_limited(stdout, cap));
    let stderr_task = tokio::spawn(read_to_end_limited(stderr, cap));

    // Wait after the drains complete - pipes reach EOF when the tool exits
    // (or is killed by a caller-level timeout), so this does not block on a
    // still-filling buffer.
    let (stdout_bytes, stdout_truncated) =
        stdout_task.await.unwrap_or_else(|_| (Vec::new(), false));
    let (stderr_bytes, stderr_truncated) =
        stderr_task.await.unwrap_or_else(|_| (Vec::new(), false));

    if stdout_truncated || stderr_truncated {
        tracing::warn!(cap, "analyzer output exceeded capture limit, truncated");
    }

    match child.wait().await {
        Ok(status) => match status.code() {
            // 1 means "offenses found" - as expected as a clean exit.
            Some(code @ (0 | 1)) => tracing::debug!(code, "analyzer exited"),
            Some(code) => tracing::warn!(code, "analyzer exited abnormally"),
            None => tracing::warn!("analyzer terminated by signal"),
        },
        // The run's output is already drained; a failed wait is logged and
        // does not discard it.
        Err(e) => tracing::warn!(error = %e, "failed waiting for analyzer exit"),
    }

    match parser::parse_run(Cursor::new(&stdout_bytes), Cursor::new(&stderr_bytes)) {
        Ok(report) => {
            tracing::debug!(
                files = report.len(),
                warnings = report.warnings().len(),
                "analyzer report parsed"
            );
            Ok(report)
        }
        Err(source) => {
            // Fall back to the full captured text so the host can show the
            // actual tool output instead of a bare decode error.
            let stdout = String::from_utf8_lossy(&stdout_bytes).into_owned();
            let stderr = String::from_utf8_lossy(&stderr_bytes).into_owned();
            tracing::warn!(error = %source, "failed to parse analyzer output");
            tracing::debug!("analyzer stdout:\n{stdout}\nanalyzer stderr:\n{stderr}");
            Err(RunError::ParseFailed {
                source,
                stdout,
                stderr,
            })
        }
    }
}

/// Drain a pipe to EOF into a bounded buffer. Never errors: a broken pipe
/// just ends the capture with whatever arrived before it.
async fn read_to_end_limited<R: tokio::io::AsyncRead + Unpin>(
    mut reader: R,
    max_bytes: usize,
) -> (Vec<u8>, bool) {
    let mut buf = Vec::new();
    let mut tmp = [0u8; 8192];
    let mut truncated = false;

    loop {
        let n = match reader.read(&mut tmp).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        let remaining = max_bytes.saturating_sub(buf.len());
        if remaining == 0 {
            truncated = true;
            break;
        }
        let take = remaining.min(n);
        buf.extend_from_slice(&tmp[..take]);
        if take < n {
            truncated = true;
            break;
        }
    }

    (buf, truncated)
}
