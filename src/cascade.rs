//! Sequential fallback execution.
//!
//! Candidates are tried strictly one at a time, in list order, and the first
//! one whose process exits cleanly AND whose expected output file exists on
//! disk wins. Running candidates in parallel is deliberately not supported:
//! they share the destination path and a parallel attempt could fire several
//! screen-recording permission prompts at once.

use crate::candidates::CandidateCommand;
use crate::types::{CaptureError, Platform};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// Outcome of one external-process run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Exited with code 0.
    Clean,
    /// Exited with a non-zero code (or was killed by a signal).
    Exit(Option<i32>),
    /// Did not finish before the per-candidate timeout.
    TimedOut,
}

/// Seam between the cascade and the operating system. The production
/// implementation spawns a real process; tests substitute scripted runners.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(
        &self,
        candidate: &CandidateCommand,
        timeout: Duration,
    ) -> std::io::Result<RunStatus>;
}

/// Runs candidates as real OS processes via tokio.
pub struct SystemCommandRunner;

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(
        &self,
        candidate: &CandidateCommand,
        timeout: Duration,
    ) -> std::io::Result<RunStatus> {
        let mut child = Command::new(&candidate.program)
            .args(&candidate.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        match tokio::time::timeout(timeout, child.wait()).await {
            Ok(Ok(status)) if status.success() => Ok(RunStatus::Clean),
            Ok(Ok(status)) => Ok(RunStatus::Exit(status.code())),
            Ok(Err(e)) => Err(e),
            Err(_) => {
                let _ = child.kill().await;
                Ok(RunStatus::TimedOut)
            }
        }
    }
}

/// Try each candidate in order until one demonstrably succeeds.
///
/// Per-tool failures (spawn error, non-zero exit, timeout, missing output
/// file) are logged and folded into the fallback decision; only the
/// exhausted-list case surfaces as an error, listing every attempted tool.
pub async fn run_cascade<'a>(
    runner: &dyn CommandRunner,
    platform: Platform,
    candidates: &'a [CandidateCommand],
    timeout: Duration,
) -> Result<&'a CandidateCommand, CaptureError> {
    let mut attempted = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        attempted.push(candidate.tool.to_string());
        debug!(
            "Trying {} -> {}",
            candidate.tool,
            candidate.output_path.display()
        );

        match runner.run(candidate, timeout).await {
            Err(e) => {
                warn!("{} could not be started: {}", candidate.tool, e);
                continue;
            }
            Ok(RunStatus::Exit(code)) => {
                warn!("{} exited with status {:?}", candidate.tool, code);
                continue;
            }
            Ok(RunStatus::TimedOut) => {
                warn!("{} timed out after {:?}", candidate.tool, timeout);
                continue;
            }
            Ok(RunStatus::Clean) => {}
        }

        // A clean exit alone proves nothing; the tool must have written the
        // file it was pointed at.
        if tokio::fs::metadata(&candidate.output_path).await.is_ok() {
            debug!(
                "{} produced {}",
                candidate.tool,
                candidate.output_path.display()
            );
            return Ok(candidate);
        }
        warn!("{} reported success but wrote no file", candidate.tool);
    }

    Err(CaptureError::no_tool_available(platform, attempted))
}
