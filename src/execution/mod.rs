//! Execution facade over external forensic tools.
//!
//! Runs one command at a time with a bounded wait, captures both output
//! streams, and folds every failure mode (launch error, non-zero exit,
//! timeout) into a uniform [`ExecOutput`]. An execution fault never
//! propagates to the caller as an error; callers branch on
//! [`ExecStatus`] instead.

use std::fmt;
use std::process::Stdio;
use std::time::Duration;

use log::{debug, warn};
use tokio::process::Command;
use tokio::runtime::Builder;
use tokio::time;

use crate::constants::SIGNAL_EXIT_CODE;

/// A tool invocation: program name plus argument vector. Arguments are
/// passed through without shell interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ToolCommand {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// How a tool invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecStatus {
    /// The process ran to completion with this exit code
    Exited(i32),
    /// The process did not finish within the bound and was killed
    TimedOut,
    /// The process could not be started
    LaunchFailed,
}

/// Uniform outcome of one tool invocation.
///
/// stdout is kept as raw bytes so the same facade serves both text tools
/// and the binary `icat` recovery path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    pub stdout: Vec<u8>,
    pub stderr: String,
    pub status: ExecStatus,
}

impl ExecOutput {
    /// True when the tool ran to completion and reported success.
    pub fn success(&self) -> bool {
        matches!(self.status, ExecStatus::Exited(0))
    }

    /// Lossy-UTF-8 view of stdout for the text parsers.
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    fn timed_out(timeout_secs: u64) -> Self {
        ExecOutput {
            stdout: Vec::new(),
            stderr: format!("Command timed out after {}s", timeout_secs),
            status: ExecStatus::TimedOut,
        }
    }

    fn launch_failure(error: impl fmt::Display) -> Self {
        ExecOutput {
            stdout: Vec::new(),
            stderr: error.to_string(),
            status: ExecStatus::LaunchFailed,
        }
    }
}

/// Seam between the aggregator and the external tool suite. Tests drive
/// the aggregator with a stub runner returning canned tool output.
pub trait ToolRunner {
    fn run(&self, command: &ToolCommand, timeout_secs: u64) -> ExecOutput;
}

/// Production runner: spawns the real Sleuth Kit binaries.
#[derive(Debug, Default, Clone, Copy)]
pub struct SleuthKitRunner;

impl ToolRunner for SleuthKitRunner {
    fn run(&self, command: &ToolCommand, timeout_secs: u64) -> ExecOutput {
        execute(command, timeout_secs)
    }
}

/// Run one external command with a bounded wait.
///
/// Blocks the calling thread until the command completes or the timeout
/// expires; on expiry the child is killed and the sentinel outcome is
/// returned. Never returns an error.
pub fn execute(command: &ToolCommand, timeout_secs: u64) -> ExecOutput {
    let runtime = match Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            warn!("Failed to build executor runtime: {}", e);
            return ExecOutput::launch_failure(e);
        }
    };
    runtime.block_on(run_with_timeout(command, timeout_secs))
}

async fn run_with_timeout(command: &ToolCommand, timeout_secs: u64) -> ExecOutput {
    debug!("Executing `{}` with {}s timeout", command, timeout_secs);

    // kill_on_drop reaps the child when the timed-out future is dropped
    let child = Command::new(&command.program)
        .args(&command.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn();

    let child = match child {
        Ok(child) => child,
        Err(e) => {
            warn!("Failed to launch {}: {}", command.program, e);
            return ExecOutput::launch_failure(e);
        }
    };

    match time::timeout(Duration::from_secs(timeout_secs), child.wait_with_output()).await {
        Ok(Ok(output)) => {
            let code = output.status.code().unwrap_or(SIGNAL_EXIT_CODE);
            if code != 0 {
                debug!("`{}` exited with status {}", command, code);
            }
            ExecOutput {
                stdout: output.stdout,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                status: ExecStatus::Exited(code),
            }
        }
        Ok(Err(e)) => {
            warn!("Failed to collect output of {}: {}", command.program, e);
            ExecOutput::launch_failure(e)
        }
        Err(_) => {
            warn!("`{}` timed out after {}s", command, timeout_secs);
            ExecOutput::timed_out(timeout_secs)
        }
    }
}
