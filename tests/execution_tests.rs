//! Integration tests for the execution facade against real child
//! processes.

use std::time::Instant;

use tsk_triage::execution::{execute, ExecStatus, ToolCommand};

#[test]
fn test_captures_both_streams_and_exit_status() {
    let command = ToolCommand::new("sh", ["-c", "echo out; echo err >&2; exit 7"]);
    let output = execute(&command, 30);

    assert_eq!(output.status, ExecStatus::Exited(7));
    assert_eq!(output.stdout_text(), "out\n");
    assert_eq!(output.stderr.trim(), "err");
}

#[test]
fn test_sleep_past_bound_times_out_promptly() {
    let command = ToolCommand::new("sh", ["-c", "sleep 10"]);
    let started = Instant::now();
    let output = execute(&command, 1);

    assert_eq!(output.status, ExecStatus::TimedOut);
    assert!(output.stderr.contains("timed out"));
    // control must return at the bound, not when the child would finish
    assert!(started.elapsed().as_secs() < 5);
}

#[test]
fn test_execution_faults_never_escape_as_errors() {
    // A missing binary and an unreadable working setup both fold into
    // the uniform outcome shape.
    let output = execute(&ToolCommand::new("no-such-forensic-tool", ["disk.img"]), 5);
    assert_eq!(output.status, ExecStatus::LaunchFailed);
    assert!(!output.stderr.is_empty());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_large_stdout_is_fully_captured() {
    let command = ToolCommand::new("sh", ["-c", "seq 1 20000"]);
    let output = execute(&command, 30);

    assert!(output.success());
    let text = output.stdout_text();
    assert!(text.starts_with("1\n"));
    assert!(text.trim_end().ends_with("20000"));
}
