//! Triage session: drives the tool suite per artifact and owns the report.

pub mod tools;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Local;
use log::{debug, info, warn};

use crate::config::{ArtifactKind, TriageConfig};
use crate::constants::{HIGH_ENTROPY_MARKER, RECOVERED_SUBDIR, SESSION_TIMESTAMP_FORMAT};
use crate::execution::{ExecOutput, ExecStatus, SleuthKitRunner, ToolRunner};
use crate::models::{split_deleted_records, ArtifactResult, FailureKind, Record, Report};
use crate::parsers;
use crate::report::{csv, html, json, text};
use crate::utils::hash::calculate_sha256;

/// One triage session against one loaded disk image.
///
/// Created on image load, mutated by artifact runs, discarded at the end
/// of the session. The session exclusively owns the [`Report`]; per-artifact
/// failures degrade their one report entry and never abort sibling runs.
/// Only output-write faults propagate as errors.
pub struct TriageSession {
    image: PathBuf,
    output_dir: PathBuf,
    timestamp: String,
    config: TriageConfig,
    runner: Box<dyn ToolRunner>,
    report: Report,
}

impl TriageSession {
    /// Open a session against the real Sleuth Kit binaries.
    pub fn new(image: &Path, output_dir: &Path, config: TriageConfig) -> Result<Self> {
        Self::with_runner(image, output_dir, config, Box::new(SleuthKitRunner))
    }

    /// Open a session with a caller-supplied tool runner.
    pub fn with_runner(
        image: &Path,
        output_dir: &Path,
        config: TriageConfig,
        runner: Box<dyn ToolRunner>,
    ) -> Result<Self> {
        fs::create_dir_all(output_dir).context(format!(
            "Failed to create output directory: {}",
            output_dir.display()
        ))?;

        let timestamp = Local::now().format(SESSION_TIMESTAMP_FORMAT).to_string();

        let image_sha256 = if config.hash_image {
            match calculate_sha256(image, config.hash_max_size_mb) {
                Ok(Some(hash)) => {
                    info!("Evidence image SHA-256: {}", hash);
                    Some(hash)
                }
                Ok(None) => {
                    debug!("Skipping image hash (size cutoff or not a regular file)");
                    None
                }
                Err(e) => {
                    warn!("Failed to hash image {}: {}", image.display(), e);
                    None
                }
            }
        } else {
            None
        };

        Ok(TriageSession {
            image: image.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            timestamp,
            config,
            runner,
            report: Report::new(image.to_string_lossy(), image_sha256),
        })
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Run one artifact and store its outcome in the report.
    ///
    /// Tool failures (non-zero exit, timeout, launch error) become a
    /// `Failure` entry; only writing the artifact's export files can
    /// return an error.
    pub fn run_artifact(&mut self, kind: ArtifactKind) -> Result<&ArtifactResult> {
        info!("Running {} analysis", kind);
        let command = tools::artifact_command(kind, &self.image, self.config.recursive);
        let output = self.runner.run(&command, self.config.tool_timeout_secs);

        // fls flags encrypted or compressed content on stderr even when
        // the listing itself succeeds
        if kind == ArtifactKind::FileListing
            && output.stderr.to_lowercase().contains(HIGH_ENTROPY_MARKER)
        {
            warn!("High entropy files detected (may indicate encryption or compression)");
            self.report
                .add_warning("High entropy files detected - may indicate encryption or compression");
        }

        let result = match output.status {
            ExecStatus::Exited(0) => {
                let raw = output.stdout_text();
                let records = parsers::parse_records(kind, &raw);
                self.export_artifact(kind, &raw, &records)?;
                info!("{} complete: {} records", kind.title(), records.len());
                ArtifactResult::Success {
                    raw_output: raw,
                    records: Some(records),
                }
            }
            ExecStatus::Exited(code) => {
                let error = failure_message(&output, || {
                    format!("{} exited with status {}", command.program, code)
                });
                warn!("{} failed: {}", kind.title(), error);
                ArtifactResult::Failure {
                    kind: FailureKind::NonZeroExit,
                    error,
                }
            }
            ExecStatus::TimedOut => {
                warn!("{} timed out", kind.title());
                ArtifactResult::Failure {
                    kind: FailureKind::Timeout,
                    error: output.stderr.clone(),
                }
            }
            ExecStatus::LaunchFailed => {
                let error = failure_message(&output, || {
                    format!("Failed to launch {}", command.program)
                });
                warn!("{} failed to launch: {}", kind.title(), error);
                ArtifactResult::Failure {
                    kind: FailureKind::LaunchFailure,
                    error,
                }
            }
        };

        self.report.record(kind, result);
        Ok(self
            .report
            .get(kind)
            .expect("artifact result just recorded"))
    }

    /// Run every artifact in the fixed composite order.
    pub fn run_full(&mut self) -> Result<()> {
        info!("Starting full analysis of {}", self.image.display());
        for kind in ArtifactKind::ALL {
            self.run_artifact(kind)?;
        }
        Ok(())
    }

    /// Recover one file's bytes by inode into `recovered/<dest_name>`.
    ///
    /// Outside the artifact model: nothing is stored in the report, and a
    /// tool failure is an error because the caller needs the path or a
    /// reason, nothing else.
    pub fn recover_file(&self, inode: &str, dest_name: &str) -> Result<PathBuf> {
        info!("Recovering file inode {}...", inode);

        let file_name = Path::new(dest_name)
            .file_name()
            .context("Destination name must be a plain file name")?;

        let command = tools::icat_command(&self.image, inode);
        let output = self.runner.run(&command, self.config.tool_timeout_secs);
        if !output.success() {
            bail!(
                "File recovery failed for inode {}: {}",
                inode,
                failure_message(&output, || "icat reported an error".to_string())
            );
        }

        let dest_dir = self.output_dir.join(RECOVERED_SUBDIR);
        fs::create_dir_all(&dest_dir).context(format!(
            "Failed to create recovery directory: {}",
            dest_dir.display()
        ))?;

        let dest = dest_dir.join(file_name);
        fs::write(&dest, &output.stdout)
            .context(format!("Failed to write recovered file: {}", dest.display()))?;

        info!("File recovered to {}", dest.display());
        Ok(dest)
    }

    /// Raw `istat` metadata dump for one inode, for direct display.
    pub fn inode_metadata(&self, inode: &str) -> Result<String> {
        info!("Analyzing metadata for inode {}...", inode);

        let command = tools::istat_command(&self.image, inode);
        let output = self.runner.run(&command, self.config.tool_timeout_secs);
        if !output.success() {
            bail!(
                "Metadata extraction failed for inode {}: {}",
                inode,
                failure_message(&output, || "istat reported an error".to_string())
            );
        }

        Ok(output.stdout_text())
    }

    /// Write the aggregate JSON report snapshot.
    pub fn write_json_report(&self) -> Result<PathBuf> {
        json::write_json_report(&self.report, &self.output_dir, &self.timestamp)
    }

    /// Write the rendered HTML report.
    pub fn write_html_report(&self) -> Result<PathBuf> {
        html::write_html_report(&self.report, &self.output_dir, &self.timestamp)
    }

    /// Per-artifact export files, written on success before the result is
    /// stored. Write faults invalidate the whole run and propagate.
    fn export_artifact(&self, kind: ArtifactKind, raw: &str, records: &[Record]) -> Result<()> {
        match kind {
            ArtifactKind::Partitions | ArtifactKind::FileListing => {
                csv::write_records_csv(&self.export_path(kind, "csv"), records)?;
            }
            ArtifactKind::FilesystemInfo | ArtifactKind::Timeline => {
                text::write_text(&self.export_path(kind, "txt"), raw)?;
            }
            ArtifactKind::DeletedFiles => {
                text::write_text(&self.export_path(kind, "txt"), raw)?;

                let breakdown = split_deleted_records(records);
                if !breakdown.recoverable.is_empty() {
                    text::write_text(
                        &self.named_export_path("deleted_files_recoverable", "txt"),
                        &breakdown.recoverable.join("\n"),
                    )?;
                }
                if !breakdown.realloc.is_empty() {
                    text::write_text(
                        &self.named_export_path("deleted_files_realloc", "txt"),
                        &breakdown.realloc.join("\n"),
                    )?;
                }
            }
        }
        Ok(())
    }

    fn export_path(&self, kind: ArtifactKind, ext: &str) -> PathBuf {
        self.named_export_path(kind.name(), ext)
    }

    fn named_export_path(&self, name: &str, ext: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_{}.{}", self.timestamp, name, ext))
    }
}

/// Prefer captured stderr; fall back to a generic description when the
/// tool was silent.
fn failure_message(output: &ExecOutput, fallback: impl FnOnce() -> String) -> String {
    let stderr = output.stderr.trim();
    if stderr.is_empty() {
        fallback()
    } else {
        stderr.to_string()
    }
}
