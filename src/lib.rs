//! # tsk-triage
//!
//! Orchestrates the Sleuth Kit command-line suite (`mmls`, `fsstat`,
//! `fls`, `istat`, `icat`) against a disk image, normalizes the tools'
//! text output into typed records, and renders the aggregate into JSON,
//! CSV, plain-text, and HTML reports.
//!
//! ## Overview
//!
//! One [`session::TriageSession`] is opened per loaded image. Each
//! artifact run invokes a single external tool with a bounded wait,
//! classifies the outcome, parses structured output into records, and
//! stores the result in the session's report. Tool failures degrade the
//! one artifact they belong to; sibling artifacts keep running, so a
//! partially successful session still yields a complete audit trail.
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use tsk_triage::config::TriageConfig;
//! use tsk_triage::session::TriageSession;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut session = TriageSession::new(
//!     Path::new("/evidence/disk.img"),
//!     Path::new("forensic_output"),
//!     TriageConfig::default(),
//! )?;
//!
//! session.run_full()?;
//! session.write_json_report()?;
//! session.write_html_report()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`cli`]: Command-line interface definitions and argument parsing
//! - [`models`]: Report, artifact result, and record types
//! - [`config`]: Artifact kinds and YAML session configuration
//! - [`execution`]: Timeout-bounded external tool execution
//! - [`parsers`]: Pure parsers from raw tool output to typed records
//! - [`session`]: The triage session driving tools and owning the report
//! - [`report`]: JSON, CSV, plain-text, and HTML projections
//! - [`utils`]: Evidence hashing helpers
//! - [`constants`]: Application-wide constants

/// Command-line interface definitions and argument parsing
pub mod cli;

/// Artifact kinds and YAML session configuration
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// Timeout-bounded external tool execution
pub mod execution;

/// Report, artifact result, and record types
pub mod models;

/// Pure parsers from raw tool output to typed records
pub mod parsers;

/// Report projections (JSON, CSV, plain text, HTML)
pub mod report;

/// The triage session driving tools and owning the report
pub mod session;

/// Utility helpers (evidence hashing)
pub mod utils;
