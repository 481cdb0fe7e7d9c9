use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::ArtifactKind;
use crate::constants::REALLOC_MARKER;

/// One structured row extracted from `fls -m` output.
///
/// Every field stays a string: tool output is only mostly structured, and a
/// malformed numeric field must degrade to text rather than fail the artifact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileRecord {
    #[serde(rename = "type")]
    pub entry_type: String,
    pub inode: String,
    pub name: String,
    pub mode: String,
    pub uid: String,
    pub gid: String,
    pub size: String,
    pub atime: String,
    pub mtime: String,
    pub ctime: String,
}

impl FileRecord {
    /// Column names for CSV export, in field order.
    pub const FIELDS: [&'static str; 10] = [
        "type", "inode", "name", "mode", "uid", "gid", "size", "atime", "mtime", "ctime",
    ];

    /// Field values in the same order as [`FileRecord::FIELDS`].
    pub fn values(&self) -> [&str; 10] {
        [
            &self.entry_type,
            &self.inode,
            &self.name,
            &self.mode,
            &self.uid,
            &self.gid,
            &self.size,
            &self.atime,
            &self.mtime,
            &self.ctime,
        ]
    }
}

/// One row of the `mmls` partition table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartitionRecord {
    pub slot: String,
    pub start: String,
    pub end: String,
    pub length: String,
    pub description: String,
}

impl PartitionRecord {
    /// Column names for CSV export, in field order.
    pub const FIELDS: [&'static str; 5] = ["slot", "start", "end", "length", "description"];

    /// Field values in the same order as [`PartitionRecord::FIELDS`].
    pub fn values(&self) -> [&str; 5] {
        [
            &self.slot,
            &self.start,
            &self.end,
            &self.length,
            &self.description,
        ]
    }
}

/// Fallback record for artifacts without a structured grammar.
///
/// Serializes as a bare string, so raw-line artifacts appear in the JSON
/// report as plain arrays of lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct RawLine {
    pub text: String,
}

impl RawLine {
    pub fn new(text: impl Into<String>) -> Self {
        RawLine { text: text.into() }
    }
}

/// A record of any artifact kind. Each artifact maps to exactly one variant,
/// selected by artifact kind at parse time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Record {
    File(FileRecord),
    Partition(PartitionRecord),
    Line(RawLine),
}

/// Why an artifact run failed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The tool did not finish within the configured bound
    Timeout,
    /// The tool ran to completion but reported a non-zero exit status
    NonZeroExit,
    /// The tool could not be started at all
    LaunchFailure,
}

/// Outcome of one artifact run. Exactly one variant per artifact key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ArtifactResult {
    Success {
        raw_output: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        records: Option<Vec<Record>>,
    },
    Failure {
        kind: FailureKind,
        error: String,
    },
}

impl ArtifactResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ArtifactResult::Success { .. })
    }

    /// Parsed records, when the artifact succeeded and has any.
    pub fn records(&self) -> Option<&[Record]> {
        match self {
            ArtifactResult::Success { records, .. } => records.as_deref(),
            ArtifactResult::Failure { .. } => None,
        }
    }

    /// Number of parsed records, when available.
    pub fn record_count(&self) -> Option<usize> {
        self.records().map(|r| r.len())
    }

    /// Raw tool output, when the artifact succeeded.
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            ArtifactResult::Success { raw_output, .. } => Some(raw_output),
            ArtifactResult::Failure { .. } => None,
        }
    }
}

/// Deleted entries split by recoverability. Entries whose metadata was
/// reallocated to a newer file have likely been overwritten.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeletedBreakdown<'a> {
    pub recoverable: Vec<&'a str>,
    pub realloc: Vec<&'a str>,
}

/// Categorize deleted-file records by the realloc marker.
pub fn split_deleted_records(records: &[Record]) -> DeletedBreakdown<'_> {
    let mut breakdown = DeletedBreakdown::default();
    for record in records {
        if let Record::Line(line) = record {
            if line.text.contains(REALLOC_MARKER) {
                breakdown.realloc.push(&line.text);
            } else {
                breakdown.recoverable.push(&line.text);
            }
        }
    }
    breakdown
}

/// Root entity for one triage session against one disk image.
///
/// Created when the image is loaded, mutated only by the session appending
/// or overwriting one [`ArtifactResult`] per artifact run, and read-only
/// once handed to a serializer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Unique identifier for this triage session
    pub case_id: String,
    /// RFC 3339 capture timestamp, set at construction
    pub analysis_date: String,
    #[serde(rename = "image_analyzed")]
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_sha256: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    pub tool_version: String,
    /// One entry per attempted artifact, keyed in run order
    pub artifacts: BTreeMap<ArtifactKind, ArtifactResult>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl Report {
    pub fn new(image: impl Into<String>, image_sha256: Option<String>) -> Self {
        Report {
            case_id: Uuid::new_v4().to_string(),
            analysis_date: Utc::now().to_rfc3339(),
            image: image.into(),
            image_sha256,
            hostname: hostname::get().ok().map(|h| h.to_string_lossy().into_owned()),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            artifacts: BTreeMap::new(),
            warnings: Vec::new(),
        }
    }

    /// Store the outcome of one artifact run, replacing any previous one.
    pub fn record(&mut self, kind: ArtifactKind, result: ArtifactResult) {
        self.artifacts.insert(kind, result);
    }

    pub fn get(&self, kind: ArtifactKind) -> Option<&ArtifactResult> {
        self.artifacts.get(&kind)
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}
