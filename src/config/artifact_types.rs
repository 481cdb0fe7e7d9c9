use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of artifacts one triage session can produce.
///
/// Each kind maps to exactly one Sleuth Kit invocation and one record
/// grammar. Variant order is the composite-run order, and because the
/// report keys artifacts in a `BTreeMap`, it is also the serialization
/// order.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Partitions,
    FilesystemInfo,
    FileListing,
    DeletedFiles,
    Timeline,
}

impl ArtifactKind {
    /// All artifact kinds in composite-run order.
    pub const ALL: [ArtifactKind; 5] = [
        ArtifactKind::Partitions,
        ArtifactKind::FilesystemInfo,
        ArtifactKind::FileListing,
        ArtifactKind::DeletedFiles,
        ArtifactKind::Timeline,
    ];

    /// Stable name used for report keys and output file names.
    pub fn name(&self) -> &'static str {
        match self {
            ArtifactKind::Partitions => "partitions",
            ArtifactKind::FilesystemInfo => "filesystem_info",
            ArtifactKind::FileListing => "file_listing",
            ArtifactKind::DeletedFiles => "deleted_files",
            ArtifactKind::Timeline => "timeline",
        }
    }

    /// Human-readable title for report rendering.
    pub fn title(&self) -> &'static str {
        match self {
            ArtifactKind::Partitions => "Partitions",
            ArtifactKind::FilesystemInfo => "Filesystem Info",
            ArtifactKind::FileListing => "File Listing",
            ArtifactKind::DeletedFiles => "Deleted Files",
            ArtifactKind::Timeline => "Timeline",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ArtifactKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "partitions" => Ok(ArtifactKind::Partitions),
            "filesystem_info" => Ok(ArtifactKind::FilesystemInfo),
            "file_listing" => Ok(ArtifactKind::FileListing),
            "deleted_files" => Ok(ArtifactKind::DeletedFiles),
            "timeline" => Ok(ArtifactKind::Timeline),
            other => Err(format!("unknown artifact kind: {}", other)),
        }
    }
}
