//! Global constants for the tsk-triage application.
//!
//! This module centralizes all hardcoded values to improve maintainability
//! and make configuration changes easier.

// Sleuth Kit tool binaries
/// Partition layout tool
pub const MMLS_BIN: &str = "mmls";

/// Filesystem statistics tool
pub const FSSTAT_BIN: &str = "fsstat";

/// File listing tool
pub const FLS_BIN: &str = "fls";

/// Inode metadata tool
pub const ISTAT_BIN: &str = "istat";

/// Inode content extraction tool
pub const ICAT_BIN: &str = "icat";

// Execution constants
/// Default per-tool execution timeout in seconds
pub const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 300;

/// Exit code reported when a child process was terminated by a signal
pub const SIGNAL_EXIT_CODE: i32 = -1;

// Output naming
/// Default output directory when none is given
pub const DEFAULT_OUTPUT_DIR: &str = "forensic_output";

/// Subdirectory for files recovered by inode
pub const RECOVERED_SUBDIR: &str = "recovered";

/// Base name for the aggregate report files (JSON and HTML)
pub const REPORT_BASENAME: &str = "forensic_report";

/// Format of the session timestamp that namespaces all output files
pub const SESSION_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

// Image hashing
/// Default size cutoff for evidence image hashing (4GB)
pub const DEFAULT_HASH_MAX_SIZE_MB: u64 = 4096;

// HTML rendering caps
/// Maximum file-listing rows rendered in the HTML report
pub const HTML_MAX_FILE_ROWS: usize = 100;

/// Maximum characters of raw filesystem info rendered in the HTML report
pub const HTML_FS_INFO_MAX_CHARS: usize = 2000;

// Parser markers
/// Marker carried by deleted entries whose metadata was reallocated
pub const REALLOC_MARKER: &str = "(realloc)";

/// Substring in fls stderr that flags encrypted or compressed content
pub const HIGH_ENTROPY_MARKER: &str = "high entropy";
