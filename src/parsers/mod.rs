//! Pure parsers turning raw tool output into typed records.
//!
//! Every parser is idempotent and panic-free: malformed lines are
//! dropped, never fatal, because long-running tool output is only
//! mostly structured and stray log lines must not poison an artifact.

mod file_listing;
mod partitions;

pub use file_listing::parse_file_listing;
pub use partitions::parse_partitions;

use crate::config::ArtifactKind;
use crate::models::{RawLine, Record};

/// Wrap every non-blank line of `raw` as a [`RawLine`].
pub fn parse_raw_lines(raw: &str) -> Vec<RawLine> {
    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .map(RawLine::new)
        .collect()
}

/// Parse raw output with the grammar matching the artifact kind.
pub fn parse_records(kind: ArtifactKind, raw: &str) -> Vec<Record> {
    match kind {
        ArtifactKind::FileListing => parse_file_listing(raw)
            .into_iter()
            .map(Record::File)
            .collect(),
        ArtifactKind::Partitions => parse_partitions(raw)
            .into_iter()
            .map(Record::Partition)
            .collect(),
        ArtifactKind::FilesystemInfo | ArtifactKind::DeletedFiles | ArtifactKind::Timeline => {
            parse_raw_lines(raw).into_iter().map(Record::Line).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_lines_drop_blanks() {
        let raw = "first\n\n  \nsecond\n";
        let lines = parse_raw_lines(raw);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "first");
        assert_eq!(lines[1].text, "second");
    }

    #[test]
    fn test_raw_lines_empty_input() {
        assert!(parse_raw_lines("").is_empty());
        assert!(parse_raw_lines("\n\n").is_empty());
    }

    #[test]
    fn test_dispatch_selects_record_kind() {
        let fls = "0|r/r|128|file.txt|0755|1000|1000|2048|1|2|3";
        let records = parse_records(ArtifactKind::FileListing, fls);
        assert!(matches!(records[0], Record::File(_)));

        let mmls = "001:  0000002048   0002099199   0002097152  Linux (0x83)";
        let records = parse_records(ArtifactKind::Partitions, mmls);
        assert!(matches!(records[0], Record::Partition(_)));

        let records = parse_records(ArtifactKind::Timeline, "entry one\nentry two");
        assert_eq!(records.len(), 2);
        assert!(matches!(records[0], Record::Line(_)));
    }

    #[test]
    fn test_parsing_is_idempotent() {
        let raw = "0|r/r|128|a.txt|0644|0|0|10|1|2|3\nnoise\n0|d/d|64|dir|0755|0|0|0|4|5|6";
        let first = parse_records(ArtifactKind::FileListing, raw);
        let second = parse_records(ArtifactKind::FileListing, raw);
        assert_eq!(first, second);
    }
}
