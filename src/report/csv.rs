use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;

use crate::models::{FileRecord, PartitionRecord, Record};

/// Write records as CSV, headers derived from the first record's field
/// names. Nothing is written for an empty record set; returns whether a
/// file was produced.
///
/// All records in one file share the same shape by construction, since
/// each artifact maps to exactly one record kind.
pub fn write_records_csv(path: &Path, records: &[Record]) -> Result<bool> {
    let first = match records.first() {
        Some(first) => first,
        None => {
            debug!("No records, skipping CSV export: {}", path.display());
            return Ok(false);
        }
    };

    let file = File::create(path)
        .context(format!("Failed to create CSV file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{}", header_row(first))
        .context(format!("Failed to write CSV header: {}", path.display()))?;
    for record in records {
        writeln!(writer, "{}", value_row(record))
            .context(format!("Failed to write CSV row: {}", path.display()))?;
    }
    writer
        .flush()
        .context(format!("Failed to flush CSV file: {}", path.display()))?;

    debug!("Saved {} records to {}", records.len(), path.display());
    Ok(true)
}

fn header_row(record: &Record) -> String {
    let fields: &[&str] = match record {
        Record::File(_) => &FileRecord::FIELDS,
        Record::Partition(_) => &PartitionRecord::FIELDS,
        Record::Line(_) => &["text"],
    };
    fields.join(",")
}

fn value_row(record: &Record) -> String {
    let values: Vec<String> = match record {
        Record::File(file) => file.values().iter().map(|v| escape_field(v)).collect(),
        Record::Partition(partition) => {
            partition.values().iter().map(|v| escape_field(v)).collect()
        }
        Record::Line(line) => vec![escape_field(&line.text)],
    };
    values.join(",")
}

/// RFC-4180-style quoting: quote fields containing the delimiter, quotes,
/// or line breaks, doubling embedded quotes.
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn partition(slot: &str, description: &str) -> Record {
        Record::Partition(PartitionRecord {
            slot: slot.to_string(),
            start: "2048".to_string(),
            end: "4096".to_string(),
            length: "2048".to_string(),
            description: description.to_string(),
        })
    }

    #[test]
    fn test_empty_records_write_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.csv");

        assert!(!write_records_csv(&path, &[]).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_headers_from_record_kind() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("partitions.csv");

        write_records_csv(&path, &[partition("001:", "Linux (0x83)")]).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next().unwrap(), "slot,start,end,length,description");
        assert_eq!(lines.next().unwrap(), "001:,2048,4096,2048,Linux (0x83)");
    }

    #[test]
    fn test_fields_with_delimiters_quoted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("quoted.csv");

        write_records_csv(&path, &[partition("001:", "Linux, \"ext4\" root")]).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"Linux, \"\"ext4\"\" root\""));
    }

    #[test]
    fn test_file_record_rows() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("files.csv");

        let record = Record::File(FileRecord {
            entry_type: "r/r".to_string(),
            inode: "128".to_string(),
            name: "a,b.txt".to_string(),
            mode: "0644".to_string(),
            uid: "0".to_string(),
            gid: "0".to_string(),
            size: "10".to_string(),
            atime: "1".to_string(),
            mtime: "2".to_string(),
            ctime: "3".to_string(),
        });

        write_records_csv(&path, &[record]).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("type,inode,name,mode,uid,gid,size,atime,mtime,ctime\n"));
        assert!(content.contains("r/r,128,\"a,b.txt\",0644,0,0,10,1,2,3"));
    }
}
