use crate::models::FileRecord;

/// Minimum pipe-delimited fields for a listing line to be accepted.
const MIN_FIELDS: usize = 10;

/// Parse `fls -m` machine output into file records.
///
/// Blank lines and `#` comments are discarded; any remaining line that
/// does not yield at least ten pipe-delimited fields is silently
/// dropped. The trailing ctime field is optional since some tool
/// versions omit it.
pub fn parse_file_listing(raw: &str) -> Vec<FileRecord> {
    raw.lines()
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Option<FileRecord> {
    let fields: Vec<&str> = line.split('|').collect();
    if fields.len() < MIN_FIELDS {
        return None;
    }

    Some(FileRecord {
        entry_type: fields[1].to_string(),
        inode: fields[2].to_string(),
        name: fields[3].to_string(),
        mode: fields[4].to_string(),
        uid: fields[5].to_string(),
        gid: fields[6].to_string(),
        size: fields[7].to_string(),
        atime: fields[8].to_string(),
        mtime: fields[9].to_string(),
        ctime: fields.get(10).unwrap_or(&"").to_string(),
    })
}
