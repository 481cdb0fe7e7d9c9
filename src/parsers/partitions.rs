use crate::models::PartitionRecord;

/// Minimum whitespace-delimited tokens for a partition row to be accepted.
const MIN_TOKENS: usize = 6;

/// Parse `mmls` output into partition records.
///
/// Header and footer noise is recognized by a non-digit first character.
/// The slot-0 row describes the partition table itself and is skipped.
/// The description is everything past the fixed positional columns, so
/// it may contain internal whitespace.
pub fn parse_partitions(raw: &str) -> Vec<PartitionRecord> {
    raw.lines().filter_map(parse_row).collect()
}

fn parse_row(line: &str) -> Option<PartitionRecord> {
    let first = line.chars().next()?;
    if !first.is_ascii_digit() {
        return None;
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < MIN_TOKENS || is_meta_slot(tokens[0]) {
        return None;
    }

    Some(PartitionRecord {
        slot: tokens[0].to_string(),
        start: tokens[1].to_string(),
        end: tokens[2].to_string(),
        length: tokens[3].to_string(),
        description: tokens[4..].join(" "),
    })
}

/// The reserved slot-0 row ("0:", "000:") carries table metadata, not a
/// partition.
fn is_meta_slot(slot: &str) -> bool {
    let digits = slot.trim_end_matches(':');
    !digits.is_empty() && digits.chars().all(|c| c == '0')
}
