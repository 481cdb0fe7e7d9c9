use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use sha2::{Digest, Sha256};

/// Calculate the SHA-256 of an evidence file for the chain of custody.
///
/// Returns None when the file exceeds `max_size_mb` (0 disables the
/// cutoff) or is not a regular file; hashing very large images is the
/// caller's opt-in.
pub fn calculate_sha256(path: &Path, max_size_mb: u64) -> io::Result<Option<String>> {
    let metadata = std::fs::metadata(path)?;

    if !metadata.is_file() {
        return Ok(None);
    }
    if max_size_mb > 0 && metadata.len() > max_size_mb * 1024 * 1024 {
        return Ok(None);
    }

    let mut reader = BufReader::new(File::open(path)?);
    let mut hasher = Sha256::new();
    io::copy(&mut reader, &mut hasher)?;

    Ok(Some(format!("{:x}", hasher.finalize())))
}
