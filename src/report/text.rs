use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;

/// Save verbatim tool output to a text file.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)
        .context(format!("Failed to write text output: {}", path.display()))?;
    debug!("Saved text output to {}", path.display());
    Ok(())
}
