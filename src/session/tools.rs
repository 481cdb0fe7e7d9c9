use std::path::Path;

use crate::config::ArtifactKind;
use crate::constants::{FLS_BIN, FSSTAT_BIN, ICAT_BIN, ISTAT_BIN, MMLS_BIN};
use crate::execution::ToolCommand;

/// Build the fixed command line for one artifact.
///
/// The timeline uses the same `fls -m` invocation as the file listing;
/// they differ only in how the output is consumed downstream.
pub fn artifact_command(kind: ArtifactKind, image: &Path, recursive: bool) -> ToolCommand {
    let image = image.to_string_lossy().into_owned();
    match kind {
        ArtifactKind::Partitions => ToolCommand::new(MMLS_BIN, [image]),
        ArtifactKind::FilesystemInfo => ToolCommand::new(FSSTAT_BIN, [image]),
        ArtifactKind::FileListing | ArtifactKind::Timeline => {
            let mut args = Vec::new();
            if recursive {
                args.push("-r".to_string());
            }
            args.push("-m".to_string());
            args.push("/".to_string());
            args.push(image);
            ToolCommand::new(FLS_BIN, args)
        }
        ArtifactKind::DeletedFiles => {
            let mut args = Vec::new();
            if recursive {
                args.push("-r".to_string());
            }
            args.push("-d".to_string());
            args.push(image);
            ToolCommand::new(FLS_BIN, args)
        }
    }
}

/// Command for the per-inode metadata dump.
pub fn istat_command(image: &Path, inode: &str) -> ToolCommand {
    ToolCommand::new(ISTAT_BIN, [image.to_string_lossy().into_owned(), inode.to_string()])
}

/// Command for byte extraction of one inode's content.
pub fn icat_command(image: &Path, inode: &str) -> ToolCommand {
    ToolCommand::new(ICAT_BIN, [image.to_string_lossy().into_owned(), inode.to_string()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_and_filesystem_commands() {
        let image = Path::new("/evidence/disk.img");
        assert_eq!(
            artifact_command(ArtifactKind::Partitions, image, true).to_string(),
            "mmls /evidence/disk.img"
        );
        assert_eq!(
            artifact_command(ArtifactKind::FilesystemInfo, image, true).to_string(),
            "fsstat /evidence/disk.img"
        );
    }

    #[test]
    fn test_listing_commands_honor_recursion_flag() {
        let image = Path::new("disk.img");
        assert_eq!(
            artifact_command(ArtifactKind::FileListing, image, true).to_string(),
            "fls -r -m / disk.img"
        );
        assert_eq!(
            artifact_command(ArtifactKind::FileListing, image, false).to_string(),
            "fls -m / disk.img"
        );
        assert_eq!(
            artifact_command(ArtifactKind::DeletedFiles, image, true).to_string(),
            "fls -r -d disk.img"
        );
    }

    #[test]
    fn test_timeline_matches_file_listing_invocation() {
        let image = Path::new("disk.img");
        assert_eq!(
            artifact_command(ArtifactKind::Timeline, image, true),
            artifact_command(ArtifactKind::FileListing, image, true)
        );
    }

    #[test]
    fn test_inode_commands() {
        let image = Path::new("disk.img");
        assert_eq!(istat_command(image, "128").to_string(), "istat disk.img 128");
        assert_eq!(icat_command(image, "128").to_string(), "icat disk.img 128");
    }
}
