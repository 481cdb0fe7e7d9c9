use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::ArtifactKind;
use crate::constants::DEFAULT_OUTPUT_DIR;

/// Command-line arguments for the tsk-triage tool.
///
/// The default invocation runs analysis modules against a disk image;
/// subcommands cover single-file recovery, inode metadata dumps, and
/// configuration scaffolding.
#[derive(Parser, Debug)]
#[clap(name = "tsk-triage", about = "Sleuth Kit disk-image triage and reporting tool")]
pub struct Args {
    /// Path to the disk image file (raw, EWF, or AFF container)
    pub image: Option<PathBuf>,

    /// Output directory for reports and exports
    #[clap(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Analysis module to run
    #[clap(short, long, value_enum, default_value_t = ModuleChoice::Full)]
    pub module: ModuleChoice,

    /// Generate an HTML report even for single-module runs
    #[clap(long)]
    pub html: bool,

    /// Skip HTML report generation
    #[clap(long)]
    pub no_html: bool,

    /// Path to configuration YAML file
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Override the per-tool timeout in seconds
    #[clap(long)]
    pub timeout: Option<u64>,

    /// Verbose logging
    #[clap(short, long)]
    pub verbose: bool,

    /// Subcommands
    #[clap(subcommand)]
    pub command: Option<Commands>,
}

impl Args {
    /// HTML is produced for full runs unless suppressed, and for single
    /// modules only on request.
    pub fn generate_html(&self) -> bool {
        self.html || (self.module == ModuleChoice::Full && !self.no_html)
    }
}

/// Analysis module selection.
#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum ModuleChoice {
    /// Run every analysis module
    Full,
    /// Filesystem structure (fsstat)
    Filesystem,
    /// File listing (fls)
    Files,
    /// Deleted file search (fls -d)
    Deleted,
    /// Filesystem timeline (fls -m)
    Timeline,
    /// Partition layout (mmls)
    Partitions,
}

impl ModuleChoice {
    /// The single artifact this choice maps to; None means the full run.
    pub fn artifact_kind(&self) -> Option<ArtifactKind> {
        match self {
            ModuleChoice::Full => None,
            ModuleChoice::Filesystem => Some(ArtifactKind::FilesystemInfo),
            ModuleChoice::Files => Some(ArtifactKind::FileListing),
            ModuleChoice::Deleted => Some(ArtifactKind::DeletedFiles),
            ModuleChoice::Timeline => Some(ArtifactKind::Timeline),
            ModuleChoice::Partitions => Some(ArtifactKind::Partitions),
        }
    }
}

impl std::fmt::Display for ModuleChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModuleChoice::Full => write!(f, "full"),
            ModuleChoice::Filesystem => write!(f, "filesystem"),
            ModuleChoice::Files => write!(f, "files"),
            ModuleChoice::Deleted => write!(f, "deleted"),
            ModuleChoice::Timeline => write!(f, "timeline"),
            ModuleChoice::Partitions => write!(f, "partitions"),
        }
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recover one file's content by inode
    Recover {
        /// Inode identifier of the file to recover
        #[clap(long)]
        inode: String,

        /// File name for the recovered content
        #[clap(long)]
        name: String,
    },

    /// Print the raw metadata dump for one inode
    Metadata {
        /// Inode identifier to inspect
        #[clap(long)]
        inode: String,
    },

    /// Create a default configuration file
    InitConfig {
        /// Path to output configuration file
        #[clap(default_value = "config.yaml")]
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_basic_args_parsing() {
        let args = Args::parse_from(&["tsk-triage", "disk.img", "--output", "/tmp/out", "--verbose"]);

        assert_eq!(args.image, Some(PathBuf::from("disk.img")));
        assert_eq!(args.output, PathBuf::from("/tmp/out"));
        assert!(args.verbose);
        assert_eq!(args.module, ModuleChoice::Full);
        assert!(args.command.is_none());
    }

    #[test]
    fn test_default_values() {
        let args = Args::parse_from(&["tsk-triage", "disk.img"]);

        assert_eq!(args.output, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(args.module, ModuleChoice::Full);
        assert!(args.timeout.is_none());
        assert!(!args.verbose);
        assert!(!args.html);
        assert!(!args.no_html);
    }

    #[test]
    fn test_module_selection() {
        let args = Args::parse_from(&["tsk-triage", "disk.img", "--module", "partitions"]);
        assert_eq!(args.module, ModuleChoice::Partitions);
        assert_eq!(args.module.artifact_kind(), Some(ArtifactKind::Partitions));
    }

    #[test]
    fn test_html_generation_policy() {
        let full = Args::parse_from(&["tsk-triage", "disk.img"]);
        assert!(full.generate_html());

        let full_suppressed = Args::parse_from(&["tsk-triage", "disk.img", "--no-html"]);
        assert!(!full_suppressed.generate_html());

        let single = Args::parse_from(&["tsk-triage", "disk.img", "--module", "files"]);
        assert!(!single.generate_html());

        let single_html = Args::parse_from(&["tsk-triage", "disk.img", "--module", "files", "--html"]);
        assert!(single_html.generate_html());
    }

    #[test]
    fn test_recover_subcommand() {
        let args = Args::parse_from(&[
            "tsk-triage",
            "disk.img",
            "recover",
            "--inode",
            "128",
            "--name",
            "recovered.docx",
        ]);

        match args.command {
            Some(Commands::Recover { inode, name }) => {
                assert_eq!(inode, "128");
                assert_eq!(name, "recovered.docx");
            }
            _ => panic!("Expected Recover command"),
        }
    }

    #[test]
    fn test_metadata_subcommand() {
        let args = Args::parse_from(&["tsk-triage", "disk.img", "metadata", "--inode", "64"]);

        match args.command {
            Some(Commands::Metadata { inode }) => assert_eq!(inode, "64"),
            _ => panic!("Expected Metadata command"),
        }
    }

    #[test]
    fn test_init_config_subcommand_without_image() {
        let args = Args::parse_from(&["tsk-triage", "init-config", "triage.yaml"]);

        assert!(args.image.is_none());
        match args.command {
            Some(Commands::InitConfig { path }) => assert_eq!(path, PathBuf::from("triage.yaml")),
            _ => panic!("Expected InitConfig command"),
        }
    }

    #[test]
    fn test_timeout_override_and_config_path() {
        let args = Args::parse_from(&[
            "tsk-triage",
            "disk.img",
            "--timeout",
            "60",
            "--config",
            "/etc/triage.yaml",
        ]);

        assert_eq!(args.timeout, Some(60));
        assert_eq!(args.config, Some(PathBuf::from("/etc/triage.yaml")));
    }

    #[test]
    fn test_module_choice_display() {
        assert_eq!(ModuleChoice::Full.to_string(), "full");
        assert_eq!(ModuleChoice::Deleted.to_string(), "deleted");
        assert_eq!(ModuleChoice::Partitions.to_string(), "partitions");
    }

    #[test]
    fn test_full_module_maps_to_no_single_kind() {
        assert_eq!(ModuleChoice::Full.artifact_kind(), None);
        assert_eq!(
            ModuleChoice::Timeline.artifact_kind(),
            Some(ArtifactKind::Timeline)
        );
    }
}
