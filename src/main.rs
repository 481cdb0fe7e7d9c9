use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{info, warn, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

mod cli;
mod config;
mod constants;
mod execution;
mod models;
mod parsers;
mod report;
mod session;
mod utils;

use cli::{Args, Commands};
use config::TriageConfig;
use session::TriageSession;

fn main() -> Result<()> {
    let args = Args::parse();

    initialize_logging(args.verbose)?;

    // Configuration scaffolding needs no image
    if let Some(Commands::InitConfig { path }) = &args.command {
        info!("Creating default configuration file at {}", path.display());
        TriageConfig::create_default_config_file(path)?;
        info!("Configuration created successfully");
        return Ok(());
    }

    let image = args
        .image
        .clone()
        .context("An image path is required; see --help")?;
    if !image.exists() {
        bail!("Image file '{}' not found", image.display());
    }

    let config = load_and_override_config(&args)?;

    match &args.command {
        Some(Commands::Recover { inode, name }) => recover(&image, &args, config, inode, name),
        Some(Commands::Metadata { inode }) => metadata(&image, &args, config, inode),
        _ => run_analysis(&image, &args, config),
    }
}

/// Initialize logging with the specified verbosity level
fn initialize_logging(verbose: bool) -> Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    TermLogger::init(
        log_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .context("Failed to initialize logger")?;
    Ok(())
}

/// Load configuration and apply command-line overrides
fn load_and_override_config(args: &Args) -> Result<TriageConfig> {
    let mut config = config::load_or_default(args.config.as_deref())?;
    if let Some(timeout) = args.timeout {
        config.tool_timeout_secs = timeout;
    }
    Ok(config)
}

/// Run the selected analysis module(s) and write the report files
fn run_analysis(image: &Path, args: &Args, config: TriageConfig) -> Result<()> {
    info!("Starting triage of {}", image.display());
    let mut session = TriageSession::new(image, &args.output, config)?;

    match args.module.artifact_kind() {
        None => session.run_full()?,
        Some(kind) => {
            session.run_artifact(kind)?;
        }
    }

    session.write_json_report()?;
    if args.generate_html() {
        let html_path = session.write_html_report()?;
        info!("Open the HTML report: file://{}", html_path.display());
    }

    summarize(&session);
    info!("Triage completed");
    Ok(())
}

/// Log the final per-module outcome so partial failures are visible
/// without opening the report
fn summarize(session: &TriageSession) {
    for (kind, result) in &session.report().artifacts {
        match result.record_count() {
            Some(count) if result.is_success() => info!("{}: {} records", kind.title(), count),
            _ if result.is_success() => info!("{}: completed", kind.title()),
            _ => warn!("{}: failed", kind.title()),
        }
    }
}

/// Recover one file by inode and print the destination path
fn recover(image: &Path, args: &Args, mut config: TriageConfig, inode: &str, name: &str) -> Result<()> {
    // Hashing the image on every single-file recovery would dominate the run
    config.hash_image = false;

    let session = TriageSession::new(image, &args.output, config)?;
    let dest = session.recover_file(inode, name)?;
    println!("{}", dest.display());
    Ok(())
}

/// Print the raw istat dump for one inode
fn metadata(image: &Path, args: &Args, mut config: TriageConfig, inode: &str) -> Result<()> {
    config.hash_image = false;

    let session = TriageSession::new(image, &args.output, config)?;
    let dump = session.inode_metadata(inode)?;
    print!("{}", dump);
    Ok(())
}
