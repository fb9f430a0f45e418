//! buildtags CLI
//!
//! Command-line interface for listing the build tags used across a Go tree.

use anyhow::{Context, Result};
use buildtags_scanner::{extract_tags_from_file, ScanOptions, ScanReport, TagScanner};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "buildtags")]
#[command(about = "buildtags - List the build constraints declared in Go file headers")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect every distinct tag under a directory
    Scan {
        /// Root directory (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// File extension to scan, without the dot (repeatable)
        #[arg(long = "ext")]
        extensions: Vec<String>,

        /// Bytes read from the start of each file
        #[arg(long)]
        prefix_size: Option<usize>,

        /// Worker threads for extraction
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Honor .gitignore files
        #[arg(long)]
        gitignore: bool,

        /// Follow symbolic links
        #[arg(long)]
        follow_symlinks: bool,

        /// Config file (default: <config dir>/buildtags/buildtags.yaml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Print a summary line to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Show the tags declared in a single file, in order
    File {
        /// File to read
        path: PathBuf,

        /// Bytes read from the start of the file
        #[arg(long)]
        prefix_size: Option<usize>,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Scan {
            path,
            extensions,
            prefix_size,
            jobs,
            gitignore,
            follow_symlinks,
            config,
            format,
            stats,
        } => {
            let mut options = match config {
                Some(config) => ScanOptions::load_from(&config)
                    .with_context(|| format!("Failed to load config {}", config.display()))?,
                None => ScanOptions::load(),
            };
            if !extensions.is_empty() {
                options.extensions = extensions;
            }
            if let Some(prefix_size) = prefix_size {
                options.prefix_size = prefix_size;
            }
            if let Some(jobs) = jobs {
                options.jobs = jobs;
            }
            options.respect_gitignore |= gitignore;
            options.follow_symlinks |= follow_symlinks;

            cmd_scan(&path, options, format, stats)
        }
        Commands::File {
            path,
            prefix_size,
            format,
        } => {
            let prefix_size = prefix_size.unwrap_or_else(|| ScanOptions::load().prefix_size);
            cmd_file(&path, prefix_size, format)
        }
    }
}

fn cmd_scan(path: &Path, options: ScanOptions, format: Format, stats: bool) -> Result<()> {
    let report = TagScanner::with_options(options)
        .scan(path)
        .with_context(|| format!("Failed to scan {}", path.display()))?;

    match format {
        Format::Text => {
            for tag in report.tags.iter() {
                println!("{}", tag);
            }
            if stats {
                eprintln!("{}", format_summary(&report));
            }
        }
        Format::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn cmd_file(path: &Path, prefix_size: usize, format: Format) -> Result<()> {
    let tags = extract_tags_from_file(path, prefix_size)?;

    match format {
        Format::Text => {
            for tag in &tags {
                println!("{}", tag);
            }
        }
        Format::Json => {
            println!("{}", serde_json::to_string_pretty(&tags)?);
        }
    }

    Ok(())
}

fn format_summary(report: &ScanReport) -> String {
    format!(
        "{} tags from {} files ({} skipped) in {}ms",
        report.tags.len(),
        report.files_scanned,
        report.files_skipped,
        report.duration_ms
    )
}
