use std::path::PathBuf;

use clap::Parser;
use engine_logging::LogDestination;
use log::LevelFilter;

/// Fetch web pages concurrently and bundle them into a single Markdown file.
#[derive(Debug, Parser)]
#[command(name = "page_bundler", version)]
pub struct Args {
    /// File with one URL per line. Reads stdin when omitted.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory that receives knowledge.md and manifest.json.
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// RON file with pipeline settings.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Maximum number of pages fetched at once.
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Per-request timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Skip writing manifest.json next to the bundle.
    #[arg(long)]
    pub no_manifest: bool,

    /// Also write logs to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn log_destination(&self) -> LogDestination {
        match &self.log_file {
            Some(path) => LogDestination::Both(path.clone()),
            None => LogDestination::Terminal,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        }
    }
}
