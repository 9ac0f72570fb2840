use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Directory to store output data
    #[arg(long, default_value = "data", env = "ROSTERSCOUT_DATA_DIR")]
    pub data_dir: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Keep the fetched HTML next to each roster as page-debug.html
    #[arg(long)]
    pub save_html: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch roster pages and extract them
    Scrape {
        /// Roster page URLs
        urls: Vec<String>,

        /// JSON file listing additional sources
        #[arg(long)]
        config_file: Option<PathBuf>,
    },
    /// Extract rosters from saved HTML files
    Extract {
        /// Saved roster pages
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// URL the pages were saved from, used to resolve player links
        #[arg(long)]
        origin: String,
    },
}
