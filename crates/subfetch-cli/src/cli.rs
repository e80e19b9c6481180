//! Command-line arguments
//!
//! Every option that a host would normally supply through settings can also
//! come from the environment, so the binary can run unattended:
//!
//! | Option          | Environment            |
//! |-----------------|------------------------|
//! | `--profile-dir` | `SUBFETCH_PROFILE_DIR` |
//! | `--api-key`     | `SUBFETCH_API_KEY`     |
//! | `--api-url`     | `SUBFETCH_API_URL`     |

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use subfetch_provider::{DEFAULT_LISTING_LIMIT, parse_imdb_id};
use tracing::Level;

/// Subtitle lookup by movie hash
#[derive(Debug, Parser)]
#[command(
    name = "subfetch",
    about = "Find and download subtitles that match a local video file",
    version,
    long_about = "Computes the OpenSubtitles movie hash of a video (also inside stored, split RAR archives), searches the provider for matching subtitles and downloads the chosen file."
)]
pub struct Cli {
    /// Logging level; overrides RUST_LOG
    #[arg(short, long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Output format
    #[arg(short = 'o', long, value_enum, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Profile directory holding the temp download area
    #[arg(long, env = "SUBFETCH_PROFILE_DIR", global = true)]
    pub profile_dir: Option<PathBuf>,

    /// Provider API key
    #[arg(long, env = "SUBFETCH_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Provider REST endpoint
    #[arg(long, env = "SUBFETCH_API_URL", global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the movie hash and size of a file
    Hash(HashArgs),

    /// Search subtitles for a file or title
    Search(SearchArgs),

    /// Download a subtitle file into the profile temp directory
    Download(DownloadArgs),
}

/// Arguments of `subfetch hash`
#[derive(Debug, Clone, Args)]
pub struct HashArgs {
    /// Video file, or first volume of a RAR set with --archive
    pub path: PathBuf,

    /// Hash the stored member of a RAR set instead of the file itself
    #[arg(short, long)]
    pub archive: bool,

    /// Fail instead of warning on archive members above 4 GiB
    #[arg(long)]
    pub reject_large: bool,
}

/// Arguments of `subfetch search`
#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// Video file to identify by hash
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Treat --path as the first volume of a RAR set
    #[arg(short, long, requires = "path")]
    pub archive: bool,

    /// Fail instead of warning on archive members above 4 GiB
    #[arg(long, requires = "path")]
    pub reject_large: bool,

    /// Manual search string; replaces all other media data
    #[arg(short, long)]
    pub query: Option<String>,

    /// Preferred languages as ISO 639-1 codes
    #[arg(short = 'L', long, value_delimiter = ',', default_value = "en")]
    pub languages: Vec<String>,

    /// IMDb identifier (tt0133093 or 133093)
    #[arg(long, value_parser = imdb_id)]
    pub imdb_id: Option<u64>,

    /// Release year
    #[arg(long)]
    pub year: Option<u32>,

    /// Season number of an episode
    #[arg(long)]
    pub season: Option<u32>,

    /// Episode number within the season
    #[arg(long)]
    pub episode: Option<u32>,

    /// Maximum number of results to show
    #[arg(long, default_value_t = DEFAULT_LISTING_LIMIT)]
    pub limit: usize,
}

/// Arguments of `subfetch download`
#[derive(Debug, Clone, Args)]
pub struct DownloadArgs {
    /// File identifier from a search listing
    pub file_id: u64,

    /// Subtitle format to request
    #[arg(long, default_value = "srt")]
    pub sub_format: String,
}

/// Logging verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Everything
    Trace,
    /// Block scans, volume lookups, request URLs
    Debug,
    /// Completed operations
    Info,
    /// Degraded results
    Warn,
    /// Failures only
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Pretty-printed JSON
    Json,
}

fn imdb_id(value: &str) -> Result<u64, String> {
    parse_imdb_id(value).ok_or_else(|| format!("'{value}' is not an IMDb id"))
}
