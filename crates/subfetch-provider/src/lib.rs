//! Subtitle search and download against the OpenSubtitles REST API
//!
//! The client is a thin layer: it turns a [`SearchQuery`] into request
//! parameters, maps provider statuses onto [`ProviderError`] variants and
//! hands back typed results. Ranking for display lives in [`listing`].
//!
//! ```no_run
//! use subfetch_provider::{
//!     OpenSubtitlesClient, ProviderConfig, SearchQuery, SubtitleListing, SubtitleProvider,
//! };
//!
//! # async fn run() -> subfetch_provider::Result<()> {
//! let client = OpenSubtitlesClient::new(&ProviderConfig::from_env())?;
//!
//! let fingerprint = subfetch_hash::fingerprint("/media/movie.mkv", false).ok();
//! let mut query = SearchQuery::manual("the matrix").with_languages(["en"]);
//! if let Some(fp) = fingerprint {
//!     query = query.with_fingerprint(fp);
//! }
//!
//! let results = client.search_subtitles(&query).await?;
//! for entry in &SubtitleListing::from_results(&results, 10) {
//!     println!("{} {} sync={}", entry.language, entry.release, entry.sync);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// HTTP client and provider trait
pub mod client;

/// Client configuration
pub mod config;

/// Provider errors
pub mod error;

/// Language display names
pub mod language;

/// Ranked result listing
pub mod listing;

/// Request and response bodies
pub mod model;

/// Search query assembly
pub mod query;

pub use client::{OpenSubtitlesClient, SubtitleProvider};
pub use config::ProviderConfig;
pub use error::{ProviderError, Result};
pub use language::{display_name, language_name};
pub use listing::{DEFAULT_LISTING_LIMIT, ListingEntry, SubtitleListing};
pub use model::{DownloadRequest, DownloadedSubtitle, SubtitleResult};
pub use query::{MediaData, SearchQuery, parse_imdb_id};
pub use reqwest::StatusCode;
