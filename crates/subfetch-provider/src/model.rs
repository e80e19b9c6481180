//! Provider request and response bodies

use serde::{Deserialize, Serialize};

/// Default subtitle format requested on download
pub const DEFAULT_SUB_FORMAT: &str = "srt";

/// Body of `GET /subtitles`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    /// Number of matches known to the provider
    #[serde(default)]
    pub total_count: u64,

    /// Current page of results
    #[serde(default)]
    pub data: Vec<SubtitleResult>,
}

/// One subtitle returned by a search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleResult {
    /// Provider identifier of the subtitle
    pub id: String,

    /// Result type, normally `subtitle`
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Subtitle details
    pub attributes: SubtitleAttributes,
}

/// Details of a [`SubtitleResult`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubtitleAttributes {
    /// ISO 639-1 language code
    pub language: String,

    /// Release name the subtitle was made for
    pub release: String,

    /// Average user rating, 0 to 10
    pub ratings: f64,

    /// Number of downloads so far
    pub download_count: u64,

    /// Subtitle includes sound descriptions
    pub hearing_impaired: bool,

    /// Subtitle was uploaded for a file with the queried movie hash
    pub moviehash_match: bool,

    /// Downloadable files, one per CD for multi-part releases
    pub files: Vec<SubtitleFile>,

    /// Movie or episode the subtitle belongs to
    pub feature_details: Option<FeatureDetails>,
}

/// A downloadable file of a subtitle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleFile {
    /// Identifier passed to `POST /download`
    pub file_id: u64,

    /// CD number for multi-part releases
    #[serde(default)]
    pub cd_number: Option<u32>,

    /// Original file name
    #[serde(default)]
    pub file_name: Option<String>,
}

/// Movie or episode metadata attached to a result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureDetails {
    /// Title of the movie or episode
    pub title: Option<String>,

    /// Release year
    pub year: Option<u32>,

    /// IMDb numeric identifier
    pub imdb_id: Option<u64>,

    /// Season of an episode
    pub season_number: Option<u32>,

    /// Episode number within the season
    pub episode_number: Option<u32>,
}

/// Body of `POST /download`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRequest {
    /// File to download
    pub file_id: u64,

    /// Requested subtitle format
    pub sub_format: String,
}

impl DownloadRequest {
    /// Request `file_id` in the default format
    pub fn new(file_id: u64) -> Self {
        Self {
            file_id,
            sub_format: DEFAULT_SUB_FORMAT.to_string(),
        }
    }

    /// Request a different subtitle format
    #[must_use]
    pub fn with_format(mut self, sub_format: impl Into<String>) -> Self {
        self.sub_format = sub_format.into();
        self
    }
}

/// Response of `POST /download`: a temporary link to the file
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadLink {
    /// Temporary URL of the subtitle file
    pub link: String,

    /// Suggested file name
    #[serde(default)]
    pub file_name: String,

    /// Downloads left in the current quota window
    #[serde(default)]
    pub remaining: Option<i64>,

    /// Provider notice accompanying the link
    #[serde(default)]
    pub message: Option<String>,
}

/// Downloaded subtitle content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedSubtitle {
    /// Raw subtitle bytes, as served by the provider
    pub content: Vec<u8>,

    /// Suggested file name
    pub file_name: String,
}

/// Error body returned with unsuccessful statuses
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}
