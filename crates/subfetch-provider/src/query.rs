//! Search query assembly

use subfetch_hash::Fingerprint;
use url::Url;

/// What is known about the video being played
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaData {
    /// Free-text title search
    pub query: Option<String>,

    /// IMDb numeric identifier
    pub imdb_id: Option<u64>,

    /// Release year
    pub year: Option<u32>,

    /// Season of an episode
    pub season_number: Option<u32>,

    /// Episode number within the season
    pub episode_number: Option<u32>,
}

/// A subtitle search: media data, file identity and languages
///
/// Parameters are emitted in sorted order so identical searches produce
/// identical URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Media data, or only a manual search string
    pub media: MediaData,

    /// Fingerprint of the local file
    pub file: Option<Fingerprint>,

    /// Preferred ISO 639-1 language codes
    pub languages: Vec<String>,
}

impl SearchQuery {
    /// Search by what the player knows about the video
    pub fn new(media: MediaData) -> Self {
        Self {
            media,
            ..Self::default()
        }
    }

    /// Search by a string typed by the user
    ///
    /// A manual search replaces all media data.
    pub fn manual(query: impl Into<String>) -> Self {
        Self::new(MediaData {
            query: Some(query.into()),
            ..MediaData::default()
        })
    }

    /// Add the file identity fields
    #[must_use]
    pub fn with_fingerprint(mut self, fingerprint: Fingerprint) -> Self {
        self.file = Some(fingerprint);
        self
    }

    /// Set preferred languages
    #[must_use]
    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.languages = languages
            .into_iter()
            .map(|l| l.as_ref().trim().to_ascii_lowercase())
            .filter(|l| !l.is_empty())
            .collect();
        self
    }

    /// Query parameters sorted by name
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let media = &self.media;
        let mut params = Vec::new();

        if let Some(query) = media.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            params.push(("query", query.to_lowercase()));
        }
        if let Some(imdb_id) = media.imdb_id {
            params.push(("imdb_id", imdb_id.to_string()));
        }
        if let Some(year) = media.year {
            params.push(("year", year.to_string()));
        }
        if let Some(season) = media.season_number {
            params.push(("season_number", season.to_string()));
        }
        if let Some(episode) = media.episode_number {
            params.push(("episode_number", episode.to_string()));
        }

        if let Some(file) = &self.file {
            params.push(("moviehash", file.hex()));
            params.push(("moviebytesize", file.size.to_string()));
        }

        if !self.languages.is_empty() {
            let mut languages = self.languages.clone();
            languages.sort();
            languages.dedup();
            params.push(("languages", languages.join(",")));
        }

        params.sort_by_key(|(name, _)| *name);
        params
    }

    /// Replace the query string of `url` with this search
    pub fn apply_to(&self, url: &mut Url) {
        let params = self.params();
        if params.is_empty() {
            url.set_query(None);
            return;
        }

        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (name, value) in &params {
            pairs.append_pair(name, value);
        }
    }
}

/// Parse an IMDb identifier given as `tt0133093` or `133093`
pub fn parse_imdb_id(value: &str) -> Option<u64> {
    let digits = value.trim();
    let digits = digits
        .strip_prefix("tt")
        .or_else(|| digits.strip_prefix("TT"))
        .unwrap_or(digits);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
