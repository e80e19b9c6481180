//! Ranked presentation of search results

use crate::language::display_name;
use crate::model::SubtitleResult;
use serde::Serialize;
use std::cmp::Ordering;

/// Number of entries shown when no limit is given
pub const DEFAULT_LISTING_LIMIT: usize = 10;

/// One row of a result listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingEntry {
    /// ISO 639-1 language code
    pub language: String,

    /// Readable language name used as the entry's label
    pub language_name: String,

    /// Release name
    pub release: String,

    /// Average user rating, 0 to 10
    pub rating: f64,

    /// Rating on a 0 to 5 scale, as shown by the player
    pub rating_icon: u8,

    /// Subtitle was made for a file with the same movie hash
    pub sync: bool,

    /// Subtitle includes sound descriptions
    pub hearing_impaired: bool,

    /// File to request when the entry is chosen
    pub file_id: u64,

    /// Times downloaded
    pub download_count: u64,
}

impl ListingEntry {
    /// Build an entry from a result, if it has a downloadable file
    ///
    /// Multi-CD subtitles are represented by their first file.
    pub fn from_result(result: &SubtitleResult) -> Option<Self> {
        let attributes = &result.attributes;
        let file = attributes.files.first()?;

        Some(Self {
            language: attributes.language.clone(),
            language_name: display_name(&attributes.language),
            release: attributes.release.clone(),
            rating: attributes.ratings,
            rating_icon: rating_icon(attributes.ratings),
            sync: attributes.moviehash_match,
            hearing_impaired: attributes.hearing_impaired,
            file_id: file.file_id,
            download_count: attributes.download_count,
        })
    }
}

/// Search results ranked for display
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubtitleListing {
    entries: Vec<ListingEntry>,
}

impl SubtitleListing {
    /// Rank `results` and keep at most `limit` entries
    ///
    /// Hash matches come first, then higher ratings, then more downloads.
    /// Equal entries keep the provider's order. Results without files are
    /// dropped before the limit is applied.
    pub fn from_results(results: &[SubtitleResult], limit: usize) -> Self {
        let mut entries: Vec<ListingEntry> =
            results.iter().filter_map(ListingEntry::from_result).collect();

        // Vec::sort_by is stable
        entries.sort_by(compare);
        entries.truncate(limit);

        Self { entries }
    }

    /// Ranked entries
    pub fn entries(&self) -> &[ListingEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether nothing was found
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over ranked entries
    pub fn iter(&self) -> std::slice::Iter<'_, ListingEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a SubtitleListing {
    type Item = &'a ListingEntry;
    type IntoIter = std::slice::Iter<'a, ListingEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn compare(a: &ListingEntry, b: &ListingEntry) -> Ordering {
    b.sync
        .cmp(&a.sync)
        .then_with(|| b.rating.total_cmp(&a.rating))
        .then_with(|| b.download_count.cmp(&a.download_count))
}

/// Map a 0-10 rating to the 0-5 icon scale, rounding halves to even
fn rating_icon(ratings: f64) -> u8 {
    if !ratings.is_finite() {
        return 0;
    }
    (ratings / 2.0).round_ties_even().clamp(0.0, 5.0) as u8
}
