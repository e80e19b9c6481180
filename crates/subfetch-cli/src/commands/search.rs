//! `subfetch search`

use super::hash::fingerprint_config;
use crate::cli::{OutputFormat, SearchArgs};
use anyhow::{Context, Result, bail};
use subfetch_hash::{Fingerprint, Fingerprinter};
use subfetch_provider::{MediaData, SearchQuery, SubtitleListing, SubtitleProvider};
use tracing::{info, warn};

use crate::messages::describe_fingerprint_error;

/// Fingerprint `--path`, if given
///
/// A file that cannot be hashed is logged and the search goes on without
/// the hash fields.
pub fn fingerprint_for(args: &SearchArgs) -> Option<Fingerprint> {
    let path = args.path.as_ref()?;

    match Fingerprinter::new(fingerprint_config(args.reject_large)).fingerprint(path, args.archive) {
        Ok(fingerprint) => {
            info!(
                "Fingerprint of {}: {} ({} bytes)",
                path.display(),
                fingerprint,
                fingerprint.size
            );
            Some(fingerprint)
        }
        Err(e) => {
            warn!(
                "Searching without movie hash for {}: {}",
                path.display(),
                describe_fingerprint_error(&e)
            );
            None
        }
    }
}

/// Build the provider query from arguments and an optional fingerprint
///
/// A manual `--query` replaces all other media data.
pub fn build_query(args: &SearchArgs, fingerprint: Option<Fingerprint>) -> SearchQuery {
    let query = match &args.query {
        Some(query) => SearchQuery::manual(query.clone()),
        None => SearchQuery::new(MediaData {
            query: None,
            imdb_id: args.imdb_id,
            year: args.year,
            season_number: args.season,
            episode_number: args.episode,
        }),
    };

    let query = query.with_languages(&args.languages);
    match fingerprint {
        Some(fingerprint) => query.with_fingerprint(fingerprint),
        None => query,
    }
}

/// Run a search and rank the results
pub async fn search(args: &SearchArgs, provider: &dyn SubtitleProvider) -> Result<SubtitleListing> {
    let query = build_query(args, fingerprint_for(args));

    if query.media == MediaData::default() && query.file.is_none() {
        bail!("Nothing to search for: give --path, --query or --imdb-id");
    }

    let results = provider
        .search_subtitles(&query)
        .await
        .context("Subtitle search failed")?;

    Ok(SubtitleListing::from_results(&results, args.limit))
}

/// Handle `subfetch search`
pub async fn handle(
    args: &SearchArgs,
    format: OutputFormat,
    provider: &dyn SubtitleProvider,
) -> Result<()> {
    let listing = search(args, provider).await?;
    super::emit(format, &listing.entries(), &render(&listing))
}

/// Text listing, one line per subtitle
pub fn render(listing: &SubtitleListing) -> String {
    if listing.is_empty() {
        return "No subtitles found".to_string();
    }

    listing
        .iter()
        .enumerate()
        .map(|(rank, entry)| {
            let mut flags = String::new();
            if entry.sync {
                flags.push_str(" [sync]");
            }
            if entry.hearing_impaired {
                flags.push_str(" [hi]");
            }
            format!(
                "{:>2}. {:<10} {}/5  {}{}  (file id {})",
                rank + 1,
                entry.language_name,
                entry.rating_icon,
                entry.release,
                flags,
                entry.file_id
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use subfetch_provider::SubtitleResult;

    fn args() -> SearchArgs {
        SearchArgs {
            path: None,
            archive: false,
            reject_large: false,
            query: None,
            languages: vec!["en".into()],
            imdb_id: Some(133_093),
            year: Some(1999),
            season: None,
            episode: None,
            limit: 10,
        }
    }

    #[test]
    fn test_build_query_from_media_data() {
        let fp = Fingerprint {
            hash: 1,
            size: 131_072,
        };
        let query = build_query(&args(), Some(fp));

        assert_eq!(query.media.imdb_id, Some(133_093));
        assert_eq!(query.media.year, Some(1999));
        assert_eq!(query.file, Some(fp));
        assert_eq!(query.languages, vec!["en"]);
    }

    #[test]
    fn test_manual_query_replaces_media_data() {
        let mut args = args();
        args.query = Some("heat".into());

        let query = build_query(&args, None);
        assert_eq!(query.media.query.as_deref(), Some("heat"));
        assert_eq!(query.media.imdb_id, None);
        assert_eq!(query.media.year, None);
    }

    #[test]
    fn test_unhashable_file_is_skipped() {
        let mut args = args();
        args.path = Some("/nonexistent/movie.avi".into());
        assert_eq!(fingerprint_for(&args), None);
    }

    #[test]
    fn test_render() {
        assert_eq!(
            render(&SubtitleListing::from_results(&[], 10)),
            "No subtitles found"
        );

        let results: Vec<SubtitleResult> = serde_json::from_value(json!([
            {
                "id": "1",
                "attributes": {
                    "language": "de",
                    "release": "Movie.720p",
                    "ratings": 3.0,
                    "files": [{"file_id": 11}]
                }
            },
            {
                "id": "2",
                "attributes": {
                    "language": "en",
                    "release": "Movie.1080p",
                    "ratings": 8.0,
                    "hearing_impaired": true,
                    "moviehash_match": true,
                    "files": [{"file_id": 99}]
                }
            }
        ]))
        .unwrap();

        assert_eq!(
            render(&SubtitleListing::from_results(&results, 10)),
            " 1. English    4/5  Movie.1080p [sync] [hi]  (file id 99)\n 2. German     2/5  Movie.720p  (file id 11)"
        );
    }
}
