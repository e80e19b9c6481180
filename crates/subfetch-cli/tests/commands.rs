#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Commands driven against a mock subtitle service

use clap::Parser;
use serde_json::json;
use std::fs;
use subfetch_cli::cli::{DownloadArgs, SearchArgs};
use subfetch_cli::commands::{download, search};
use subfetch_cli::{Cli, Workspace, describe_error, provider_config, run};
use subfetch_provider::OpenSubtitlesClient;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn cli(server: &MockServer, args: &[&str]) -> Cli {
    let mut argv = vec!["subfetch", "--api-key", "test-key", "--api-url"];
    let uri = server.uri();
    argv.push(&uri);
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

fn client(server: &MockServer) -> OpenSubtitlesClient {
    let cli = cli(server, &["download", "1"]);
    OpenSubtitlesClient::new(&provider_config(&cli)).unwrap()
}

fn search_args(path: Option<std::path::PathBuf>, query: Option<&str>) -> SearchArgs {
    SearchArgs {
        path,
        archive: false,
        reject_large: false,
        query: query.map(str::to_string),
        languages: vec!["en".into()],
        imdb_id: None,
        year: None,
        season: None,
        episode: None,
        limit: 10,
    }
}

fn one_result() -> serde_json::Value {
    json!({
        "total_count": 1,
        "data": [{
            "id": "5",
            "type": "subtitle",
            "attributes": {
                "language": "en",
                "release": "Movie.2019.1080p",
                "ratings": 7.0,
                "moviehash_match": true,
                "files": [{"file_id": 55}]
            }
        }]
    })
}

#[tokio::test]
async fn search_with_hashable_file_sends_movie_hash() {
    let dir = TempDir::new().unwrap();
    let video = dir.path().join("movie.mkv");
    fs::write(&video, vec![0u8; 131_072]).unwrap();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/subtitles"))
        .and(query_param("moviehash", "0000000000020000"))
        .and(query_param("moviebytesize", "131072"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_result()))
        .expect(1)
        .mount(&server)
        .await;

    let listing = search::search(&search_args(Some(video), None), &client(&server))
        .await
        .unwrap();

    assert_eq!(listing.len(), 1);
    let entry = listing.iter().next().unwrap();
    assert!(entry.sync);
    assert_eq!(entry.rating_icon, 4);
    assert_eq!(entry.file_id, 55);
}

#[tokio::test]
async fn search_continues_without_hash_for_tiny_file() {
    let dir = TempDir::new().unwrap();
    let video = dir.path().join("clip.mkv");
    fs::write(&video, vec![0u8; 1_000]).unwrap();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/subtitles"))
        .and(query_param("query", "clip"))
        .and(query_param_is_missing("moviehash"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_result()))
        .expect(1)
        .mount(&server)
        .await;

    let listing = search::search(&search_args(Some(video), Some("Clip")), &client(&server))
        .await
        .unwrap();
    assert_eq!(listing.len(), 1);
}

#[tokio::test]
async fn search_without_criteria_is_refused() {
    let server = MockServer::start().await;
    let err = search::search(&search_args(None, None), &client(&server))
        .await
        .unwrap_err();

    assert!(err.to_string().starts_with("Nothing to search for"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn download_stores_file_in_temp_area() {
    let profile = TempDir::new().unwrap();
    let workspace = Workspace::prepare(profile.path()).unwrap();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/download"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "link": format!("{}/files/55.srt", server.uri()),
            "file_name": "Movie.2019.1080p.srt",
            "remaining": 9
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/55.srt"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"1\n00:00:01,000 --> 00:00:02,000\nHello\n".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let args = DownloadArgs {
        file_id: 55,
        sub_format: "srt".into(),
    };
    let saved = download::download(&args, &client(&server), &workspace)
        .await
        .unwrap();

    assert_eq!(saved.path.parent(), Some(profile.path().join("temp").as_path()));
    assert_eq!(saved.path.extension().and_then(|e| e.to_str()), Some("srt"));
    assert_eq!(saved.file_name, "Movie.2019.1080p.srt");
    assert_eq!(fs::read(&saved.path).unwrap().len(), saved.bytes);
}

#[tokio::test]
async fn invalid_format_does_not_spend_a_download() {
    let profile = TempDir::new().unwrap();
    let workspace = Workspace::prepare(profile.path()).unwrap();
    let server = MockServer::start().await;

    let args = DownloadArgs {
        file_id: 55,
        sub_format: "../srt".into(),
    };
    let err = download::download(&args, &client(&server), &workspace)
        .await
        .unwrap_err();

    assert_eq!(describe_error(&err), "'../srt' is not a valid subtitle format");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn quota_error_is_described() {
    let profile = TempDir::new().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/download"))
        .respond_with(ResponseTemplate::new(406).set_body_json(json!({
            "message": "You have downloaded your allowed 20 subtitles for 24h"
        })))
        .mount(&server)
        .await;

    let profile_dir = profile.path().to_str().unwrap();
    let err = run(cli(&server, &["--profile-dir", profile_dir, "download", "55"]))
        .await
        .unwrap_err();

    assert_eq!(
        describe_error(&err),
        "Download limit reached: You have downloaded your allowed 20 subtitles for 24h"
    );
    assert!(profile.path().join("temp").is_dir());
}

#[tokio::test]
async fn hash_command_needs_no_provider() {
    let dir = TempDir::new().unwrap();
    let video = dir.path().join("movie.avi");
    fs::write(&video, vec![0u8; 131_072]).unwrap();

    let cli = Cli::try_parse_from(["subfetch", "hash", video.to_str().unwrap()]).unwrap();
    run(cli).await.unwrap();
}
