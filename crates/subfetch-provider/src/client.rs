//! OpenSubtitles REST client

use crate::config::ProviderConfig;
use crate::error::{ProviderError, Result};
use crate::model::{
    DownloadLink, DownloadRequest, DownloadedSubtitle, ErrorBody, SearchResponse, SubtitleResult,
};
use crate::query::SearchQuery;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use std::sync::Once;
use tracing::{debug, info};
use url::Url;

/// Header carrying the consumer API key
pub const API_KEY_HEADER: &str = "api-key";

/// Longest provider message kept in an error
const MAX_ERROR_MESSAGE: usize = 200;

/// Source of subtitles
#[async_trait]
pub trait SubtitleProvider: Send + Sync {
    /// Search for subtitles matching `query`
    async fn search_subtitles(&self, query: &SearchQuery) -> Result<Vec<SubtitleResult>>;

    /// Fetch the content of one subtitle file
    async fn download_subtitle(&self, request: &DownloadRequest) -> Result<DownloadedSubtitle>;
}

/// Install the ring crypto provider for rustls once per process
pub fn ensure_crypto_provider() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

/// Client for the OpenSubtitles REST API
#[derive(Debug, Clone)]
pub struct OpenSubtitlesClient {
    client: Client,
    base_url: Url,
    api_key: HeaderValue,
}

impl OpenSubtitlesClient {
    /// Create a new client
    ///
    /// Fails with [`ProviderError::Configuration`] when no API key is set.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let api_key = config
            .api_key()
            .ok_or_else(|| ProviderError::Configuration("API key is not set".to_string()))?;

        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ProviderError::Configuration(format!(
                "base URL cannot hold a path: {base_url}"
            )));
        }

        let mut api_key = HeaderValue::from_str(api_key).map_err(|_| {
            ProviderError::Configuration("API key contains invalid characters".to_string())
        })?;
        api_key.set_sensitive(true);

        ensure_crypto_provider();
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Base URL requests are built from
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Request to a REST endpoint, carrying the API key
    ///
    /// Download links point at other hosts and are fetched without it.
    fn api_request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(ACCEPT, "application/json")
            .header(API_KEY_HEADER, self.api_key.clone())
    }

    fn endpoint(&self, name: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(name);
        }
        url
    }
}

#[async_trait]
impl SubtitleProvider for OpenSubtitlesClient {
    async fn search_subtitles(&self, query: &SearchQuery) -> Result<Vec<SubtitleResult>> {
        let mut url = self.endpoint("subtitles");
        query.apply_to(&mut url);

        debug!("Subtitle search URL: {}", url);

        let response = check_status(self.api_request(Method::GET, url).send().await?).await?;
        let body = response.bytes().await?;
        let search: SearchResponse = serde_json::from_slice(&body)?;

        debug!(
            "Search returned {} of {} results",
            search.data.len(),
            search.total_count
        );

        Ok(search.data)
    }

    async fn download_subtitle(&self, request: &DownloadRequest) -> Result<DownloadedSubtitle> {
        let url = self.endpoint("download");
        let body = serde_json::to_vec(request)?;

        let response = self
            .api_request(Method::POST, url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        let response = check_status(response).await?;
        let link: DownloadLink = serde_json::from_slice(&response.bytes().await?)?;

        if let Some(remaining) = link.remaining {
            debug!("Downloads remaining in quota: {}", remaining);
        }
        if let Some(message) = &link.message {
            debug!("Provider notice: {}", message);
        }

        let response = check_status(self.client.get(link.link.as_str()).send().await?).await?;
        let content = response.bytes().await?.to_vec();

        info!(
            "Downloaded subtitle file {} ({} bytes)",
            request.file_id,
            content.len()
        );

        Ok(DownloadedSubtitle {
            content,
            file_name: link.file_name,
        })
    }
}

/// Map unsuccessful statuses to typed errors
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = error_message(&response.text().await.unwrap_or_default());
    debug!("Provider returned {}: {}", status, message);

    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ProviderError::Authentication { status, message }
        }
        StatusCode::NOT_ACCEPTABLE => ProviderError::DownloadLimitExceeded(message),
        StatusCode::TOO_MANY_REQUESTS => ProviderError::TooManyRequests,
        StatusCode::SERVICE_UNAVAILABLE => ProviderError::ServiceUnavailable,
        status => ProviderError::Provider { status, message },
    })
}

/// Provider message from an error body, falling back to the raw text
fn error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.message {
            return message;
        }
        if !parsed.errors.is_empty() {
            return parsed.errors.join("; ");
        }
    }

    body.trim().chars().take(MAX_ERROR_MESSAGE).collect()
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> OpenSubtitlesClient {
        let config = ProviderConfig::default()
            .with_api_key("secret")
            .with_base_url(server.uri());
        OpenSubtitlesClient::new(&config).expect("Client should build")
    }

    fn search_body() -> serde_json::Value {
        json!({
            "total_count": 2,
            "data": [
                {
                    "id": "1",
                    "type": "subtitle",
                    "attributes": {
                        "language": "en",
                        "release": "Movie.2019.1080p.BluRay",
                        "ratings": 8.0,
                        "download_count": 1500,
                        "hearing_impaired": false,
                        "moviehash_match": true,
                        "files": [{"file_id": 101, "cd_number": 1, "file_name": "movie.srt"}]
                    }
                },
                {
                    "id": "2",
                    "type": "subtitle",
                    "attributes": {
                        "language": "de",
                        "release": "Movie.2019.720p.WEB",
                        "ratings": 5.0,
                        "download_count": 300,
                        "hearing_impaired": true,
                        "moviehash_match": false,
                        "files": [{"file_id": 202}]
                    }
                }
            ]
        })
    }

    #[test]
    fn test_missing_api_key_is_configuration_error() {
        let result = OpenSubtitlesClient::new(&ProviderConfig::default());
        assert!(matches!(result, Err(ProviderError::Configuration(_))));
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let config = ProviderConfig::default().with_api_key("k");
        let client = OpenSubtitlesClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint("subtitles").as_str(),
            "https://api.opensubtitles.com/api/v1/subtitles"
        );

        let config = config.with_base_url("http://localhost:9000/");
        let client = OpenSubtitlesClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint("download").as_str(),
            "http://localhost:9000/download"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ProviderConfig::default()
            .with_api_key("k")
            .with_base_url("not a url");
        assert!(matches!(
            OpenSubtitlesClient::new(&config),
            Err(ProviderError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_search_sends_hash_and_key() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/subtitles"))
            .and(header(API_KEY_HEADER, "secret"))
            .and(query_param("moviehash", "00000000000000ff"))
            .and(query_param("moviebytesize", "131072"))
            .and(query_param("languages", "de,en"))
            .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
            .expect(1)
            .mount(&server)
            .await;

        let query = SearchQuery::default()
            .with_fingerprint(subfetch_hash::Fingerprint {
                hash: 0xff,
                size: 131_072,
            })
            .with_languages(["en", "de"]);

        let results = client_for(&server).search_subtitles(&query).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].attributes.files[0].file_id, 101);
        assert!(results[0].attributes.moviehash_match);
        assert!(results[1].attributes.hearing_impaired);
    }

    #[tokio::test]
    async fn test_search_status_mapping() {
        let cases: [(u16, &str); 7] = [
            (401, "auth"),
            (403, "auth"),
            (406, "limit"),
            (429, "rate"),
            (503, "unavailable"),
            (500, "provider"),
            (404, "provider"),
        ];

        for (status, expected) in cases {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/subtitles"))
                .respond_with(
                    ResponseTemplate::new(status).set_body_json(json!({"message": "nope"})),
                )
                .mount(&server)
                .await;

            let err = client_for(&server)
                .search_subtitles(&SearchQuery::manual("x"))
                .await
                .expect_err("Status should map to an error");

            let matched = match (expected, &err) {
                ("auth", ProviderError::Authentication { message, .. }) => message == "nope",
                ("limit", ProviderError::DownloadLimitExceeded(message)) => message == "nope",
                ("rate", ProviderError::TooManyRequests) => true,
                ("unavailable", ProviderError::ServiceUnavailable) => true,
                ("provider", ProviderError::Provider { status: s, .. }) => s.as_u16() == status,
                _ => false,
            };
            assert!(matched, "status {status} mapped to {err:?}");
        }
    }

    #[tokio::test]
    async fn test_search_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/subtitles"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .search_subtitles(&SearchQuery::manual("x"))
            .await;
        assert!(matches!(result, Err(ProviderError::Parse(_))));
    }

    #[tokio::test]
    async fn test_download_follows_link() {
        let server = MockServer::start().await;
        let link = format!("{}/files/abc.srt", server.uri());

        Mock::given(method("POST"))
            .and(path("/download"))
            .and(header(API_KEY_HEADER, "secret"))
            .and(body_json(json!({"file_id": 101, "sub_format": "srt"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "link": link,
                "file_name": "movie.srt",
                "remaining": 19,
                "message": "Your quota will be renewed in 23 hours"
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/files/abc.srt"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"1\n00:00:01,000 --> 00:00:02,000\nHi\n".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let file = client_for(&server)
            .download_subtitle(&DownloadRequest::new(101))
            .await
            .unwrap();

        assert_eq!(file.file_name, "movie.srt");
        assert!(file.content.starts_with(b"1\n00:00:01,000"));

        // Link fetch goes out without the key
        let requests = server.received_requests().await.unwrap();
        let fetch = requests
            .iter()
            .find(|r| r.url.path() == "/files/abc.srt")
            .expect("link should be fetched");
        assert!(!fetch.headers.contains_key(API_KEY_HEADER));
    }

    #[test]
    fn test_debug_output_hides_api_key() {
        let config = ProviderConfig::default().with_api_key("very-secret-key");
        let client = OpenSubtitlesClient::new(&config).unwrap();
        assert!(!format!("{client:?}").contains("very-secret-key"));
    }

    #[tokio::test]
    async fn test_download_quota_exhausted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/download"))
            .respond_with(ResponseTemplate::new(406).set_body_json(json!({
                "requests": 20,
                "remaining": 0,
                "message": "You have downloaded your allowed 20 subtitles for 24h"
            })))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .download_subtitle(&DownloadRequest::new(7))
            .await;

        match result {
            Err(ProviderError::DownloadLimitExceeded(message)) => {
                assert!(message.contains("allowed 20 subtitles"));
            }
            other => panic!("expected quota error, got {other:?}"),
        }
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(error_message(r#"{"message":"bad key"}"#), "bad key");
        assert_eq!(
            error_message(r#"{"errors":["a","b"]}"#),
            "a; b"
        );
        assert_eq!(error_message("  plain text \n"), "plain text");
        assert_eq!(error_message(&"x".repeat(500)).len(), MAX_ERROR_MESSAGE);
    }
}
