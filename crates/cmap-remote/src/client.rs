//! Network access to the content host
//!
//! The host serves file metadata as JSON with the file body base64-encoded
//! in a `content` field (GitHub contents API shape).

use crate::error::{RemoteError, RemoteResult};
use crate::location::RemoteLocation;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::ACCEPT;
use serde_json::Value;
use std::fmt::Debug;
use std::time::Duration;

/// Default content host API root
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Connect and overall request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const ACCEPT_CONTENTS: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("concept-map/", env!("CARGO_PKG_VERSION"));
const CONTENT_FIELD: &str = "content";

/// Source of raw contents-API responses
///
/// The seam between the cache and the network; tests substitute their own.
#[async_trait]
pub trait ContentSource: Send + Sync + Debug {
    /// Fetch the raw response body describing `location`
    async fn fetch_raw(&self, location: &RemoteLocation) -> RemoteResult<String>;
}

/// `reqwest`-backed content source
#[derive(Debug, Clone)]
pub struct HttpContentSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpContentSource {
    /// Client for the public GitHub API
    ///
    /// # Errors
    /// `RemoteError::Transport` if the HTTP client cannot be built
    pub fn new() -> RemoteResult<Self> {
        Self::with_base_url(GITHUB_API_BASE)
    }

    /// Client for another API root, e.g. an enterprise host or a test server
    ///
    /// # Errors
    /// `RemoteError::Transport` if the HTTP client cannot be built
    pub fn with_base_url(base_url: impl Into<String>) -> RemoteResult<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(REQUEST_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(RemoteError::Transport)?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }

    /// API root this client talks to
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Contents URL for `location`
    #[must_use]
    pub fn contents_url(&self, location: &RemoteLocation) -> String {
        build_contents_url(
            &self.base_url,
            location.owner(),
            location.repository(),
            location.path(),
        )
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn fetch_raw(&self, location: &RemoteLocation) -> RemoteResult<String> {
        let url = self.contents_url(location);
        tracing::debug!(%url, "requesting remote content");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, ACCEPT_CONTENTS)
            .send()
            .await
            .map_err(RemoteError::from_reqwest)?;

        let status = response.status();
        let body = response.text().await.map_err(RemoteError::from_reqwest)?;

        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

/// `{base}/repos/{owner}/{repository}/contents/{path}` with each segment
/// percent-encoded
#[must_use]
pub fn build_contents_url(base: &str, owner: &str, repository: &str, path: &str) -> String {
    format!(
        "{base}/repos/{}/{}/contents/{}",
        urlencoding::encode(owner),
        urlencoding::encode(repository),
        urlencoding::encode(path),
    )
}

/// Decode base64 file content, ignoring the line breaks the host inserts
///
/// # Errors
/// `RemoteError::MalformedResponse` for invalid base64 or non-UTF-8 bytes
pub fn decode_base64_content(encoded: &str) -> RemoteResult<String> {
    let cleaned: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(cleaned)
        .map_err(|e| RemoteError::MalformedResponse(format!("invalid base64 content: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| RemoteError::MalformedResponse(format!("content is not UTF-8: {e}")))
}

/// Pull the decoded `content` field out of a contents-API response body
///
/// # Errors
/// `RemoteError::MalformedResponse` if the body is not JSON, has no string
/// `content` field, or the field does not decode
pub fn extract_content(body: &str) -> RemoteResult<String> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| RemoteError::MalformedResponse(format!("response is not JSON: {e}")))?;
    let encoded = value
        .get(CONTENT_FIELD)
        .and_then(Value::as_str)
        .ok_or_else(|| RemoteError::MalformedResponse("response has no content field".into()))?;
    decode_base64_content(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_base64_exactly() {
        assert_eq!(
            decode_base64_content("eyJub2RlcyI6W10sImxpbmtzIjpbXX0=").unwrap(),
            r#"{"nodes":[],"links":[]}"#
        );
    }

    #[test]
    fn decode_ignores_line_breaks() {
        assert_eq!(
            decode_base64_content("eyJub2RlcyI6W10s\nImxpbmtzIjpbXX0=\n").unwrap(),
            r#"{"nodes":[],"links":[]}"#
        );
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(
            decode_base64_content("***"),
            Err(RemoteError::MalformedResponse(_))
        ));
    }

    #[test]
    fn extracts_content_field() {
        let body = r#"{"name":"map.json","encoding":"base64","content":"eyJub2RlcyI6W10sImxpbmtzIjpbXX0="}"#;
        assert_eq!(extract_content(body).unwrap(), r#"{"nodes":[],"links":[]}"#);
        assert!(extract_content(r#"{"name":"map.json"}"#).is_err());
        assert!(extract_content("not json").is_err());
    }

    #[test]
    fn url_segments_are_encoded() {
        assert_eq!(
            build_contents_url(GITHUB_API_BASE, "ewu", "concept maps", "data/map.json"),
            "https://api.github.com/repos/ewu/concept%20maps/contents/data%2Fmap.json"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let source = HttpContentSource::with_base_url("http://localhost:9000/").unwrap();
        let loc = RemoteLocation::new("o", "r", "p.json").unwrap();
        assert_eq!(
            source.contents_url(&loc),
            "http://localhost:9000/repos/o/r/contents/p.json"
        );
    }
}
