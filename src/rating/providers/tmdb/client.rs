//! TMDB HTTP client.
//!
//! Decorates every request with the API key and locale, sends it through the
//! shared [`HttpTransport`], and classifies the response status before
//! decoding the search payload.

use async_trait::async_trait;
use ratingforge_common::{Error, Result};
use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Request, Response, StatusCode, Url};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use super::models;
use crate::config::TmdbConfig;
use crate::http::{cancellable, HttpTransport};
use crate::rating::provider::{RatingClient, RatingResponse};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org";
const DEFAULT_LANGUAGE: &str = "en";
const DEFAULT_REGION: &str = "en-US";

/// TMDB implementation of [`RatingClient`].
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use ratingforge::config::TmdbConfig;
/// use ratingforge::http::HttpTransport;
/// use ratingforge::rating::providers::TmdbClient;
///
/// let config = TmdbConfig {
///     enabled: true,
///     api_key: "your-api-key".into(),
///     ..TmdbConfig::default()
/// };
/// let transport = HttpTransport::new(Duration::from_secs(10), 3)?;
/// let client = TmdbClient::new(&config, transport)?;
/// # Ok::<(), ratingforge::Error>(())
/// ```
pub struct TmdbClient {
    api_key: String,
    language: String,
    region: String,
    base_url: Url,
    transport: HttpTransport,
}

impl TmdbClient {
    /// Create a client against the public TMDB API.
    ///
    /// Fails with `ConfigInvalid` when no API key is configured.
    pub fn new(config: &TmdbConfig, transport: HttpTransport) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(Error::config("TMDB API key cannot be empty"));
        }

        let base_url = Url::parse(TMDB_BASE_URL)
            .map_err(|e| Error::InvalidRequest(format!("invalid TMDB base URL: {e}")))?;

        Ok(Self {
            api_key: config.api_key.clone(),
            language: non_empty_or(&config.language, DEFAULT_LANGUAGE),
            region: non_empty_or(&config.region, DEFAULT_REGION),
            base_url,
            transport,
        })
    }

    /// Point the client at another server (a proxy or a mock).
    ///
    /// The path is treated as a directory, so `http://proxy/tmdb` and
    /// `http://proxy/tmdb/` both resolve endpoints under `/tmdb/`.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        let mut url = Url::parse(base_url)
            .map_err(|e| Error::InvalidRequest(format!("invalid TMDB base URL {base_url}: {e}")))?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        self.base_url = url;
        Ok(self)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Add JSON headers and the `api_key`, `language` and `region` params,
    /// keeping any query params already on the request.
    pub fn setup_request(&self, request: &mut Request) {
        let headers = request.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let url = request.url_mut();
        let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        pairs.push(("api_key".into(), self.api_key.clone()));
        pairs.push(("language".into(), self.language.clone()));
        pairs.push(("region".into(), self.region.clone()));
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }
}

fn non_empty_or(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

#[async_trait]
impl RatingClient for TmdbClient {
    async fn do_with_response(
        &self,
        cancel: &CancellationToken,
        mut request: Request,
    ) -> Result<Response> {
        self.setup_request(&mut request);
        let path = request.url().path().to_string();

        self.transport.execute(cancel, request).await.map_err(|e| {
            if !matches!(e, Error::Canceled) {
                error!(provider = "tmdb", path = %path, "TMDB request failed: {e}");
            }
            e
        })
    }

    async fn do_with_rating_response(
        &self,
        cancel: &CancellationToken,
        request: Request,
    ) -> Result<Box<dyn RatingResponse>> {
        let path = request.url().path().to_string();
        let response = self.do_with_response(cancel, request).await?;
        let status = response.status();

        match status {
            StatusCode::UNAUTHORIZED => {
                error!(provider = "tmdb", path = %path, status = 401, "TMDB rejected the API key");
                return Err(Error::NotAuthorized(format!(
                    "TMDB rejected the API key for {path}"
                )));
            }
            StatusCode::NOT_FOUND => {
                error!(provider = "tmdb", path = %path, status = 404, "TMDB endpoint not found");
                return Err(Error::NotFound(path));
            }
            _ => {}
        }

        let body = cancellable(cancel, async {
            response.bytes().await.map_err(|e| {
                Error::transport_with(
                    format!("Failed to read TMDB response body for {path}"),
                    e.without_url(),
                )
            })
        })
        .await?;

        let payload: models::Response = serde_json::from_slice(&body).map_err(|e| {
            error!(
                provider = "tmdb",
                path = %path,
                status = status.as_u16(),
                "Failed to decode TMDB response: {e}"
            );
            Error::decode(format!(
                "failed to parse TMDB response for {path} (status {status}): {e}"
            ))
        })?;

        debug!(
            provider = "tmdb",
            path = %path,
            page = payload.page,
            results = payload.results.len(),
            "TMDB response decoded"
        );

        Ok(Box::new(payload))
    }

    fn base_url(&self) -> Url {
        self.base_url.clone()
    }
}
