//! TMDB API client
//!
//! Fetches paginated movie summaries (popular listing and title search)
//! from The Movie Database v3 API. Calls carry the client timeout and
//! nothing else: no retries, no backoff.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
const USER_AGENT: &str = "Marquee/0.1.0";

/// TMDB client errors
#[derive(Debug, Error)]
pub enum TmdbError {
    #[error("TMDB API key not configured")]
    MissingApiKey,

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// One movie summary from a TMDB results page
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbMovie {
    /// TMDB numeric identifier
    pub id: i64,
    /// Display title
    pub title: String,
    /// Genre ids (numeric, resolved client-side against TMDB's genre list)
    #[serde(default)]
    pub genre_ids: Vec<i64>,
    /// Release date in YYYY-MM-DD format; may be absent or empty
    #[serde(default)]
    pub release_date: Option<String>,
    /// Poster image path fragment
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Synopsis text
    #[serde(default)]
    pub overview: Option<String>,
}

/// One page of TMDB results
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbPage {
    pub page: i64,
    pub results: Vec<TmdbMovie>,
    #[serde(default)]
    pub total_pages: i64,
}

/// TMDB API client
pub struct TmdbClient {
    http_client: reqwest::Client,
    api_key: Option<String>,
}

impl TmdbClient {
    pub fn new(api_key: Option<String>) -> Result<Self, TmdbError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| TmdbError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key,
        })
    }

    fn api_key(&self) -> Result<&str, TmdbError> {
        self.api_key.as_deref().ok_or(TmdbError::MissingApiKey)
    }

    /// Fetch one page of the popular-movies listing
    ///
    /// The listing path deliberately skips the HTTP status check: a
    /// non-200 response surfaces as a parse failure downstream.
    pub async fn popular(&self, page: i64) -> Result<TmdbPage, TmdbError> {
        let url = format!(
            "{}/movie/popular?api_key={}&page={}",
            TMDB_BASE_URL,
            self.api_key()?,
            page
        );

        tracing::debug!("Fetching TMDB popular page {}", page);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| TmdbError::Network(e.to_string()))?;

        response
            .json::<TmdbPage>()
            .await
            .map_err(|e| TmdbError::Parse(e.to_string()))
    }

    /// Search movies by title
    ///
    /// Unlike the listing path, this checks the HTTP status so callers
    /// can surface upstream failures without mirroring anything.
    pub async fn search(&self, query: &str) -> Result<TmdbPage, TmdbError> {
        let url = format!(
            "{}/search/movie?api_key={}&query={}",
            TMDB_BASE_URL,
            self.api_key()?,
            urlencode(query)
        );

        tracing::debug!("Searching TMDB for {:?}", query);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| TmdbError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TmdbError::Api(status.as_u16(), body));
        }

        response
            .json::<TmdbPage>()
            .await
            .map_err(|e| TmdbError::Parse(e.to_string()))
    }
}

/// Percent-encode a query string value
fn urlencode(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            b' ' => encoded.push('+'),
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}
