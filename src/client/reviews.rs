//! Fetching classified reviews over HTTP.
//!
//! The review service exposes `GET /api/reviews?product=<name>&source=<src>`
//! and answers with `{"reviews": [{"review": ..., "sentiment": ...}], ...}`.
//! Any server-side summary in the payload is ignored; statistics are always
//! recomputed locally.

use crate::models::{Review, Source};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Configuration for the review client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_seconds: 120,
        }
    }
}

impl From<&crate::config::ApiConfig> for ClientConfig {
    fn from(config: &crate::config::ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout_seconds: config.timeout_seconds,
        }
    }
}

/// Ways a review fetch can fail.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("cannot connect to review API at {0}")]
    Connect(String),

    #[error("review API request timed out after {0}s")]
    Timeout(u64),

    #[error("review API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("failed to decode review API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("review API request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Successful review API payload.
#[derive(Debug, Deserialize)]
struct ReviewsResponse {
    #[serde(default)]
    reviews: Vec<Review>,
}

/// Error payload returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
}

/// HTTP client for the review service.
pub struct ReviewClient {
    config: ClientConfig,
    http_client: reqwest::Client,
}

impl ReviewClient {
    /// Create a new client.
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Full URL of the reviews endpoint.
    pub fn reviews_url(&self) -> String {
        format!("{}/api/reviews", self.config.base_url.trim_end_matches('/'))
    }

    /// Fetch classified reviews for a product.
    pub async fn fetch_reviews(
        &self,
        product: &str,
        source: Source,
    ) -> Result<Vec<Review>, FetchError> {
        let url = self.reviews_url();
        info!("Fetching {} reviews for '{}'", source.as_str(), product);

        let response = self
            .http_client
            .get(&url)
            .query(&[("product", product), ("source", source.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout(self.config.timeout_seconds)
                } else if e.is_connect() {
                    FetchError::Connect(self.config.base_url.clone())
                } else {
                    FetchError::Request(e)
                }
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }

        let reviews = parse_reviews(&body)?;
        debug!("Received {} reviews", reviews.len());
        Ok(reviews)
    }

    /// Fetch reviews, substituting an empty list on any failure.
    pub async fn fetch_reviews_or_empty(&self, product: &str, source: Source) -> Vec<Review> {
        match self.fetch_reviews(product, source).await {
            Ok(reviews) => reviews,
            Err(e) => {
                warn!("Review fetch failed, continuing with no reviews: {}", e);
                Vec::new()
            }
        }
    }
}

/// Parse a successful response body.
fn parse_reviews(body: &str) -> Result<Vec<Review>, FetchError> {
    let response: ReviewsResponse = serde_json::from_str(body)?;
    Ok(response.reviews)
}

/// Build an API error, preferring the server's `error` message.
fn api_error(status: u16, body: &str) -> FetchError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| body.trim().to_string());

    FetchError::Api { status, message }
}
