//! Loading reviews from local JSON files.
//!
//! Accepts either a bare array of reviews or the review API response shape
//! (an object with a `reviews` array), so saved API responses can be replayed.

use crate::models::Review;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Deserialize)]
#[serde(untagged)]
enum ReviewFile {
    List(Vec<Review>),
    Response { reviews: Vec<Review> },
}

/// Parse reviews from JSON text.
pub fn parse_reviews(content: &str) -> Result<Vec<Review>> {
    let file: ReviewFile =
        serde_json::from_str(content).context("Expected a review array or {\"reviews\": [...]}")?;

    Ok(match file {
        ReviewFile::List(reviews) => reviews,
        ReviewFile::Response { reviews } => reviews,
    })
}

/// Load reviews from a JSON file.
pub fn load_reviews(path: &Path) -> Result<Vec<Review>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read review file: {}", path.display()))?;

    let reviews = parse_reviews(&content)
        .with_context(|| format!("Failed to parse review file: {}", path.display()))?;

    info!("Loaded {} reviews from {}", reviews.len(), path.display());
    Ok(reviews)
}
