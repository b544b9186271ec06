//! Review API client.
//!
//! This module talks to the HTTP service that scrapes and classifies reviews.

pub mod reviews;

pub use reviews::{ClientConfig, FetchError, ReviewClient};
