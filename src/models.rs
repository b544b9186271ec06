//! Data models for review insights.
//!
//! This module contains the core data structures used throughout
//! the application for representing reviews, derived statistics, and reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Sentiment label attached to a review by the upstream classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    /// Any label outside the fixed set, or a missing label.
    #[default]
    Unrecognized,
}

impl<'de> Deserialize<'de> for Sentiment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = Value::deserialize(deserializer)?;
        Ok(Sentiment::from(&label))
    }
}

impl From<&Value> for Sentiment {
    /// Non-string labels (numbers, booleans, null) are unrecognized.
    fn from(label: &Value) -> Self {
        label.as_str().map(Sentiment::from).unwrap_or_default()
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "Positive"),
            Sentiment::Neutral => write!(f, "Neutral"),
            Sentiment::Negative => write!(f, "Negative"),
            Sentiment::Unrecognized => write!(f, "Unrecognized"),
        }
    }
}

impl Sentiment {
    /// Returns an emoji representation of the sentiment.
    pub fn emoji(&self) -> &'static str {
        match self {
            Sentiment::Positive => "📈",
            Sentiment::Neutral => "⚖️",
            Sentiment::Negative => "📉",
            Sentiment::Unrecognized => "❔",
        }
    }
}

impl From<&str> for Sentiment {
    fn from(s: &str) -> Self {
        match s {
            "positive" => Sentiment::Positive,
            "neutral" => Sentiment::Neutral,
            "negative" => Sentiment::Negative,
            _ => Sentiment::Unrecognized,
        }
    }
}

/// A single classified product review.
///
/// Deserialization never fails on a well-formed JSON value: a missing or
/// non-string `review` becomes empty text, and a missing or non-string
/// `sentiment` becomes [`Sentiment::Unrecognized`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Review {
    /// Review body.
    #[serde(rename = "review")]
    pub text: String,
    /// Sentiment label.
    pub sentiment: Sentiment,
}

impl<'de> Deserialize<'de> for Review {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Review::from(&value))
    }
}

impl From<&Value> for Review {
    fn from(value: &Value) -> Self {
        let text = value
            .get("review")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let sentiment = value
            .get("sentiment")
            .map(Sentiment::from)
            .unwrap_or_default();

        Self { text, sentiment }
    }
}

impl Review {
    #[cfg(test)]
    pub fn new(text: impl Into<String>, sentiment: Sentiment) -> Self {
        Self {
            text: text.into(),
            sentiment,
        }
    }
}

/// Marketplace the reviews are pulled from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Amazon,
    Flipkart,
    /// Both marketplaces (default)
    #[default]
    Both,
}

impl Source {
    /// Wire name used in the review API query string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Amazon => "amazon",
            Source::Flipkart => "flipkart",
            Source::Both => "both",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Amazon => write!(f, "Amazon"),
            Source::Flipkart => write!(f, "Flipkart"),
            Source::Both => write!(f, "Amazon + Flipkart"),
        }
    }
}

/// Qualitative message describing which sentiment dominates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Insight {
    MajorityPositive,
    MajorityNegative,
    Mixed,
}

impl Insight {
    pub fn message(&self) -> &'static str {
        match self {
            Insight::MajorityPositive => {
                "✅ The majority of reviews are positive. Customers are satisfied."
            }
            Insight::MajorityNegative => {
                "⚠️ Many customers expressed negative feedback. Improvements may be needed."
            }
            Insight::Mixed => "ℹ️ Reviews are mostly neutral. Customers have mixed opinions.",
        }
    }
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Sentiment counts and percentages for one review set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    /// Number of reviews in the input, including unrecognized ones.
    pub total: usize,
    pub positive_pct: f64,
    pub neutral_pct: f64,
    pub negative_pct: f64,
    pub insight: Insight,
}

impl SentimentSummary {
    /// Number of reviews with a recognized label.
    pub fn recognized(&self) -> usize {
        self.positive + self.neutral + self.negative
    }

    /// Number of reviews left out of all three counts.
    pub fn excluded(&self) -> usize {
        self.total - self.recognized()
    }

    /// Count and percentage for a sentiment, in display order.
    pub fn rows(&self) -> [(Sentiment, usize, f64); 3] {
        [
            (Sentiment::Positive, self.positive, self.positive_pct),
            (Sentiment::Neutral, self.neutral, self.neutral_pct),
            (Sentiment::Negative, self.negative, self.negative_pct),
        ]
    }
}

/// Overall buy/skip verdict derived from sentiment percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub label: Sentiment,
    pub text: String,
    /// Percentages rounded to two decimals.
    pub positive_pct: f64,
    pub neutral_pct: f64,
    pub negative_pct: f64,
}

/// A frequently occurring word and its share of kept word occurrences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordStat {
    pub word: String,
    pub count: usize,
    /// Share of kept word occurrences, rounded to one decimal.
    pub percent: f64,
}

/// Reviews partitioned by sentiment, original order preserved in each group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupedReviews {
    pub positive: Vec<Review>,
    pub negative: Vec<Review>,
    pub neutral: Vec<Review>,
    /// Reviews with an unrecognized label. Not rendered.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub unrecognized: Vec<Review>,
}

impl GroupedReviews {
    /// Groups in presentation order: positive, negative, neutral.
    pub fn sections(&self) -> [(Sentiment, &[Review]); 3] {
        [
            (Sentiment::Positive, self.positive.as_slice()),
            (Sentiment::Negative, self.negative.as_slice()),
            (Sentiment::Neutral, self.neutral.as_slice()),
        ]
    }
}

/// Where the reviews for a report came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewOrigin {
    Api,
    File,
}

/// Metadata about a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Product name that was queried (may be empty for file input).
    pub product: String,
    pub source: Source,
    pub origin: ReviewOrigin,
    pub generated_at: DateTime<Utc>,
    pub review_count: usize,
}

/// The complete insights report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub summary: SentimentSummary,
    pub recommendation: Recommendation,
    pub keywords: Vec<KeywordStat>,
    pub groups: GroupedReviews,
}
