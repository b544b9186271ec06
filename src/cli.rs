//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::models::Source;
use clap::Parser;
use std::path::PathBuf;

/// review-insights - sentiment statistics and keyword highlights for product reviews
///
/// Pulls classified reviews from the review API (or a saved JSON file),
/// summarizes the sentiment split, and ranks the most mentioned words.
///
/// Examples:
///   review-insights --product "poco x3"
///   review-insights --product "poco x3" --source flipkart --format json
///   review-insights --input saved_reviews.json --top-n 10
///   review-insights --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Product name to look up
    #[arg(
        short,
        long,
        value_name = "NAME",
        required_unless_present_any = ["input", "init_config"]
    )]
    pub product: Option<String>,

    /// Marketplace to pull reviews from
    ///
    /// Defaults to the config file setting, or "both".
    #[arg(short, long, value_name = "SOURCE")]
    pub source: Option<Source>,

    /// Review API base URL
    #[arg(long, value_name = "URL", env = "REVIEW_API_URL")]
    pub api_url: Option<String>,

    /// Read reviews from a JSON file instead of the review API
    ///
    /// Accepts a review array or a saved API response.
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output file path for the report
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Number of keywords to report
    #[arg(long, value_name = "COUNT")]
    pub top_n: Option<usize>,

    /// Stopwords replacing the built-in list (comma-separated)
    ///
    /// Example: --stopwords the,is,and
    #[arg(long, value_name = "WORDS", value_delimiter = ',')]
    pub stopwords: Option<Vec<String>>,

    /// Stopwords added to the active list (comma-separated)
    #[arg(long, value_name = "WORDS", value_delimiter = ',')]
    pub extra_stopwords: Option<Vec<String>>,

    /// Drop blank and repeated review texts before analysis
    #[arg(long)]
    pub dedupe: bool,

    /// Review API request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .review-insights.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .review-insights.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Product name, or an empty string when reading from a file.
    pub fn product_name(&self) -> &str {
        self.product.as_deref().map(str::trim).unwrap_or("")
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.input.is_none() && self.product_name().is_empty() {
            return Err("Product name must not be empty".to_string());
        }

        if let Some(ref url) = self.api_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err("API URL must start with 'http://' or 'https://'".to_string());
            }
        }

        if self.top_n == Some(0) {
            return Err("Top-n must be at least 1".to_string());
        }

        if self.timeout == Some(0) {
            return Err("Timeout must be at least 1 second".to_string());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref input) = self.input {
            if !input.is_file() {
                return Err(format!("Input file does not exist: {}", input.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
