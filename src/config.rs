//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.review-insights.toml` files.

use crate::analysis::keywords::{DEFAULT_STOPWORDS, DEFAULT_TOP_N};
use crate::models::Source;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file name, looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = ".review-insights.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Review API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Keyword extraction settings.
    #[serde(default)]
    pub keywords: KeywordsConfig,

    /// Recommendation thresholds.
    #[serde(default)]
    pub recommendation: RecommendationConfig,

    /// Review ingestion settings.
    #[serde(default)]
    pub input: InputConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            verbose: false,
        }
    }
}

fn default_output() -> String {
    "review_insights.md".to_string()
}

/// Review API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the review service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds. Scraping both sources can be slow.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Marketplace to query when none is given on the command line.
    #[serde(default)]
    pub source: Source,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            source: Source::default(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_timeout() -> u64 {
    120
}

/// Keyword extraction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordsConfig {
    /// Maximum number of keywords to report.
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Stopword set. Replaces the built-in list when given.
    #[serde(default = "default_stopwords")]
    pub stopwords: Vec<String>,

    /// Additional stopwords on top of `stopwords`.
    #[serde(default)]
    pub extra_stopwords: Vec<String>,
}

impl Default for KeywordsConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            stopwords: default_stopwords(),
            extra_stopwords: Vec::new(),
        }
    }
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_stopwords() -> Vec<String> {
    DEFAULT_STOPWORDS.iter().map(|w| w.to_string()).collect()
}

/// Recommendation thresholds, in percent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    #[serde(default = "default_positive_threshold")]
    pub positive_threshold: f64,

    #[serde(default = "default_negative_threshold")]
    pub negative_threshold: f64,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            positive_threshold: default_positive_threshold(),
            negative_threshold: default_negative_threshold(),
        }
    }
}

fn default_positive_threshold() -> f64 {
    55.0
}

fn default_negative_threshold() -> f64 {
    45.0
}

/// Review ingestion settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    /// Drop blank and repeated review texts before analysis.
    #[serde(default)]
    pub dedupe: bool,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.review-insights.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref url) = args.api_url {
            self.api.base_url = url.clone();
        }
        if let Some(timeout) = args.timeout {
            self.api.timeout_seconds = timeout;
        }
        if let Some(source) = args.source {
            self.api.source = source;
        }

        if let Some(top_n) = args.top_n {
            self.keywords.top_n = top_n;
        }
        if let Some(ref stopwords) = args.stopwords {
            self.keywords.stopwords = stopwords.clone();
        }
        if let Some(ref extra) = args.extra_stopwords {
            self.keywords.extra_stopwords.extend(extra.iter().cloned());
        }

        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }

        // Flags always override
        if args.dedupe {
            self.input.dedupe = true;
        }
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Check settings that parse fine but cannot produce a useful run.
    ///
    /// Called on the merged configuration, so bad values from either the
    /// file or the command line are caught.
    pub fn validate(&self) -> Result<()> {
        if self.keywords.top_n == 0 {
            bail!("keywords.top_n must be at least 1");
        }
        if self.api.timeout_seconds == 0 {
            bail!("api.timeout_seconds must be at least 1");
        }
        for (name, value) in [
            ("positive_threshold", self.recommendation.positive_threshold),
            ("negative_threshold", self.recommendation.negative_threshold),
        ] {
            if !(0.0..=100.0).contains(&value) {
                bail!("recommendation.{} must be between 0 and 100, got {}", name, value);
            }
        }
        Ok(())
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
