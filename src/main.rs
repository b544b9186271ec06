//! review-insights - Sentiment statistics and keyword highlights for product reviews
//!
//! A CLI tool that pulls classified product reviews from the review API
//! (or a saved JSON file), summarizes the sentiment split, ranks the most
//! mentioned words, and writes a Markdown or JSON report.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (config, input file, report write, etc.)

mod analysis;
mod cli;
mod client;
mod config;
mod input;
mod models;
mod report;

use analysis::{KeywordExtractor, RecommendationThresholds};
use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::{Config, CONFIG_FILE_NAME};
use indicatif::{ProgressBar, ProgressStyle};
use models::{Report, ReportMetadata, Review, ReviewOrigin};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    let loaded = load_config(&args);

    // Initialize logging
    let verbose = loaded
        .as_ref()
        .map(|(config, _)| config.general.verbose)
        .unwrap_or(false);
    init_logging(log_level(&args, verbose));

    info!("review-insights v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    let mut config = match loaded {
        Ok((config, origin)) => {
            origin.log();
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    match run_insights(&args, &config).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Report failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .review-insights.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to customize the API URL, stopwords, thresholds, and more.");
    Ok(())
}

/// Pick the log level from flags, falling back to the config file's verbose setting.
fn log_level(args: &Args, config_verbose: bool) -> tracing::Level {
    if !args.quiet && config_verbose {
        tracing::Level::DEBUG
    } else {
        args.log_level()
    }
}

/// Initialize logging at the given level.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Where the active configuration came from. Logged once logging is up.
enum ConfigOrigin {
    Explicit(PathBuf),
    DefaultFile,
    BuiltIn,
    Fallback(anyhow::Error),
}

impl ConfigOrigin {
    fn log(&self) {
        match self {
            ConfigOrigin::Explicit(path) => info!("Loaded config from: {}", path.display()),
            ConfigOrigin::DefaultFile => info!("Loaded default config from {}", CONFIG_FILE_NAME),
            ConfigOrigin::BuiltIn => debug!("No config file found, using defaults"),
            ConfigOrigin::Fallback(e) => warn!("Failed to load config: {:#}", e),
        }
    }
}

/// Load configuration from file or use defaults.
///
/// An explicit `--config` path must load; a broken default file only warns.
fn load_config(args: &Args) -> Result<(Config, ConfigOrigin)> {
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, ConfigOrigin::Explicit(config_path.clone())));
    }

    Ok(match Config::load_default() {
        Ok(Some(config)) => (config, ConfigOrigin::DefaultFile),
        Ok(None) => (Config::default(), ConfigOrigin::BuiltIn),
        Err(e) => (Config::default(), ConfigOrigin::Fallback(e)),
    })
}

/// Run the complete workflow. Returns the exit code.
async fn run_insights(args: &Args, config: &Config) -> Result<i32> {
    // Step 1: Get the reviews
    let (mut reviews, origin) = match args.input {
        Some(ref path) => {
            println!("📂 Reading reviews from: {}", path.display());
            (input::load_reviews(path)?, ReviewOrigin::File)
        }
        None => (fetch_reviews(args, config).await?, ReviewOrigin::Api),
    };

    if config.input.dedupe {
        let before = reviews.len();
        reviews = analysis::dedupe_reviews(reviews);
        debug!("De-duplicated reviews: {} -> {}", before, reviews.len());
    }

    if reviews.is_empty() {
        warn!("No reviews to analyze");
    }

    // Step 2: Run the analyzers
    println!("\n🔬 Analyzing {} reviews...", reviews.len());
    let report = build_report(args, config, reviews, origin);

    // Step 3: Generate and save the report
    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&report),
    };

    let output_path = output_path(args, config);
    std::fs::write(&output_path, &output)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    print_summary(&report);
    println!(
        "\n✅ Analysis complete! Report saved to: {}",
        output_path.display()
    );

    Ok(0)
}

/// Fetch reviews from the review API. A failed fetch yields an empty list.
async fn fetch_reviews(args: &Args, config: &Config) -> Result<Vec<Review>> {
    let product = args.product_name();
    let client = client::ReviewClient::new(client::ClientConfig::from(&config.api))
        .context("Failed to create HTTP client")?;

    println!("📥 Fetching reviews for: {}", product);
    println!("   Source: {}", config.api.source);
    println!("   API: {}", client.reviews_url());

    let spinner = fetch_spinner(args.quiet);
    let reviews = client
        .fetch_reviews_or_empty(product, config.api.source)
        .await;
    spinner.finish_and_clear();

    info!("Fetched {} reviews", reviews.len());
    Ok(reviews)
}

/// Spinner shown while the review API scrapes. Hidden in quiet mode.
fn fetch_spinner(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Waiting for the review API...");
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// Run the analyzers and assemble the report.
fn build_report(
    args: &Args,
    config: &Config,
    reviews: Vec<Review>,
    origin: ReviewOrigin,
) -> Report {
    let summary = analysis::summarize(&reviews);
    let recommendation = analysis::recommend(
        &summary,
        RecommendationThresholds::from(&config.recommendation),
    );
    let keywords = KeywordExtractor::from(&config.keywords).extract(&reviews);
    let groups = analysis::group_by_sentiment(&reviews);

    debug!(
        "Summary: {} positive, {} neutral, {} negative, {} excluded",
        summary.positive,
        summary.neutral,
        summary.negative,
        summary.excluded()
    );

    Report {
        metadata: ReportMetadata {
            product: args.product_name().to_string(),
            source: config.api.source,
            origin,
            generated_at: Utc::now(),
            review_count: reviews.len(),
        },
        summary,
        recommendation,
        keywords,
        groups,
    }
}

/// Resolve the report path. JSON output swaps the default `.md` extension.
fn output_path(args: &Args, config: &Config) -> PathBuf {
    if let Some(ref output) = args.output {
        return output.clone();
    }

    let path = PathBuf::from(&config.general.output);
    match args.format {
        OutputFormat::Json if path.extension().is_some_and(|ext| ext == "md") => {
            path.with_extension("json")
        }
        _ => path,
    }
}

/// Print the console summary.
fn print_summary(report: &Report) {
    println!("\n📊 Sentiment Summary:");
    println!(
        "{}",
        analysis::generate_summary_text(&report.summary)
            .lines()
            .map(|line| format!("   {}", line))
            .collect::<Vec<_>>()
            .join("\n")
    );
    println!("   {}", report.recommendation.text);

    if !report.keywords.is_empty() {
        let terms: Vec<String> = report
            .keywords
            .iter()
            .map(|k| format!("{} ({}, {:.1}%)", k.word, k.count, k.percent))
            .collect();
        println!("\n📑 Key terms: {}", terms.join(", "));
    }
}
