//! Markdown and JSON report generation.
//!
//! Renders the sentiment summary, recommendation, key terms, and grouped
//! review lists of a [`Report`].

use crate::models::{
    GroupedReviews, KeywordStat, Recommendation, Report, ReportMetadata, ReviewOrigin, Review,
    Sentiment, SentimentSummary,
};
use anyhow::Result;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report) -> String {
    let mut output = String::new();

    // Title
    if report.metadata.product.is_empty() {
        output.push_str("# Review Insights\n\n");
    } else {
        output.push_str(&format!("# Review Insights: {}\n\n", report.metadata.product));
    }

    output.push_str(&generate_metadata_section(&report.metadata));

    if report.summary.total == 0 {
        output.push_str("No reviews were found for this product.\n\n");
        output.push_str(&generate_footer());
        return output;
    }

    output.push_str(&generate_summary_section(&report.summary));
    output.push_str(&generate_recommendation_section(&report.recommendation));
    output.push_str(&generate_keywords_section(&report.keywords));
    output.push_str(&generate_reviews_section(&report.groups));
    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    match metadata.origin {
        ReviewOrigin::Api => {
            section.push_str(&format!("- **Source:** {}\n", metadata.source));
        }
        ReviewOrigin::File => {
            section.push_str("- **Source:** local review file\n");
        }
    }
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Reviews Analyzed:** {}\n", metadata.review_count));
    section.push('\n');

    section
}

/// Generate the sentiment summary table.
fn generate_summary_section(summary: &SentimentSummary) -> String {
    let mut section = String::new();

    section.push_str("## Sentiment Summary\n\n");
    section.push_str("| Sentiment | Reviews | Percentage |\n");
    section.push_str("|:---|:---:|:---:|\n");

    for (sentiment, count, pct) in summary.rows() {
        section.push_str(&format!(
            "| {} {} | {} | {:.2}% |\n",
            sentiment,
            sentiment.emoji(),
            count,
            pct
        ));
    }
    section.push_str(&format!(
        "| **Total** | **{}** | **100.00%** |\n\n",
        summary.total
    ));

    if summary.excluded() > 0 {
        section.push_str(&format!(
            "*{} review(s) had an unrecognized sentiment label and are not counted above.*\n\n",
            summary.excluded()
        ));
    }

    section.push_str(&format!("*{}*\n\n", summary.insight.message()));

    section
}

/// Generate the recommendation section.
fn generate_recommendation_section(recommendation: &Recommendation) -> String {
    format!("## Recommendation\n\n> {}\n\n", recommendation.text)
}

/// Generate the key terms table.
fn generate_keywords_section(keywords: &[KeywordStat]) -> String {
    if keywords.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Key Terms in Reviews\n\n");
    section.push_str("| Term | Mentions | Share |\n");
    section.push_str("|:---|:---:|:---:|\n");

    for stat in keywords {
        section.push_str(&format!(
            "| {} | {} | {:.1}% |\n",
            stat.word, stat.count, stat.percent
        ));
    }
    section.push('\n');

    section
}

/// Generate the grouped review lists. Empty groups are skipped.
fn generate_reviews_section(groups: &GroupedReviews) -> String {
    let mut section = String::new();

    section.push_str("## Reviews\n\n");

    for (sentiment, reviews) in groups.sections() {
        section.push_str(&generate_review_group(sentiment, reviews));
    }

    section
}

/// Generate the list for a single sentiment group.
fn generate_review_group(sentiment: Sentiment, reviews: &[Review]) -> String {
    if reviews.is_empty() {
        return String::new();
    }

    let mut block = String::new();

    block.push_str(&format!(
        "### {} {} Reviews ({})\n\n",
        sentiment.emoji(),
        sentiment,
        reviews.len()
    ));

    for review in reviews {
        // keep multi-line reviews inside one list item
        let text = review.text.trim().replace('\n', " ");
        block.push_str(&format!("- {}\n", text));
    }
    block.push('\n');

    block
}

/// Generate the report footer.
fn generate_footer() -> String {
    "---\n\n*Report generated by review-insights*\n".to_string()
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}
