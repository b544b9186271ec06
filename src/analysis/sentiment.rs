//! Sentiment aggregation and statistics.
//!
//! Counts reviews per sentiment label, derives percentages, and picks the
//! insight message and overall recommendation for a review set.

use crate::models::{Insight, Recommendation, Review, Sentiment, SentimentSummary};

/// Percentage cut-offs used by [`recommend`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendationThresholds {
    /// Minimum positive share (percent) for a positive verdict.
    pub positive: f64,
    /// Minimum negative share (percent) for a negative verdict.
    pub negative: f64,
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        Self {
            positive: 55.0,
            negative: 45.0,
        }
    }
}

impl From<&crate::config::RecommendationConfig> for RecommendationThresholds {
    fn from(config: &crate::config::RecommendationConfig) -> Self {
        Self {
            positive: config.positive_threshold,
            negative: config.negative_threshold,
        }
    }
}

/// Summarize the sentiment distribution of a review set.
///
/// Reviews with an unrecognized label are left out of all three counts but
/// still count toward `total`, which is the percentage denominator.
pub fn summarize(reviews: &[Review]) -> SentimentSummary {
    let (mut positive, mut neutral, mut negative) = (0, 0, 0);

    for review in reviews {
        match review.sentiment {
            Sentiment::Positive => positive += 1,
            Sentiment::Neutral => neutral += 1,
            Sentiment::Negative => negative += 1,
            Sentiment::Unrecognized => {}
        }
    }

    let total = reviews.len();
    let denominator = total.max(1) as f64;

    SentimentSummary {
        positive,
        neutral,
        negative,
        total,
        positive_pct: positive as f64 / denominator * 100.0,
        neutral_pct: neutral as f64 / denominator * 100.0,
        negative_pct: negative as f64 / denominator * 100.0,
        insight: select_insight(positive, neutral, negative),
    }
}

/// Pick the insight for a distribution. Order of the checks matters: a
/// positive/negative tie must land on `Mixed`.
pub fn select_insight(positive: usize, neutral: usize, negative: usize) -> Insight {
    if positive > negative && positive > neutral {
        Insight::MajorityPositive
    } else if negative > positive {
        Insight::MajorityNegative
    } else {
        Insight::Mixed
    }
}

/// Derive the overall recommendation from a summary.
pub fn recommend(
    summary: &SentimentSummary,
    thresholds: RecommendationThresholds,
) -> Recommendation {
    let (label, text) = if summary.positive_pct >= thresholds.positive {
        (
            Sentiment::Positive,
            "👍 Recommended: Majority of reviews are positive.",
        )
    } else if summary.negative_pct >= thresholds.negative {
        (
            Sentiment::Negative,
            "⚠️ Not recommended: Significant negative feedback.",
        )
    } else {
        (
            Sentiment::Neutral,
            "ℹ️ Mixed: Reviews are mixed, consider carefully.",
        )
    };

    Recommendation {
        label,
        text: text.to_string(),
        positive_pct: round_to(summary.positive_pct, 2),
        neutral_pct: round_to(summary.neutral_pct, 2),
        negative_pct: round_to(summary.negative_pct, 2),
    }
}

/// Round half away from zero to `decimals` places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Generate a text summary of sentiment statistics.
pub fn generate_summary_text(summary: &SentimentSummary) -> String {
    let mut lines = Vec::new();

    lines.push(format!("Total Reviews: {}", summary.total));
    for (sentiment, count, pct) in summary.rows() {
        lines.push(format!(
            "- {} {}: {} ({:.2}%)",
            sentiment.emoji(),
            sentiment,
            count,
            pct
        ));
    }
    if summary.excluded() > 0 {
        lines.push(format!("- Unrecognized labels: {}", summary.excluded()));
    }
    lines.push(summary.insight.message().to_string());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reviews(positive: usize, neutral: usize, negative: usize) -> Vec<Review> {
        let mut out = Vec::new();
        out.extend((0..positive).map(|i| Review::new(format!("good {}", i), Sentiment::Positive)));
        out.extend((0..neutral).map(|i| Review::new(format!("okay {}", i), Sentiment::Neutral)));
        out.extend((0..negative).map(|i| Review::new(format!("bad {}", i), Sentiment::Negative)));
        out
    }

    #[test]
    fn test_summarize_counts_and_percentages() {
        let summary = summarize(&reviews(2, 1, 1));

        assert_eq!(summary.positive, 2);
        assert_eq!(summary.neutral, 1);
        assert_eq!(summary.negative, 1);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.positive_pct, 50.0);
        assert_eq!(summary.neutral_pct, 25.0);
        assert_eq!(summary.negative_pct, 25.0);
        assert_eq!(summary.insight, Insight::MajorityPositive);
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[]);

        assert_eq!(summary.positive, 0);
        assert_eq!(summary.neutral, 0);
        assert_eq!(summary.negative, 0);
        assert_eq!(summary.total, 0);
        assert_eq!(
            summary.positive_pct + summary.neutral_pct + summary.negative_pct,
            0.0
        );
        assert_eq!(summary.insight, Insight::Mixed);
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        for (p, n, g) in [(1, 1, 1), (5, 0, 2), (0, 7, 0), (3, 3, 1), (13, 4, 9)] {
            let summary = summarize(&reviews(p, n, g));
            let sum = summary.positive_pct + summary.neutral_pct + summary.negative_pct;
            assert!((sum - 100.0).abs() < 1e-9, "sum was {} for {:?}", sum, (p, n, g));
        }
    }

    #[test]
    fn test_unrecognized_excluded_from_counts() {
        let mut input = reviews(1, 1, 0);
        input.push(Review::new("???", Sentiment::Unrecognized));
        input.push(Review::new("!!!", Sentiment::Unrecognized));

        let summary = summarize(&input);

        assert_eq!(summary.recognized(), 2);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.excluded(), 2);
        assert_eq!(summary.positive_pct, 25.0);
    }

    #[test]
    fn test_tie_positive_negative_is_mixed() {
        let summary = summarize(&reviews(3, 1, 3));
        assert_eq!(summary.insight, Insight::Mixed);
    }

    #[test]
    fn test_insight_priority() {
        assert_eq!(select_insight(5, 1, 1), Insight::MajorityPositive);
        // positive ties neutral, negative does not beat positive
        assert_eq!(select_insight(3, 3, 1), Insight::Mixed);
        assert_eq!(select_insight(1, 0, 2), Insight::MajorityNegative);
        // negative wins over positive even when neutral dominates
        assert_eq!(select_insight(1, 9, 2), Insight::MajorityNegative);
        assert_eq!(select_insight(0, 4, 0), Insight::Mixed);
        assert_eq!(select_insight(0, 0, 0), Insight::Mixed);
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let input = reviews(4, 2, 3);
        assert_eq!(summarize(&input), summarize(&input));
    }

    #[test]
    fn test_summarize_from_threads() {
        let input = reviews(6, 2, 1);
        let expected = summarize(&input);

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4).map(|_| scope.spawn(|| summarize(&input))).collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    #[test]
    fn test_recommend_thresholds() {
        let thresholds = RecommendationThresholds::default();

        let positive = recommend(&summarize(&reviews(11, 5, 4)), thresholds);
        assert_eq!(positive.label, Sentiment::Positive);
        assert_eq!(positive.positive_pct, 55.0);
        assert_eq!(
            positive.text,
            "👍 Recommended: Majority of reviews are positive."
        );

        let negative = recommend(&summarize(&reviews(5, 6, 9)), thresholds);
        assert_eq!(negative.label, Sentiment::Negative);
        assert_eq!(negative.negative_pct, 45.0);
        assert_eq!(
            negative.text,
            "⚠️ Not recommended: Significant negative feedback."
        );

        let mixed = recommend(&summarize(&reviews(1, 1, 1)), thresholds);
        assert_eq!(mixed.label, Sentiment::Neutral);
        assert_eq!(
            mixed.text,
            "ℹ️ Mixed: Reviews are mixed, consider carefully."
        );
        assert_eq!(mixed.positive_pct, 33.33);
    }

    #[test]
    fn test_recommend_custom_thresholds() {
        let thresholds = RecommendationThresholds {
            positive: 30.0,
            negative: 90.0,
        };
        let rec = recommend(&summarize(&reviews(1, 1, 1)), thresholds);
        assert_eq!(rec.label, Sentiment::Positive);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(33.333333, 1), 33.3);
        assert_eq!(round_to(66.666666, 2), 66.67);
        assert_eq!(round_to(12.25, 1), 12.3);
        assert_eq!(round_to(0.0, 1), 0.0);
    }

    #[test]
    fn test_generate_summary_text() {
        let mut input = reviews(2, 0, 1);
        input.push(Review::new("x", Sentiment::Unrecognized));
        let text = generate_summary_text(&summarize(&input));

        assert!(text.contains("Total Reviews: 4"));
        assert!(text.contains("Positive: 2 (50.00%)"));
        assert!(text.contains("Unrecognized labels: 1"));
        assert!(text.contains("majority of reviews are positive"));
    }
}
