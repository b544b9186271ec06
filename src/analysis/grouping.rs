//! Review grouping and de-duplication.

use crate::models::{GroupedReviews, Review, Sentiment};
use std::collections::HashSet;

/// Partition reviews by sentiment, keeping input order inside each group.
pub fn group_by_sentiment(reviews: &[Review]) -> GroupedReviews {
    let mut grouped = GroupedReviews::default();

    for review in reviews {
        let bucket = match review.sentiment {
            Sentiment::Positive => &mut grouped.positive,
            Sentiment::Negative => &mut grouped.negative,
            Sentiment::Neutral => &mut grouped.neutral,
            Sentiment::Unrecognized => &mut grouped.unrecognized,
        };
        bucket.push(review.clone());
    }

    grouped
}

/// Drop reviews with blank text and repeated texts. First occurrence wins.
pub fn dedupe_reviews(reviews: Vec<Review>) -> Vec<Review> {
    let mut seen: HashSet<String> = HashSet::new();

    reviews
        .into_iter()
        .filter(|review| !review.text.trim().is_empty())
        .filter(|review| seen.insert(review.text.clone()))
        .collect()
}
