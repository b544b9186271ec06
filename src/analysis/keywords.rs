//! Keyword frequency extraction.
//!
//! Tokenizes review text, drops stopwords, and ranks the remaining words by
//! how often they occur across the whole review set.

use crate::analysis::sentiment::round_to;
use crate::models::{KeywordStat, Review};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Number of keywords returned when no cap is configured.
pub const DEFAULT_TOP_N: usize = 7;

/// Common English function words ignored by default.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "the", "is", "and", "to", "it", "in", "for", "of", "this", "that", "with", "on", "as", "but",
    "so", "are", "be", "or", "if", "an", "a",
];

/// Returns the default stopword set.
pub fn default_stopwords() -> HashSet<String> {
    DEFAULT_STOPWORDS.iter().map(|w| w.to_string()).collect()
}

/// Keyword extractor with an injectable stopword set.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    stopwords: HashSet<String>,
    top_n: usize,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self {
            stopwords: default_stopwords(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl From<&crate::config::KeywordsConfig> for KeywordExtractor {
    fn from(config: &crate::config::KeywordsConfig) -> Self {
        Self::default()
            .with_stopwords(config.stopwords.iter().chain(&config.extra_stopwords))
            .with_top_n(config.top_n)
    }
}

impl KeywordExtractor {
    /// Replace the stopword set. Words are lowercased so they match tokens.
    pub fn with_stopwords<I, S>(mut self, stopwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stopwords = stopwords
            .into_iter()
            .map(|w| w.as_ref().to_lowercase())
            .collect();
        self
    }

    /// Set the maximum number of keywords returned.
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    #[cfg(test)]
    pub fn stopwords(&self) -> &HashSet<String> {
        &self.stopwords
    }

    #[cfg(test)]
    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Rank the most frequent non-stopword tokens across all reviews.
    ///
    /// Equal counts keep the order in which the words were first seen.
    pub fn extract(&self, reviews: &[Review]) -> Vec<KeywordStat> {
        let counts = self.count_words(reviews);

        let total: usize = counts.iter().map(|(_, count)| count).sum();
        let denominator = total.max(1) as f64;
        debug!(
            "Counted {} kept word occurrences ({} distinct)",
            total,
            counts.len()
        );

        let mut ranked = counts;
        // stable: ties stay in first-seen order
        ranked.sort_by_key(|(_, count)| std::cmp::Reverse(*count));
        ranked.truncate(self.top_n);

        ranked
            .into_iter()
            .map(|(word, count)| KeywordStat {
                word,
                count,
                percent: round_to(count as f64 / denominator * 100.0, 1),
            })
            .collect()
    }

    /// Count kept tokens, returning them in first-seen order.
    fn count_words(&self, reviews: &[Review]) -> Vec<(String, usize)> {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut counts: Vec<(String, usize)> = Vec::new();

        for review in reviews {
            for token in tokenize(&review.text) {
                if self.stopwords.contains(&token) {
                    continue;
                }
                match index.get(&token) {
                    Some(&slot) => counts[slot].1 += 1,
                    None => {
                        index.insert(token.clone(), counts.len());
                        counts.push((token, 1));
                    }
                }
            }
        }

        counts
    }
}

/// Lowercase `text`, then split it into runs of word characters
/// (ASCII letters, digits, underscore).
///
/// Lowercasing happens on the whole string before splitting, so characters
/// whose lowercase form is ASCII (such as the Kelvin sign) join words.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !is_word_char(c))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Extract keywords with an optional stopword override.
///
/// `None` uses [`DEFAULT_STOPWORDS`].
#[allow(dead_code)] // Function form of `KeywordExtractor`; the CLI builds one from config
pub fn extract_keywords(
    reviews: &[Review],
    stopwords: Option<&HashSet<String>>,
    top_n: usize,
) -> Vec<KeywordStat> {
    let extractor = KeywordExtractor::default().with_top_n(top_n);
    let extractor = match stopwords {
        Some(words) => extractor.with_stopwords(words),
        None => extractor,
    };
    extractor.extract(reviews)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sentiment;

    fn review(text: &str) -> Review {
        Review::new(text, Sentiment::Positive)
    }

    fn stopwords(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_tokenize() {
        let tokens = tokenize("  Great phone!! Battery-life: 10/10, love_it ");
        assert_eq!(
            tokens,
            vec!["great", "phone", "battery", "life", "10", "10", "love_it"]
        );
    }

    #[test]
    fn test_tokenize_non_ascii_separates() {
        let tokens = tokenize("Café très bien");
        assert_eq!(tokens, vec!["caf", "tr", "s", "bien"]);
    }

    #[test]
    fn test_tokenize_lowercases_before_splitting() {
        // Kelvin sign lowercases to ASCII 'k'; dotted capital I expands to 'i' + U+0307
        assert_eq!(
            tokenize("\u{212A}ilo \u{0130}stanbul"),
            vec!["kilo", "i", "stanbul"]
        );

        let stats = extract_keywords(&[review("\u{212A}ilo kilo")], None, 7);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].word, "kilo");
        assert_eq!(stats[0].count, 2);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("?! ... --").is_empty());
    }

    #[test]
    fn test_extract_example_reviews() {
        let reviews = vec![
            review("The product is great and amazing"),
            review("great product amazing"),
        ];
        let stats = extract_keywords(&reviews, Some(&stopwords(&["the", "is", "and"])), 7);

        let words: Vec<(&str, usize)> = stats.iter().map(|s| (s.word.as_str(), s.count)).collect();
        assert_eq!(words, vec![("product", 2), ("great", 2), ("amazing", 2)]);
        for stat in &stats {
            assert_eq!(stat.percent, 33.3);
        }
        let sum: f64 = stats.iter().map(|s| s.percent).sum();
        assert!((sum - 100.0).abs() <= 0.15);
    }

    #[test]
    fn test_extract_ranks_by_count() {
        let reviews = vec![
            review("battery battery battery camera"),
            review("camera screen battery"),
        ];
        let stats = extract_keywords(&reviews, None, 7);

        assert_eq!(stats[0].word, "battery");
        assert_eq!(stats[0].count, 4);
        assert_eq!(stats[0].percent, 57.1);
        assert_eq!(stats[1].word, "camera");
        assert_eq!(stats[1].count, 2);
        assert_eq!(stats[1].percent, 28.6);
        assert_eq!(stats[2].word, "screen");
        assert_eq!(stats[2].percent, 14.3);
    }

    #[test]
    fn test_extract_caps_at_top_n() {
        let reviews = vec![review(
            "one two three four five six seven eight nine ten two three three",
        )];
        let stats = extract_keywords(&reviews, None, DEFAULT_TOP_N);

        assert_eq!(stats.len(), 7);
        assert!(stats.windows(2).all(|pair| pair[0].count >= pair[1].count));
        assert_eq!(stats[0].word, "three");
        assert_eq!(stats[1].word, "two");
        // remaining singletons keep first-seen order
        let rest: Vec<&str> = stats[2..].iter().map(|s| s.word.as_str()).collect();
        assert_eq!(rest, vec!["one", "four", "five", "six", "seven"]);
    }

    #[test]
    fn test_denominator_excludes_stopwords() {
        let reviews = vec![review("the the the the phone")];
        let stats = extract_keywords(&reviews, None, 7);

        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].word, "phone");
        assert_eq!(stats[0].percent, 100.0);
    }

    #[test]
    fn test_denominator_counts_words_past_the_cap() {
        let reviews = vec![review("a1 a2 a3 a4 a5 a6 a7 a8 a9 a10")];
        let stats = extract_keywords(&reviews, None, 7);

        assert_eq!(stats.len(), 7);
        assert!(stats.iter().all(|s| s.percent == 10.0));
    }

    #[test]
    fn test_extract_empty_inputs() {
        assert!(extract_keywords(&[], None, 7).is_empty());
        assert!(extract_keywords(&[review("The and is a")], None, 7).is_empty());
        assert!(extract_keywords(&[review("")], None, 7).is_empty());
    }

    #[test]
    fn test_counts_across_reviews_case_insensitive() {
        let reviews = vec![review("Camera"), review("CAMERA camera")];
        let stats = extract_keywords(&reviews, None, 7);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].count, 3);
    }

    #[test]
    fn test_custom_stopwords_are_lowercased() {
        let extractor = KeywordExtractor::default().with_stopwords(["Phone", "GOOD"]);
        let stats = extractor.extract(&[review("good phone, good price")]);

        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].word, "price");
    }

    #[test]
    fn test_override_replaces_default_set() {
        let stats = extract_keywords(&[review("the phone")], Some(&HashSet::new()), 7);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].word, "the");
    }

    #[test]
    fn test_extract_is_idempotent() {
        let reviews = vec![review("fast delivery, fast phone"), review("slow charger")];
        let extractor = KeywordExtractor::default();
        assert_eq!(extractor.extract(&reviews), extractor.extract(&reviews));
    }

    #[test]
    fn test_from_config() {
        let config = crate::config::KeywordsConfig {
            top_n: 2,
            stopwords: vec!["the".to_string()],
            extra_stopwords: vec!["phone".to_string()],
        };
        let extractor = KeywordExtractor::from(&config);

        assert_eq!(extractor.top_n(), 2);
        assert!(extractor.stopwords().contains("the"));
        assert!(extractor.stopwords().contains("phone"));
        assert!(!extractor.stopwords().contains("and"));
    }
}
