//! Sentiment class distribution.

use std::collections::BTreeMap;

use crate::error::{AnalysisError, AnalysisResult};
use crate::record::{self, Record, Sentiment};
use crate::stats::round_to;

use super::reports::{SentimentBalance, SentimentDistribution};

/// Count records per sentiment class and derive the stance balance.
///
/// The dominant class is the one with the most records; on a tie the
/// lowest code wins. Records whose label disagrees with their class are
/// rejected.
#[tracing::instrument(skip_all, fields(records = records.len()))]
pub fn analyze_sentiment_distribution(records: &[Record]) -> AnalysisResult<SentimentDistribution> {
    if records.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }
    record::validate_all(records)?;

    let mut by_class: BTreeMap<Sentiment, usize> = BTreeMap::new();
    let mut sentiment_label_counts: BTreeMap<String, usize> = BTreeMap::new();
    for r in records {
        *by_class.entry(r.sentiment).or_insert(0) += 1;
        *sentiment_label_counts
            .entry(r.sentiment_label.clone())
            .or_insert(0) += 1;
    }

    let total = records.len();
    let mut dominant: Option<(Sentiment, usize)> = None;
    for (&class, &count) in &by_class {
        if dominant.is_none_or(|(_, best)| count > best) {
            dominant = Some((class, count));
        }
    }
    let (dominant, _) = dominant
        .ok_or_else(|| AnalysisError::Computation("no sentiment classes counted".to_string()))?;

    let count = |s: Sentiment| by_class.get(&s).copied().unwrap_or(0);
    let sentiment_balance = SentimentBalance {
        pro_climate: count(Sentiment::Pro) + count(Sentiment::News),
        anti_climate: count(Sentiment::Anti),
        neutral: count(Sentiment::Neutral),
    };

    let sentiment_percentages = by_class
        .iter()
        .map(|(s, &c)| (s.code(), round_to(c as f64 / total as f64 * 100.0, 2)))
        .collect();
    let sentiment_counts = by_class.iter().map(|(s, &c)| (s.code(), c)).collect();

    Ok(SentimentDistribution {
        total_tweets: total,
        sentiment_counts,
        sentiment_label_counts,
        sentiment_percentages,
        dominant_sentiment: dominant.code(),
        dominant_sentiment_label: dominant.label().to_string(),
        sentiment_balance,
    })
}
