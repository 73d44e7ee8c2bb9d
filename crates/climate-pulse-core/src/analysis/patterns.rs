//! Text shape statistics and structural markers.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use aho_corasick::AhoCorasick;

use crate::error::{AnalysisError, AnalysisResult};
use crate::record::{self, Record, Sentiment};
use crate::stats::SummaryStats;

use super::reports::{ClassPatterns, CommonPatterns, TextPatterns};

/// Marker substrings, in [`CommonPatterns`] field order.
const MARKERS: [&str; 4] = ["RT @", "@", "#", "http"];

static MARKER_MATCHER: LazyLock<AhoCorasick> = LazyLock::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(MARKERS)
        .expect("valid marker patterns")
});

/// Length and word count statistics, globally and per class, plus marker counts.
///
/// Stale `text_length` or `word_count` values are a validation error.
#[tracing::instrument(skip_all, fields(records = records.len()))]
pub fn analyze_text_patterns(records: &[Record]) -> AnalysisResult<TextPatterns> {
    record::validate_all(records)?;
    let lengths = SummaryStats::from_counts(records.iter().map(|r| r.text_length))
        .ok_or(AnalysisError::EmptyInput)?;
    let words = SummaryStats::from_counts(records.iter().map(|r| r.word_count))
        .ok_or(AnalysisError::EmptyInput)?;

    let patterns_by_sentiment: BTreeMap<i8, ClassPatterns> = Sentiment::ALL
        .into_iter()
        .map(|class| (class.code(), class_patterns(records, class)))
        .collect();

    Ok(TextPatterns {
        text_length_stats: lengths.into(),
        word_count_stats: words.into(),
        patterns_by_sentiment,
        common_patterns: count_markers(records),
    })
}

fn class_patterns(records: &[Record], class: Sentiment) -> ClassPatterns {
    let members: Vec<&Record> = records.iter().filter(|r| r.sentiment == class).collect();
    let text_length = SummaryStats::from_counts(members.iter().map(|r| r.text_length));
    let word_count = SummaryStats::from_counts(members.iter().map(|r| r.word_count));
    ClassPatterns {
        count: members.len(),
        avg_length: text_length.map(|s| s.mean),
        avg_words: word_count.map(|s| s.mean),
        text_length,
        word_count,
    }
}

/// Count records containing each marker, once per record.
pub fn count_markers(records: &[Record]) -> CommonPatterns {
    let mut counts = CommonPatterns::default();
    for r in records {
        let mut seen = [false; MARKERS.len()];
        for m in MARKER_MATCHER.find_overlapping_iter(&r.message) {
            seen[m.pattern().as_usize()] = true;
        }
        counts.retweets += usize::from(seen[0]);
        counts.mentions += usize::from(seen[1]);
        counts.hashtags += usize::from(seen[2]);
        counts.urls += usize::from(seen[3]);
    }
    counts
}
