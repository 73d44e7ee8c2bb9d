//! Report structs for the insight pipeline.
//!
//! Field names are the external JSON shape consumed by downstream
//! renderers. Maps keyed by sentiment code serialize with string keys
//! ("-1", "0", "1", "2") in ascending code order.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::stats::SummaryStats;
use crate::text::FrequencyTable;

/// Complete report for one record collection.
#[derive(Debug, Clone, Serialize)]
pub struct InsightReport {
    /// Size and provenance of the dataset.
    pub dataset_overview: DatasetOverview,
    /// Headline numbers.
    pub key_findings: KeyFindings,
    /// Full output of every stage.
    pub detailed_analysis: DetailedAnalysis,
    /// Rule-generated suggestions, in rule order.
    pub recommendations: Vec<String>,
}

/// Dataset size and descriptive labels.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetOverview {
    /// Number of records analyzed.
    pub total_tweets: usize,
    /// Period the dataset covers.
    pub date_range: String,
    /// Subject of the dataset.
    pub topic: String,
}

/// Headline findings.
#[derive(Debug, Clone, Serialize)]
pub struct KeyFindings {
    /// Label of the most frequent sentiment class.
    pub dominant_sentiment: String,
    /// Pro / anti / neutral totals.
    pub sentiment_balance: SentimentBalance,
    /// Top five global themes as `[token, count]`.
    pub most_common_themes: Vec<(String, usize)>,
    /// Mean message length in characters, one decimal.
    pub average_tweet_length: f64,
}

/// Every stage's output.
#[derive(Debug, Clone, Serialize)]
pub struct DetailedAnalysis {
    /// Class counts and percentages.
    pub sentiment_distribution: SentimentDistribution,
    /// Global and per-class vocabulary.
    pub theme_analysis: ThemeAnalysis,
    /// Length statistics and structural markers.
    pub text_patterns: TextPatterns,
    /// Lexical polarity over a sample.
    pub advanced_sentiment: AdvancedSentiment,
}

// -- Distribution -------------------------------------------------------------

/// Sentiment class distribution.
#[derive(Debug, Clone, Serialize)]
pub struct SentimentDistribution {
    /// Number of records.
    pub total_tweets: usize,
    /// Records per sentiment code (codes with no records are omitted).
    pub sentiment_counts: BTreeMap<i8, usize>,
    /// Records per sentiment label.
    pub sentiment_label_counts: BTreeMap<String, usize>,
    /// Percentage of records per code, two decimals.
    pub sentiment_percentages: BTreeMap<i8, f64>,
    /// Code with the highest count (lowest code on ties).
    pub dominant_sentiment: i8,
    /// Label of `dominant_sentiment`.
    pub dominant_sentiment_label: String,
    /// Pro / anti / neutral totals.
    pub sentiment_balance: SentimentBalance,
}

/// Records grouped by stance on climate change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SentimentBalance {
    /// Pro plus News records.
    pub pro_climate: usize,
    /// Anti records.
    pub anti_climate: usize,
    /// Neutral records.
    pub neutral: usize,
}

// -- Themes -------------------------------------------------------------------

/// Vocabulary and theme extraction.
#[derive(Debug, Clone, Serialize)]
pub struct ThemeAnalysis {
    /// Most frequent tokens overall as `[token, count]`.
    pub top_themes: Vec<(String, usize)>,
    /// Distinct tokens overall.
    pub total_unique_words: usize,
    /// Top ten tokens per sentiment code.
    pub theme_by_sentiment: BTreeMap<i8, FrequencyTable>,
    /// Global tokens containing a climate keyword, with their counts.
    pub climate_related_words: FrequencyTable,
}

// -- Text patterns ------------------------------------------------------------

/// Length statistics and structural marker counts.
#[derive(Debug, Clone, Serialize)]
pub struct TextPatterns {
    /// Message length in characters.
    pub text_length_stats: LengthStats,
    /// Message length in words.
    pub word_count_stats: WordCountStats,
    /// Per-class statistics keyed by sentiment code.
    pub patterns_by_sentiment: BTreeMap<i8, ClassPatterns>,
    /// Records carrying retweet, mention, hashtag and URL markers.
    pub common_patterns: CommonPatterns,
}

/// Character length statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LengthStats {
    /// Mean length.
    pub mean_length: f64,
    /// Median length.
    pub median_length: f64,
    /// Shortest message.
    pub min_length: f64,
    /// Longest message.
    pub max_length: f64,
    /// Population standard deviation.
    pub std_length: f64,
}

impl From<SummaryStats> for LengthStats {
    fn from(s: SummaryStats) -> Self {
        Self {
            mean_length: s.mean,
            median_length: s.median,
            min_length: s.min,
            max_length: s.max,
            std_length: s.std,
        }
    }
}

/// Word count statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WordCountStats {
    /// Mean word count.
    pub mean_words: f64,
    /// Median word count.
    pub median_words: f64,
    /// Fewest words.
    pub min_words: f64,
    /// Most words.
    pub max_words: f64,
    /// Population standard deviation.
    pub std_words: f64,
}

impl From<SummaryStats> for WordCountStats {
    fn from(s: SummaryStats) -> Self {
        Self {
            mean_words: s.mean,
            median_words: s.median,
            min_words: s.min,
            max_words: s.max,
            std_words: s.std,
        }
    }
}

/// Statistics for one sentiment class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassPatterns {
    /// Records in the class.
    pub count: usize,
    /// Mean length in characters; `null` for an empty class.
    pub avg_length: Option<f64>,
    /// Mean word count; `null` for an empty class.
    pub avg_words: Option<f64>,
    /// Full length statistics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_length: Option<SummaryStats>,
    /// Full word count statistics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<SummaryStats>,
}

/// Records containing each structural marker (counted once per record).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CommonPatterns {
    /// Messages containing "RT @".
    pub retweets: usize,
    /// Messages containing "@".
    pub mentions: usize,
    /// Messages containing "#".
    pub hashtags: usize,
    /// Messages containing "http".
    pub urls: usize,
}

// -- Advanced sentiment -------------------------------------------------------

/// Lexical polarity aggregated over a deterministic sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvancedSentiment {
    /// Polarity statistics.
    pub polarity: SummaryStats,
    /// Subjectivity statistics.
    pub subjectivity: SummaryStats,
    /// Records actually scored.
    pub sample_size: usize,
    /// Messages the scorer rejected (counted as neutral).
    pub scoring_failures: usize,
}
