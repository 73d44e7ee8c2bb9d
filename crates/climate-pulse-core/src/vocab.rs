//! Word lists used by theme extraction.
//!
//! The defaults cover English function words, pronouns, link/retweet
//! boilerplate, and a set of climate-domain keyword stems. Both lists can be
//! replaced through [`Vocabulary::new`] or configuration.

use std::collections::HashSet;

use aho_corasick::AhoCorasick;

use crate::error::{AnalysisError, AnalysisResult};

/// Words excluded from frequency analysis.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
    "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will", "would",
    "could", "should", "may", "might", "can", "this", "that", "these", "those", "i", "you", "he",
    "she", "it", "we", "they", "me", "him", "her", "us", "them", "my", "your", "his", "its", "our",
    "their", "mine", "yours", "hers", "ours", "theirs", "rt", "via", "http", "https", "com", "www",
    "co", "amp",
];

/// Substrings that mark a token as climate-related.
pub const DEFAULT_CLIMATE_KEYWORDS: &[&str] = &[
    "climate",
    "change",
    "global",
    "warming",
    "emission",
    "carbon",
    "temperature",
    "weather",
    "environment",
    "greenhouse",
    "pollution",
    "renewable",
    "energy",
    "solar",
    "wind",
    "fossil",
    "fuel",
    "sustainability",
    "eco",
    "green",
    "earth",
    "planet",
    "ocean",
    "ice",
    "melting",
    "sea",
    "level",
    "drought",
    "flood",
    "storm",
];

/// Stopwords plus the domain keyword matcher.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    stopwords: HashSet<String>,
    climate_keywords: Vec<String>,
    matcher: AhoCorasick,
}

impl Vocabulary {
    /// Build a vocabulary from explicit word lists.
    ///
    /// Stopwords and keywords are lowercased. Keyword matching is a
    /// case-insensitive substring test.
    pub fn new<S, K>(stopwords: S, climate_keywords: K) -> AnalysisResult<Self>
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
        K: IntoIterator,
        K::Item: AsRef<str>,
    {
        let stopwords = stopwords
            .into_iter()
            .map(|w| w.as_ref().to_lowercase())
            .collect();
        let climate_keywords: Vec<String> = climate_keywords
            .into_iter()
            .map(|k| k.as_ref().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&climate_keywords)
            .map_err(|e| AnalysisError::Computation(format!("keyword matcher: {e}")))?;

        Ok(Self {
            stopwords,
            climate_keywords,
            matcher,
        })
    }

    /// Whether `word` is a stopword. Expects a lowercase word.
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// Whether any climate keyword occurs inside `token`.
    pub fn is_climate_related(&self, token: &str) -> bool {
        self.matcher.is_match(token)
    }

    /// The configured keyword list.
    pub fn climate_keywords(&self) -> &[String] {
        &self.climate_keywords
    }

    /// Number of configured stopwords.
    pub fn stopword_count(&self) -> usize {
        self.stopwords.len()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_STOPWORDS, DEFAULT_CLIMATE_KEYWORDS)
            .expect("default keyword list builds")
    }
}
