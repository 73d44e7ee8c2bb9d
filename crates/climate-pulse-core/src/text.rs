//! Tokenization and word frequency counting.
//!
//! [`tokenize`] normalizes free text into theme tokens; [`FrequencyTable`]
//! counts them while remembering the order each token was first seen, which
//! is what breaks ties when ranking.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::vocab::Vocabulary;

/// Anything that is not a letter, digit or whitespace.
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}\s]").expect("valid regex"));

/// Shortest token kept, in characters.
const MIN_TOKEN_CHARS: usize = 3;

/// Split text into theme tokens.
///
/// Lowercases, replaces punctuation with spaces, splits on whitespace, and
/// drops tokens shorter than three characters or listed as stopwords.
pub fn tokenize(text: &str, vocab: &Vocabulary) -> Vec<String> {
    let lowered = text.to_lowercase();
    let cleaned = NON_WORD.replace_all(&lowered, " ");
    cleaned
        .split_whitespace()
        .filter(|w| w.chars().count() >= MIN_TOKEN_CHARS && !vocab.is_stopword(w))
        .map(str::to_string)
        .collect()
}

/// Token counts in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the tokens of `text`.
    pub fn from_text(text: &str, vocab: &Vocabulary) -> Self {
        let mut table = Self::new();
        table.add_text(text, vocab);
        table
    }

    /// Count the tokens of `text` into this table.
    pub fn add_text(&mut self, text: &str, vocab: &Vocabulary) {
        for token in tokenize(text, vocab) {
            self.add(token);
        }
    }

    /// Increment the count for one token.
    pub fn add(&mut self, token: String) {
        if let Some(&pos) = self.index.get(&token) {
            self.entries[pos].1 += 1;
        } else {
            self.index.insert(token.clone(), self.entries.len());
            self.entries.push((token, 1));
        }
    }

    /// Count for `token`, zero if absent.
    pub fn get(&self, token: &str) -> usize {
        self.index.get(token).map_or(0, |&pos| self.entries[pos].1)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no tokens were counted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// Iterate `(token, count)` in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(t, c)| (t.as_str(), *c))
    }

    /// Tokens in table order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(t, _)| t.as_str())
    }

    /// The `n` most frequent tokens, highest count first.
    ///
    /// Equal counts keep first-seen order; the sort is stable and never
    /// falls back to alphabetical order.
    pub fn most_common(&self, n: usize) -> Vec<(String, usize)> {
        let mut ranked: Vec<&(String, usize)> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.into_iter().take(n).cloned().collect()
    }

    /// A new table holding only the `n` most frequent tokens, ranked.
    pub fn top(&self, n: usize) -> Self {
        self.most_common(n).into_iter().collect()
    }

    /// A new table holding the tokens that satisfy `keep`, in table order.
    pub fn filter(&self, mut keep: impl FnMut(&str) -> bool) -> Self {
        self.entries
            .iter()
            .filter(|(t, _)| keep(t))
            .cloned()
            .collect()
    }
}

impl FromIterator<(String, usize)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (String, usize)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (token, count) in iter {
            if let Some(&pos) = table.index.get(&token) {
                table.entries[pos].1 += count;
            } else {
                table.index.insert(token.clone(), table.entries.len());
                table.entries.push((token, count));
            }
        }
        table
    }
}

impl Serialize for FrequencyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (token, count) in &self.entries {
            map.serialize_entry(token, count)?;
        }
        map.end()
    }
}
