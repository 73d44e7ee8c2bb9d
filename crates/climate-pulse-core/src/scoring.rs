//! Lexical polarity scoring.
//!
//! The sampler only depends on the [`PolarityScorer`] trait. [`LexiconScorer`]
//! is a small word-list implementation good enough for a second opinion on
//! the labeled classes; swap in anything better through the trait.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::error::ScoringError;

/// Polarity and subjectivity of one message.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolarityScore {
    /// Negative to positive, in [-1, 1].
    pub polarity: f64,
    /// Factual to opinionated, in [0, 1].
    pub subjectivity: f64,
}

impl PolarityScore {
    /// Neutral, factual score used when a message cannot be scored.
    pub const NEUTRAL: Self = Self {
        polarity: 0.0,
        subjectivity: 0.0,
    };

    /// Clamp both components into their valid ranges.
    pub fn clamped(self) -> Self {
        Self {
            polarity: self.polarity.clamp(-1.0, 1.0),
            subjectivity: self.subjectivity.clamp(0.0, 1.0),
        }
    }

    /// Clamp a finite score, or reject one with a NaN or infinite component.
    pub fn validated(self) -> Result<Self, ScoringError> {
        if self.polarity.is_finite() && self.subjectivity.is_finite() {
            Ok(self.clamped())
        } else {
            Err(ScoringError::NonFinite)
        }
    }
}

/// Scores the polarity of a piece of text.
pub trait PolarityScorer {
    /// Score `text`.
    fn score(&self, text: &str) -> Result<PolarityScore, ScoringError>;
}

impl<F> PolarityScorer for F
where
    F: Fn(&str) -> Result<PolarityScore, ScoringError>,
{
    fn score(&self, text: &str) -> Result<PolarityScore, ScoringError> {
        self(text)
    }
}

static POSITIVE_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "good", "great", "excellent", "wonderful", "fantastic", "amazing", "awesome", "love",
        "happy", "hope", "hopeful", "positive", "benefit", "success", "win", "progress", "clean",
        "safe", "save", "protect", "support", "right", "important", "best", "better", "beautiful",
        "brilliant", "proud", "glad", "excited", "inspiring", "agree", "true", "thank", "thanks",
    ]
    .into_iter()
    .collect()
});

static NEGATIVE_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "bad", "terrible", "awful", "horrible", "worst", "worse", "hate", "angry", "sad", "fear",
        "scary", "dangerous", "threat", "crisis", "disaster", "catastrophe", "catastrophic",
        "destroy", "destroying", "dead", "death", "kill", "killing", "fail", "failure", "wrong",
        "stupid", "fake", "hoax", "scam", "lie", "lies", "liar", "false", "denial", "problem",
    ]
    .into_iter()
    .collect()
});

/// Opinion markers that raise subjectivity without moving polarity.
static SUBJECTIVE_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "think", "believe", "feel", "seems", "probably", "maybe", "really", "very", "totally",
        "absolutely", "honestly", "obviously", "clearly", "should", "must", "never", "always",
    ]
    .into_iter()
    .collect()
});

static INTENSIFIERS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "very",
        "extremely",
        "absolutely",
        "really",
        "incredibly",
        "highly",
        "totally",
        "so",
    ]
    .into_iter()
    .collect()
});

static NEGATIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "not", "no", "never", "nothing", "nobody", "neither", "nor", "none", "isn't", "don't",
        "doesn't", "can't", "won't", "aren't",
    ]
    .into_iter()
    .collect()
});

/// Word-list scorer with negation and intensifier handling.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    /// Create a scorer with the built-in word lists.
    pub const fn new() -> Self {
        Self
    }
}

impl PolarityScorer for LexiconScorer {
    fn score(&self, text: &str) -> Result<PolarityScore, ScoringError> {
        let words: Vec<String> = text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|w| !w.is_empty())
            .map(String::from)
            .collect();
        if words.is_empty() {
            return Err(ScoringError::EmptyText);
        }

        let mut positive = 0.0_f64;
        let mut negative = 0.0_f64;
        let mut opinion_hits = 0usize;

        for (i, word) in words.iter().enumerate() {
            let prev = |back: usize| i.checked_sub(back).map(|j| words[j].as_str());
            let multiplier: f64 = if prev(1).is_some_and(|w| INTENSIFIERS.contains(w)) {
                1.5
            } else {
                1.0
            };
            let negated = prev(1).is_some_and(|w| NEGATIONS.contains(w))
                || prev(2).is_some_and(|w| NEGATIONS.contains(w));

            let w = word.as_str();
            let weight = if POSITIVE_WORDS.contains(w) {
                multiplier
            } else if NEGATIVE_WORDS.contains(w) {
                -multiplier
            } else {
                if SUBJECTIVE_WORDS.contains(w) {
                    opinion_hits += 1;
                }
                continue;
            };
            opinion_hits += 1;

            match (weight > 0.0, negated) {
                (true, false) | (false, true) => positive += weight.abs(),
                (true, true) | (false, false) => negative += weight.abs(),
            }
        }

        let total = positive + negative;
        let polarity = if total == 0.0 {
            0.0
        } else {
            (positive - negative) / total
        };
        let subjectivity = opinion_hits as f64 / words.len() as f64;

        PolarityScore {
            polarity,
            subjectivity,
        }
        .validated()
    }
}
