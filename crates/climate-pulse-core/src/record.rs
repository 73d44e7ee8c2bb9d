//! Labeled post records.
//!
//! A [`Record`] is one social post with its sentiment class and a few
//! derived text-shape fields. Records are built once by the ingestion layer
//! and only ever read by the analysis stages.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};

/// Sentiment class attached to a record.
///
/// Serialized as its numeric code (-1, 0, 1, 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Sentiment {
    /// Does not believe in man-made climate change.
    Anti,
    /// Neither supports nor refutes.
    Neutral,
    /// Supports the belief of man-made climate change.
    Pro,
    /// Links to factual news about climate change.
    News,
}

impl Sentiment {
    /// Every class, in ascending code order.
    pub const ALL: [Self; 4] = [Self::Anti, Self::Neutral, Self::Pro, Self::News];

    /// Numeric code used by the source dataset.
    pub const fn code(self) -> i8 {
        match self {
            Self::Anti => -1,
            Self::Neutral => 0,
            Self::Pro => 1,
            Self::News => 2,
        }
    }

    /// Look up a class by numeric code.
    pub const fn from_code(code: i8) -> Option<Self> {
        match code {
            -1 => Some(Self::Anti),
            0 => Some(Self::Neutral),
            1 => Some(Self::Pro),
            2 => Some(Self::News),
            _ => None,
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Anti => "Anti",
            Self::Neutral => "Neutral",
            Self::Pro => "Pro",
            Self::News => "News",
        }
    }

    /// Collapse the class to positive / negative / neutral.
    pub const fn binary(self) -> BinarySentiment {
        match self.code() {
            c if c > 0 => BinarySentiment::Positive,
            c if c < 0 => BinarySentiment::Negative,
            _ => BinarySentiment::Neutral,
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<i8> for Sentiment {
    type Error = String;

    fn try_from(code: i8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("unknown sentiment code {code}"))
    }
}

impl From<Sentiment> for i8 {
    fn from(s: Sentiment) -> Self {
        s.code()
    }
}

/// Three-way collapse of [`Sentiment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinarySentiment {
    /// Pro or News.
    Positive,
    /// Anti.
    Negative,
    /// Neutral.
    Neutral,
}

/// One labeled post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Source identifier (tweet id or row number).
    pub id: String,
    /// Post text.
    pub message: String,
    /// Sentiment class.
    pub sentiment: Sentiment,
    /// Label for `sentiment`.
    pub sentiment_label: String,
    /// Length of `message` in characters.
    pub text_length: usize,
    /// Whitespace-separated words in `message`.
    pub word_count: usize,
    /// Collapsed sentiment.
    pub binary_sentiment: BinarySentiment,
}

impl Record {
    /// Build a record, deriving label, length, word count and binary class.
    pub fn new(id: impl Into<String>, message: impl Into<String>, sentiment: Sentiment) -> Self {
        let message = message.into();
        Self {
            id: id.into(),
            text_length: message.chars().count(),
            word_count: message.split_whitespace().count(),
            sentiment,
            sentiment_label: sentiment.label().to_string(),
            binary_sentiment: sentiment.binary(),
            message,
        }
    }

    /// Check the derived fields against the message and class.
    pub fn validate(&self) -> AnalysisResult<()> {
        let fail = |reason: String| AnalysisError::Validation {
            id: self.id.clone(),
            reason,
        };

        if self.sentiment_label != self.sentiment.label() {
            return Err(fail(format!(
                "label `{}` does not match sentiment {}",
                self.sentiment_label,
                self.sentiment.code()
            )));
        }
        let chars = self.message.chars().count();
        if self.text_length != chars {
            return Err(fail(format!(
                "text_length {} but message has {chars} characters",
                self.text_length
            )));
        }
        if self.word_count == 0 && !self.message.trim().is_empty() {
            return Err(fail("word_count is 0 for a non-empty message".to_string()));
        }
        if self.binary_sentiment != self.sentiment.binary() {
            return Err(fail(format!(
                "binary_sentiment {:?} does not match sentiment {}",
                self.binary_sentiment,
                self.sentiment.code()
            )));
        }
        Ok(())
    }
}

/// Validate every record, failing on the first bad one.
pub fn validate_all(records: &[Record]) -> AnalysisResult<()> {
    records.iter().try_for_each(Record::validate)
}
