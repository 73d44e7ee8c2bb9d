//! Error types for climate-pulse-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that abort an analysis run.
///
/// Any of these surfaces to the caller unchanged; no partial report is
/// produced.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The record collection has no entries.
    #[error("no records to analyze")]
    EmptyInput,

    /// A record violates the input contract.
    #[error("invalid record {id}: {reason}")]
    Validation {
        /// Identifier of the offending record.
        id: String,
        /// Which invariant failed.
        reason: String,
    },

    /// An unexpected failure inside an analysis stage.
    #[error("analysis failed: {0}")]
    Computation(String),
}

/// Result type alias using [`AnalysisError`].
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// A polarity scorer could not score one message.
///
/// Never fatal: the sampler substitutes a neutral score and keeps going.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    /// The message has no scorable content.
    #[error("message has no scorable text")]
    EmptyText,

    /// The scorer backend failed.
    #[error("scorer failed: {0}")]
    Backend(String),

    /// The scorer returned NaN or an infinite component.
    #[error("scorer returned a non-finite score")]
    NonFinite,
}

/// Errors raised while loading records from disk.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The input file could not be read.
    #[error("failed to read {path}")]
    Io {
        /// File that failed.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The input file exceeds the configured size limit.
    #[error("input too large: {path} is {size} bytes (limit: {limit} bytes)")]
    TooLarge {
        /// File that was rejected.
        path: Utf8PathBuf,
        /// Actual size in bytes.
        size: u64,
        /// Configured limit in bytes.
        limit: usize,
    },

    /// The CSV data could not be parsed.
    #[error("malformed CSV in {path}")]
    Csv {
        /// File that failed.
        path: Utf8PathBuf,
        /// Underlying parser error.
        #[source]
        source: csv::Error,
    },

    /// A required column is absent from the header row.
    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),

    /// A row carries a sentiment code outside {-1, 0, 1, 2}.
    #[error("row {row}: unknown sentiment code {code}")]
    UnknownSentiment {
        /// 1-based data row number.
        row: usize,
        /// The code found.
        code: i64,
    },

    /// A sentiment cell is not an integer.
    #[error("row {row}: sentiment `{value}` is not an integer")]
    InvalidSentiment {
        /// 1-based data row number.
        row: usize,
        /// Raw cell contents.
        value: String,
    },
}

/// Result type alias using [`IngestError`].
pub type IngestResult<T> = Result<T, IngestError>;
