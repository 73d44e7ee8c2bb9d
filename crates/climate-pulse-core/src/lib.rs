//! Core library for climate-pulse.
//!
//! Sentiment and theme analysis over labeled social media posts. Given a
//! collection of [`Record`]s, [`InsightAnalyzer`] produces an
//! [`InsightReport`]: class distribution, vocabulary themes, text shape
//! statistics, lexical polarity over a deterministic sample, and a short
//! list of rule-based recommendations.
//!
//! # Modules
//!
//! - [`analysis`] - Report stages and the report assembler
//! - [`config`] - Configuration loading and management
//! - [`diagnostics`] - Non-fatal event reporting
//! - [`error`] - Error types and result aliases
//! - [`ingest`] - CSV loading and record preparation
//! - [`record`] - Input record and sentiment classes
//! - [`scoring`] - Polarity scorers
//! - [`stats`] - Summary statistics
//! - [`text`] - Tokenizer and frequency tables
//! - [`vocab`] - Stopword and climate keyword lists
//!
//! # Quick Start
//!
//! ```no_run
//! use climate_pulse_core::{InsightAnalyzer, LexiconScorer, ingest};
//!
//! let records = ingest::load_records(camino::Utf8Path::new("tweets.csv"), None).unwrap();
//! let report = InsightAnalyzer::new(&LexiconScorer)
//!     .generate_insights_report(&records)
//!     .unwrap();
//!
//! println!("{}", report.key_findings.dominant_sentiment);
//! ```
#![deny(unsafe_code)]

pub mod analysis;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod ingest;
pub mod record;
pub mod scoring;
pub mod stats;
pub mod text;
pub mod vocab;

pub use analysis::{
    InsightAnalyzer, InsightReport, ReportOptions, SamplingOptions, generate_insights_report,
};
pub use config::{Config, ConfigLoader, ConfigSources, DEFAULT_MAX_INPUT_BYTES, LogLevel};
pub use diagnostics::{DiagnosticEvent, DiagnosticsSink, MemorySink, TracingSink};
pub use error::{
    AnalysisError, AnalysisResult, ConfigError, ConfigResult, IngestError, IngestResult,
    ScoringError,
};
pub use record::{BinarySentiment, Record, Sentiment};
pub use scoring::{LexiconScorer, PolarityScore, PolarityScorer};
pub use text::{FrequencyTable, tokenize};
pub use vocab::Vocabulary;
