//! Loading labeled records from CSV.
//!
//! The expected input has a header row with at least `sentiment` and
//! `message` columns; `tweetid` is used as the record id when present.
//! Header names are matched case-insensitively after trimming.
//!
//! Loading happens in two steps: [`read_raw_records`] parses rows as-is,
//! [`prepare_records`] deduplicates, cleans, and derives the record fields.

use std::collections::{BTreeMap, HashSet};
use std::fs::File;

use camino::Utf8Path;
use serde::Serialize;

use crate::error::{IngestError, IngestResult};
use crate::record::{Record, Sentiment};
use crate::stats::SummaryStats;

pub use crate::analysis::polarity::sample_records;

/// One CSV row before cleaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based data row number.
    pub row: usize,
    /// Tweet id, or the row number when the column is absent.
    pub id: String,
    /// Untrimmed message text.
    pub message: String,
    /// Sentiment code as written in the file.
    pub sentiment: i64,
}

/// What [`prepare_records`] dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PrepareStats {
    /// Rows read.
    pub input_rows: usize,
    /// Rows dropped because their id was already seen.
    pub duplicates_removed: usize,
    /// Rows dropped because the message was blank.
    pub empty_removed: usize,
    /// Records kept.
    pub kept: usize,
}

/// Overview of a prepared record collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    /// Number of records.
    pub total_tweets: usize,
    /// Records per sentiment code.
    pub sentiment_distribution: BTreeMap<i8, usize>,
    /// Records per sentiment label.
    pub sentiment_label_distribution: BTreeMap<String, usize>,
    /// Mean message length in characters.
    pub average_text_length: Option<f64>,
    /// Mean words per message.
    pub average_word_count: Option<f64>,
}

/// Read and prepare records from a CSV file.
///
/// Files larger than `max_bytes` are rejected before reading.
#[tracing::instrument(skip_all, fields(path = %path))]
pub fn load_records(path: &Utf8Path, max_bytes: Option<usize>) -> IngestResult<Vec<Record>> {
    let raw = read_raw_records(path, max_bytes)?;
    tracing::info!(rows = raw.len(), "loaded raw records");
    let (records, stats) = prepare_records(raw)?;
    tracing::info!(
        kept = stats.kept,
        duplicates = stats.duplicates_removed,
        empty = stats.empty_removed,
        "prepared records"
    );
    Ok(records)
}

/// Parse CSV rows without cleaning them.
pub fn read_raw_records(path: &Utf8Path, max_bytes: Option<usize>) -> IngestResult<Vec<RawRecord>> {
    let io_err = |source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    };

    let metadata = std::fs::metadata(path.as_std_path()).map_err(io_err)?;
    if let Some(limit) = max_bytes
        && metadata.len() > limit as u64
    {
        return Err(IngestError::TooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit,
        });
    }

    let file = File::open(path.as_std_path()).map_err(io_err)?;
    read_raw_from(file).map_err(|e| match e {
        IngestError::Csv { source, .. } => IngestError::Csv {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

/// Parse CSV rows from any reader.
///
/// CSV errors carry an empty path; [`read_raw_records`] fills it in.
pub fn read_raw_from<R: std::io::Read>(reader: R) -> IngestResult<Vec<RawRecord>> {
    let csv_err = |source| IngestError::Csv {
        path: Default::default(),
        source,
    };

    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers: Vec<String> = rdr
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();
    let column = |name: &str| headers.iter().position(|h| h == name);

    let sentiment_col = column("sentiment").ok_or(IngestError::MissingColumn("sentiment"))?;
    let message_col = column("message").ok_or(IngestError::MissingColumn("message"))?;
    let id_col = column("tweetid");

    let mut rows = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let row = i + 1;
        let record = result.map_err(csv_err)?;
        let raw_sentiment = record.get(sentiment_col).unwrap_or("").trim();
        let sentiment = raw_sentiment
            .parse::<i64>()
            .map_err(|_| IngestError::InvalidSentiment {
                row,
                value: raw_sentiment.to_string(),
            })?;
        let id = id_col
            .and_then(|c| record.get(c))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map_or_else(|| row.to_string(), str::to_string);

        rows.push(RawRecord {
            row,
            id,
            message: record.get(message_col).unwrap_or("").to_string(),
            sentiment,
        });
    }
    Ok(rows)
}

/// Deduplicate by id, trim messages, drop blank ones, and derive fields.
///
/// The first row with a given id wins. Unknown sentiment codes are an error.
pub fn prepare_records(raw: Vec<RawRecord>) -> IngestResult<(Vec<Record>, PrepareStats)> {
    let mut stats = PrepareStats {
        input_rows: raw.len(),
        ..PrepareStats::default()
    };
    let mut seen: HashSet<String> = HashSet::with_capacity(raw.len());
    let mut records = Vec::with_capacity(raw.len());

    for r in raw {
        if !seen.insert(r.id.clone()) {
            stats.duplicates_removed += 1;
            continue;
        }
        let sentiment = i8::try_from(r.sentiment)
            .ok()
            .and_then(Sentiment::from_code)
            .ok_or(IngestError::UnknownSentiment {
                row: r.row,
                code: r.sentiment,
            })?;
        let message = r.message.trim();
        if message.is_empty() {
            stats.empty_removed += 1;
            continue;
        }
        records.push(Record::new(r.id, message, sentiment));
    }

    stats.kept = records.len();
    Ok((records, stats))
}

/// Summarize a record collection.
pub fn summarize(records: &[Record]) -> DatasetSummary {
    let mut sentiment_distribution = BTreeMap::new();
    let mut sentiment_label_distribution = BTreeMap::new();
    for r in records {
        *sentiment_distribution.entry(r.sentiment.code()).or_insert(0) += 1;
        *sentiment_label_distribution
            .entry(r.sentiment_label.clone())
            .or_insert(0) += 1;
    }

    DatasetSummary {
        total_tweets: records.len(),
        sentiment_distribution,
        sentiment_label_distribution,
        average_text_length: SummaryStats::from_counts(records.iter().map(|r| r.text_length))
            .map(|s| s.mean),
        average_word_count: SummaryStats::from_counts(records.iter().map(|r| r.word_count))
            .map(|s| s.mean),
    }
}

/// Records of one sentiment class, in input order.
pub fn filter_by_sentiment(records: &[Record], sentiment: Sentiment) -> Vec<&Record> {
    let filtered: Vec<&Record> = records.iter().filter(|r| r.sentiment == sentiment).collect();
    tracing::debug!(count = filtered.len(), %sentiment, "filtered records");
    filtered
}
