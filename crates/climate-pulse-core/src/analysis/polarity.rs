//! Lexical polarity over a deterministic sample.
//!
//! Scoring every record of a large dataset is wasteful for a secondary
//! estimate, so the sampler scores at most [`SamplingOptions::sample_size`]
//! records chosen by a seeded RNG. Identical input and seed always select
//! the same records.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;

use crate::diagnostics::{DiagnosticEvent, DiagnosticsSink};
use crate::error::{AnalysisError, AnalysisResult};
use crate::record::Record;
use crate::scoring::{PolarityScore, PolarityScorer};
use crate::stats::SummaryStats;

use super::reports::AdvancedSentiment;

/// Default upper bound on scored records.
pub const DEFAULT_SAMPLE_SIZE: usize = 5000;

/// Default sampling seed.
pub const DEFAULT_SEED: u64 = 42;

/// How the polarity sample is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingOptions {
    /// Maximum records to score (at least one is always scored).
    pub sample_size: usize,
    /// RNG seed.
    pub seed: u64,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            seed: DEFAULT_SEED,
        }
    }
}

/// Pick up to `n` records with an RNG seeded by `seed`.
///
/// Returns records in draw order. The same `records`, `n` and `seed` always
/// produce the same selection.
pub fn sample_records(records: &[Record], n: usize, seed: u64) -> Vec<&Record> {
    let amount = n.min(records.len());
    let mut rng = StdRng::seed_from_u64(seed);
    index::sample(&mut rng, records.len(), amount)
        .into_iter()
        .map(|i| &records[i])
        .collect()
}

/// Score a sample of messages and summarize polarity and subjectivity.
///
/// A message the scorer rejects, or scores with NaN or infinity, counts as
/// polarity 0, subjectivity 0. The failure is reported to `sink` and the run
/// continues.
#[tracing::instrument(skip_all, fields(records = records.len(), sample_size = options.sample_size, seed = options.seed))]
pub fn perform_advanced_sentiment_analysis(
    records: &[Record],
    scorer: &dyn PolarityScorer,
    options: &SamplingOptions,
    sink: &dyn DiagnosticsSink,
) -> AnalysisResult<AdvancedSentiment> {
    if records.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let sample = sample_records(records, options.sample_size.max(1), options.seed);

    let mut polarities = Vec::with_capacity(sample.len());
    let mut subjectivities = Vec::with_capacity(sample.len());
    let mut scoring_failures = 0;

    for record in &sample {
        let score = match scorer.score(&record.message).and_then(PolarityScore::validated) {
            Ok(score) => score,
            Err(e) => {
                scoring_failures += 1;
                sink.record(DiagnosticEvent::ScoringFailed {
                    record_id: record.id.clone(),
                    error: e.to_string(),
                });
                PolarityScore::NEUTRAL
            }
        };
        polarities.push(score.polarity);
        subjectivities.push(score.subjectivity);
    }

    let summarize = |values: &[f64]| {
        SummaryStats::from_values(values)
            .ok_or_else(|| AnalysisError::Computation("polarity sample is empty".to_string()))
    };

    Ok(AdvancedSentiment {
        polarity: summarize(&polarities)?,
        subjectivity: summarize(&subjectivities)?,
        sample_size: sample.len(),
        scoring_failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MemorySink;
    use crate::error::ScoringError;
    use crate::record::Sentiment;
    use crate::scoring::LexiconScorer;

    fn corpus(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| {
                let msg = if i % 3 == 0 {
                    format!("great clean energy progress {i}")
                } else if i % 3 == 1 {
                    format!("what a hoax and a scam {i}")
                } else {
                    format!("report number {i}")
                };
                Record::new(i.to_string(), msg, Sentiment::Neutral)
            })
            .collect()
    }

    #[test]
    fn empty_input_errors() {
        let sink = MemorySink::new();
        let result = perform_advanced_sentiment_analysis(
            &[],
            &LexiconScorer,
            &SamplingOptions::default(),
            &sink,
        );
        assert!(matches!(result, Err(AnalysisError::EmptyInput)));
    }

    #[test]
    fn sample_is_capped_by_collection_size() {
        let recs = corpus(12);
        let sink = MemorySink::new();
        let a = perform_advanced_sentiment_analysis(
            &recs,
            &LexiconScorer,
            &SamplingOptions::default(),
            &sink,
        )
        .unwrap();
        assert_eq!(a.sample_size, 12);
        assert_eq!(a.scoring_failures, 0);
        assert!(sink.events().is_empty());
    }

    #[test]
    fn sample_is_capped_by_option() {
        let recs = corpus(50);
        let opts = SamplingOptions {
            sample_size: 10,
            seed: 7,
        };
        let a = perform_advanced_sentiment_analysis(&recs, &LexiconScorer, &opts, &MemorySink::new())
            .unwrap();
        assert_eq!(a.sample_size, 10);
    }

    #[test]
    fn same_seed_same_sample() {
        let recs = corpus(200);
        let first: Vec<&str> = sample_records(&recs, 25, 42).iter().map(|r| r.id.as_str()).collect();
        let second: Vec<&str> = sample_records(&recs, 25, 42).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(first, second);

        let opts = SamplingOptions {
            sample_size: 25,
            seed: 42,
        };
        let a = perform_advanced_sentiment_analysis(&recs, &LexiconScorer, &opts, &MemorySink::new())
            .unwrap();
        let b = perform_advanced_sentiment_analysis(&recs, &LexiconScorer, &opts, &MemorySink::new())
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn sample_has_no_duplicates() {
        let recs = corpus(100);
        let mut ids: Vec<&str> = sample_records(&recs, 60, 3).iter().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 60);
    }

    #[test]
    fn scorer_failures_degrade_to_neutral() {
        let recs = vec![
            Record::new("ok", "good", Sentiment::Pro),
            Record::new("bad", "boom", Sentiment::Anti),
        ];
        let scorer = |text: &str| -> Result<PolarityScore, ScoringError> {
            if text == "boom" {
                Err(ScoringError::Backend("exploded".to_string()))
            } else {
                Ok(PolarityScore {
                    polarity: 1.0,
                    subjectivity: 1.0,
                })
            }
        };
        let sink = MemorySink::new();
        let a = perform_advanced_sentiment_analysis(&recs, &scorer, &SamplingOptions::default(), &sink)
            .unwrap();
        assert_eq!(a.sample_size, 2);
        assert_eq!(a.scoring_failures, 1);
        assert_eq!(a.polarity.mean, 0.5);
        assert_eq!(a.polarity.min, 0.0);
        assert_eq!(a.subjectivity.max, 1.0);
        assert_eq!(
            sink.events(),
            vec![DiagnosticEvent::ScoringFailed {
                record_id: "bad".to_string(),
                error: "scorer failed: exploded".to_string(),
            }]
        );
    }

    #[test]
    fn scores_are_clamped() {
        let recs = vec![Record::new("1", "anything", Sentiment::Pro)];
        let scorer = |_: &str| -> Result<PolarityScore, ScoringError> {
            Ok(PolarityScore {
                polarity: -3.0,
                subjectivity: 4.0,
            })
        };
        let a = perform_advanced_sentiment_analysis(
            &recs,
            &scorer,
            &SamplingOptions::default(),
            &MemorySink::new(),
        )
        .unwrap();
        assert_eq!(a.polarity.min, -1.0);
        assert_eq!(a.subjectivity.max, 1.0);
    }

    #[test]
    fn non_finite_scores_degrade_to_neutral() {
        let recs = vec![
            Record::new("ok", "fine", Sentiment::Pro),
            Record::new("nan", "weird", Sentiment::Anti),
        ];
        let scorer = |text: &str| -> Result<PolarityScore, ScoringError> {
            let polarity = if text == "weird" { f64::NAN } else { 0.5 };
            Ok(PolarityScore {
                polarity,
                subjectivity: 0.5,
            })
        };
        let sink = MemorySink::new();
        let a = perform_advanced_sentiment_analysis(&recs, &scorer, &SamplingOptions::default(), &sink)
            .unwrap();
        assert_eq!(a.scoring_failures, 1);
        assert_eq!(a.polarity.mean, 0.25);
        assert_eq!(a.polarity.min, 0.0);
        assert_eq!(a.polarity.max, 0.5);
        assert!(a.polarity.std.is_finite());
        assert_eq!(
            sink.events(),
            vec![DiagnosticEvent::ScoringFailed {
                record_id: "nan".to_string(),
                error: "scorer returned a non-finite score".to_string(),
            }]
        );
    }
}
