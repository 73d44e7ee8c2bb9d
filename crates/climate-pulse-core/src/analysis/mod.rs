//! Insight analysis over labeled records.
//!
//! Decomposes the report into five independent stages, assembled by
//! [`InsightAnalyzer::generate_insights_report`]:
//!
//! 1. [`distribution`] - sentiment class counts and stance balance
//! 2. [`themes`] - global and per-class vocabulary
//! 3. [`patterns`] - length statistics and structural markers
//! 4. [`polarity`] - lexical polarity over a deterministic sample
//! 5. [`recommendations`] - rule-based suggestions
//!
//! Each stage is a pure function of the record slice in its own module;
//! callers can also invoke stages individually.

pub mod distribution;
pub mod patterns;
pub mod polarity;
pub mod recommendations;
pub mod reports;
pub mod themes;

pub use polarity::SamplingOptions;
pub use reports::InsightReport;

use crate::diagnostics::{DiagnosticEvent, DiagnosticsSink, TracingSink};
use crate::error::{AnalysisError, AnalysisResult};
use crate::record::{self, Record};
use crate::scoring::PolarityScorer;
use crate::stats::round_to;
use crate::vocab::Vocabulary;

use reports::{DatasetOverview, DetailedAnalysis, KeyFindings};

/// Default value for [`ReportOptions::date_range`].
pub const DEFAULT_DATE_RANGE: &str = "Apr 27, 2015 - Feb 21, 2018";

/// Default value for [`ReportOptions::topic`].
pub const DEFAULT_TOPIC: &str = "Climate Change";

/// Themes listed under key findings.
const KEY_FINDING_THEMES: usize = 5;

/// Report shape and descriptive labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Global themes to extract.
    pub top_themes: usize,
    /// Period the dataset covers, copied into the overview.
    pub date_range: String,
    /// Subject of the dataset, copied into the overview.
    pub topic: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_themes: themes::DEFAULT_TOP_THEMES,
            date_range: DEFAULT_DATE_RANGE.to_string(),
            topic: DEFAULT_TOPIC.to_string(),
        }
    }
}

/// Runs every stage over one record collection and assembles the report.
///
/// Holds configuration only; the records are passed to each call.
pub struct InsightAnalyzer<'a> {
    vocabulary: Vocabulary,
    sampling: SamplingOptions,
    report: ReportOptions,
    scorer: &'a dyn PolarityScorer,
    sink: &'a dyn DiagnosticsSink,
}

impl<'a> InsightAnalyzer<'a> {
    /// Create an analyzer with default word lists and options.
    ///
    /// Diagnostics go to `tracing` until [`Self::with_diagnostics`] is used.
    pub fn new(scorer: &'a dyn PolarityScorer) -> Self {
        Self {
            vocabulary: Vocabulary::default(),
            sampling: SamplingOptions::default(),
            report: ReportOptions::default(),
            scorer,
            sink: &TracingSink,
        }
    }

    /// Replace the stopword and keyword lists.
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// Replace the polarity sampling options.
    pub fn with_sampling(mut self, sampling: SamplingOptions) -> Self {
        self.sampling = sampling;
        self
    }

    /// Replace the report options.
    pub fn with_report_options(mut self, report: ReportOptions) -> Self {
        self.report = report;
        self
    }

    /// Send diagnostics to `sink`.
    pub fn with_diagnostics(mut self, sink: &'a dyn DiagnosticsSink) -> Self {
        self.sink = sink;
        self
    }

    /// The active vocabulary.
    pub const fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Run all stages and assemble the report.
    ///
    /// Fails on the first error from any stage; no partial report is
    /// returned. Only scorer failures inside the polarity stage are
    /// recovered.
    #[tracing::instrument(skip_all, fields(records = records.len()))]
    pub fn generate_insights_report(&self, records: &[Record]) -> AnalysisResult<InsightReport> {
        if records.is_empty() {
            return Err(AnalysisError::EmptyInput);
        }
        record::validate_all(records)?;

        let sentiment_distribution = self.stage("sentiment_distribution", || {
            distribution::analyze_sentiment_distribution(records)
        })?;
        let theme_analysis = self.stage("themes", || {
            Ok(themes::identify_key_themes(
                records,
                &self.vocabulary,
                self.report.top_themes,
            ))
        })?;
        let text_patterns = self.stage("text_patterns", || patterns::analyze_text_patterns(records))?;
        let advanced_sentiment = self.stage("advanced_sentiment", || {
            polarity::perform_advanced_sentiment_analysis(
                records,
                self.scorer,
                &self.sampling,
                self.sink,
            )
        })?;
        let recommendations = self.stage("recommendations", || {
            Ok(recommendations::generate_recommendations(
                &sentiment_distribution.sentiment_balance,
                &theme_analysis,
            ))
        })?;

        let key_findings = KeyFindings {
            dominant_sentiment: sentiment_distribution.dominant_sentiment_label.clone(),
            sentiment_balance: sentiment_distribution.sentiment_balance,
            most_common_themes: theme_analysis
                .top_themes
                .iter()
                .take(KEY_FINDING_THEMES)
                .cloned()
                .collect(),
            average_tweet_length: round_to(text_patterns.text_length_stats.mean_length, 1),
        };

        let report = InsightReport {
            dataset_overview: DatasetOverview {
                total_tweets: sentiment_distribution.total_tweets,
                date_range: self.report.date_range.clone(),
                topic: self.report.topic.clone(),
            },
            key_findings,
            detailed_analysis: DetailedAnalysis {
                sentiment_distribution,
                theme_analysis,
                text_patterns,
                advanced_sentiment,
            },
            recommendations,
        };

        tracing::info!(
            total = report.dataset_overview.total_tweets,
            recommendations = report.recommendations.len(),
            "insights report generated"
        );
        Ok(report)
    }

    fn stage<T>(
        &self,
        stage: &'static str,
        run: impl FnOnce() -> AnalysisResult<T>,
    ) -> AnalysisResult<T> {
        self.sink.record(DiagnosticEvent::StageStarted { stage });
        let out = run()?;
        self.sink.record(DiagnosticEvent::StageCompleted { stage });
        Ok(out)
    }
}

/// Build a report with default options.
pub fn generate_insights_report(
    records: &[Record],
    scorer: &dyn PolarityScorer,
) -> AnalysisResult<InsightReport> {
    InsightAnalyzer::new(scorer).generate_insights_report(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MemorySink;
    use crate::record::Sentiment;
    use crate::scoring::LexiconScorer;
    use crate::vocab::DEFAULT_STOPWORDS;

    fn rec(id: &str, msg: &str, s: Sentiment) -> Record {
        Record::new(id, msg, s)
    }

    fn two_records() -> Vec<Record> {
        vec![
            rec("1", "solar solar wind", Sentiment::Pro),
            rec("2", "fake hoax fake", Sentiment::Anti),
        ]
    }

    #[test]
    fn small_scenario_end_to_end() {
        let vocab = Vocabulary::new(DEFAULT_STOPWORDS, ["glacier", "methane"]).unwrap();
        let report = InsightAnalyzer::new(&LexiconScorer)
            .with_vocabulary(vocab)
            .generate_insights_report(&two_records())
            .unwrap();

        let dist = &report.detailed_analysis.sentiment_distribution;
        assert_eq!(dist.sentiment_counts.get(&1), Some(&1));
        assert_eq!(dist.sentiment_counts.get(&-1), Some(&1));
        assert_eq!(dist.sentiment_counts.len(), 2);

        let themes = &report.detailed_analysis.theme_analysis;
        assert_eq!(themes.top_themes[0], ("solar".to_string(), 2));
        assert!(themes.climate_related_words.is_empty());

        let balance = report.key_findings.sentiment_balance;
        assert_eq!(balance.anti_climate, 1);
        assert_eq!(balance.pro_climate, 1);

        assert_eq!(report.recommendations.len(), 2);
        assert!(report.recommendations[0].starts_with("Limited climate-specific"));
        assert_eq!(
            report.recommendations[1],
            "Focus on key themes: solar, fake, wind, hoax"
        );
    }

    #[test]
    fn empty_collection_produces_no_report() {
        let result = InsightAnalyzer::new(&LexiconScorer).generate_insights_report(&[]);
        assert!(matches!(result, Err(AnalysisError::EmptyInput)));
    }

    #[test]
    fn invalid_record_aborts() {
        let mut recs = two_records();
        recs[1].sentiment_label = "News".to_string();
        let result = InsightAnalyzer::new(&LexiconScorer).generate_insights_report(&recs);
        assert!(matches!(
            result,
            Err(AnalysisError::Validation { ref id, .. }) if id == "2"
        ));
    }

    #[test]
    fn overview_uses_report_options() {
        let opts = ReportOptions {
            top_themes: 1,
            date_range: "2020".to_string(),
            topic: "Energy".to_string(),
        };
        let report = InsightAnalyzer::new(&LexiconScorer)
            .with_report_options(opts)
            .generate_insights_report(&two_records())
            .unwrap();
        assert_eq!(report.dataset_overview.total_tweets, 2);
        assert_eq!(report.dataset_overview.date_range, "2020");
        assert_eq!(report.dataset_overview.topic, "Energy");
        assert_eq!(report.detailed_analysis.theme_analysis.top_themes.len(), 1);
    }

    #[test]
    fn key_findings_summarize_details() {
        let recs = vec![
            rec("1", "Climate action now", Sentiment::Pro),
            rec("2", "Carbon emissions hit record high", Sentiment::News),
            rec("3", "Is it hot in here?", Sentiment::Neutral),
        ];
        let report = generate_insights_report(&recs, &LexiconScorer).unwrap();
        assert_eq!(report.key_findings.dominant_sentiment, "Neutral");
        assert!(report.key_findings.most_common_themes.len() <= 5);
        // (18 + 32 + 18) / 3 = 22.67
        assert_eq!(report.key_findings.average_tweet_length, 22.7);
    }

    #[test]
    fn stages_report_to_sink_in_order() {
        let sink = MemorySink::new();
        InsightAnalyzer::new(&LexiconScorer)
            .with_diagnostics(&sink)
            .generate_insights_report(&two_records())
            .unwrap();

        let started: Vec<&str> = sink
            .events()
            .iter()
            .filter_map(|e| match e {
                DiagnosticEvent::StageStarted { stage } => Some(*stage),
                _ => None,
            })
            .collect();
        assert_eq!(
            started,
            vec![
                "sentiment_distribution",
                "themes",
                "text_patterns",
                "advanced_sentiment",
                "recommendations",
            ]
        );
    }

    #[test]
    fn report_serializes_with_stable_shape() {
        let report = generate_insights_report(&two_records(), &LexiconScorer).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        for key in [
            "dataset_overview",
            "key_findings",
            "detailed_analysis",
            "recommendations",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["key_findings"]["most_common_themes"][0][0], "solar");
        assert_eq!(json["key_findings"]["most_common_themes"][0][1], 2);
        for key in [
            "sentiment_distribution",
            "theme_analysis",
            "text_patterns",
            "advanced_sentiment",
        ] {
            assert!(json["detailed_analysis"].get(key).is_some(), "missing {key}");
        }
        let advanced = &json["detailed_analysis"]["advanced_sentiment"];
        for key in ["polarity", "subjectivity", "sample_size", "scoring_failures"] {
            assert!(advanced.get(key).is_some(), "missing advanced_sentiment.{key}");
        }
        assert!(advanced["polarity"]["mean"].is_number());
        assert_eq!(
            json["detailed_analysis"]["theme_analysis"]["theme_by_sentiment"]["1"]["solar"],
            2
        );
    }
}
