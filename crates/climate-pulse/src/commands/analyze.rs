//! Analyze command: full insights report for a dataset.

use std::time::Duration;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use climate_pulse_core::analysis::reports::InsightReport;
use climate_pulse_core::{
    Config, InsightAnalyzer, LexiconScorer, ReportOptions, SamplingOptions, Sentiment,
    TracingSink,
};

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// CSV file with `sentiment` and `message` columns.
    pub file: Utf8PathBuf,

    /// Number of global themes to extract.
    #[arg(long, value_name = "N")]
    pub top_themes: Option<usize>,

    /// Maximum records scored for polarity.
    #[arg(long, value_name = "N")]
    pub sample_size: Option<usize>,

    /// Seed for the polarity sample.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,
}

impl AnalyzeArgs {
    /// Command-line values over configured ones.
    fn options(&self, config: &Config) -> (SamplingOptions, ReportOptions) {
        let mut sampling = config.sampling_options();
        if let Some(n) = self.sample_size {
            sampling.sample_size = n;
        }
        if let Some(seed) = self.seed {
            sampling.seed = seed;
        }

        let mut report = config.report_options();
        if let Some(n) = self.top_themes {
            report.top_themes = n;
        }
        (sampling, report)
    }
}

/// Load a dataset, build the insights report, and print it.
#[instrument(name = "cmd_analyze", skip_all, fields(file = %args.file))]
pub fn cmd_analyze(
    args: AnalyzeArgs,
    global_json: bool,
    config: &Config,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    let (sampling, report_options) = args.options(config);
    debug!(?sampling, top_themes = report_options.top_themes, "executing analyze command");

    let vocabulary = config
        .vocabulary()
        .context("invalid word lists in configuration")?;

    let spinner = (!global_json).then(spinner);
    if let Some(ref pb) = spinner {
        pb.set_message(format!("loading {}", args.file));
    }
    let records = super::load_dataset(&args.file, max_input)?;

    if let Some(ref pb) = spinner {
        pb.set_message(format!("analyzing {} records", records.len()));
    }
    let scorer = LexiconScorer;
    let sink = TracingSink;
    let result = InsightAnalyzer::new(&scorer)
        .with_vocabulary(vocabulary)
        .with_sampling(sampling)
        .with_report_options(report_options)
        .with_diagnostics(&sink)
        .generate_insights_report(&records);
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let report = result.with_context(|| format!("failed to analyze {}", args.file))?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&args.file, &report);
    }
    Ok(())
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn print_report(file: &Utf8Path, report: &InsightReport) {
    let overview = &report.dataset_overview;
    let findings = &report.key_findings;
    let details = &report.detailed_analysis;

    println!("{}", file.bold());

    println!("\n{}", "Dataset Overview".bold().underline());
    println!("  {} {}", "Topic:".dimmed(), overview.topic);
    println!("  {} {}", "Period:".dimmed(), overview.date_range);
    println!("  {} {}", "Tweets:".dimmed(), overview.total_tweets);

    println!("\n{}", "Key Findings".bold().underline());
    println!(
        "  {} {}",
        "Dominant sentiment:".dimmed(),
        findings.dominant_sentiment.cyan()
    );
    let balance = findings.sentiment_balance;
    println!(
        "  {} pro {} / anti {} / neutral {}",
        "Balance:".dimmed(),
        balance.pro_climate.green(),
        balance.anti_climate.red(),
        balance.neutral.yellow(),
    );
    println!(
        "  {} {:.1} characters",
        "Average length:".dimmed(),
        findings.average_tweet_length
    );
    let themes: Vec<String> = findings
        .most_common_themes
        .iter()
        .map(|(token, count)| format!("{token} ({count})"))
        .collect();
    println!("  {} {}", "Top themes:".dimmed(), themes.join(", "));

    println!("\n{}", "Sentiment Distribution".bold().underline());
    let dist = &details.sentiment_distribution;
    for class in Sentiment::ALL {
        let code = class.code();
        let count = dist.sentiment_counts.get(&code).copied().unwrap_or(0);
        let pct = dist.sentiment_percentages.get(&code).copied().unwrap_or(0.0);
        println!("  {:>8} {:>7} ({:>5.1}%)", class.label(), count, pct);
    }

    println!("\n{}", "Recommendations".bold().underline());
    for (i, rec) in report.recommendations.iter().enumerate() {
        println!("  {}. {}", i + 1, rec);
    }

    println!("\n{}", "Detailed Statistics".bold().underline());
    let patterns = &details.text_patterns;
    println!(
        "  {} mean {:.1}, median {:.1}, range {}-{}",
        "Length:".cyan(),
        patterns.text_length_stats.mean_length,
        patterns.text_length_stats.median_length,
        patterns.text_length_stats.min_length,
        patterns.text_length_stats.max_length,
    );
    println!(
        "  {} mean {:.1}, median {:.1}",
        "Words:".cyan(),
        patterns.word_count_stats.mean_words,
        patterns.word_count_stats.median_words,
    );
    let markers = &patterns.common_patterns;
    println!(
        "  {} {} retweets, {} mentions, {} hashtags, {} urls",
        "Markers:".cyan(),
        markers.retweets,
        markers.mentions,
        markers.hashtags,
        markers.urls,
    );
    println!(
        "  {} {} unique words, {} climate terms",
        "Vocabulary:".cyan(),
        details.theme_analysis.total_unique_words,
        details.theme_analysis.climate_related_words.len(),
    );
    let advanced = &details.advanced_sentiment;
    println!(
        "  {} polarity {:+.3}, subjectivity {:.3} over {} sampled",
        "Polarity:".cyan(),
        advanced.polarity.mean,
        advanced.subjectivity.mean,
        advanced.sample_size,
    );
    if advanced.scoring_failures > 0 {
        println!(
            "  {} {} messages could not be scored",
            "Warning:".yellow(),
            advanced.scoring_failures
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args(file: Utf8PathBuf) -> AnalyzeArgs {
        AnalyzeArgs {
            file,
            top_themes: None,
            sample_size: None,
            seed: None,
        }
    }

    fn dataset(tmp: &TempDir) -> Utf8PathBuf {
        let path = tmp.path().join("tweets.csv");
        fs::write(
            &path,
            "sentiment,message,tweetid\n\
             1,Climate action now #climate,1\n\
             -1,Global warming is a hoax,2\n\
             2,RT @news: Carbon emissions hit record http://t.co/x,3\n",
        )
        .unwrap();
        Utf8PathBuf::try_from(path).unwrap()
    }

    #[test]
    fn flags_override_config() {
        let config = Config {
            sample_size: Some(10),
            sample_seed: Some(1),
            top_themes: Some(3),
            ..Config::default()
        };
        let mut a = args(Utf8PathBuf::from("x.csv"));
        let (sampling, report) = a.options(&config);
        assert_eq!(sampling.sample_size, 10);
        assert_eq!(sampling.seed, 1);
        assert_eq!(report.top_themes, 3);

        a.seed = Some(9);
        a.top_themes = Some(4);
        let (sampling, report) = a.options(&config);
        assert_eq!(sampling.seed, 9);
        assert_eq!(report.top_themes, 4);
    }

    #[test]
    fn analyze_json_succeeds() {
        let tmp = TempDir::new().unwrap();
        let file = dataset(&tmp);
        assert!(cmd_analyze(args(file), true, &Config::default(), None).is_ok());
    }

    #[test]
    fn analyze_text_succeeds() {
        let tmp = TempDir::new().unwrap();
        let file = dataset(&tmp);
        assert!(cmd_analyze(args(file), false, &Config::default(), None).is_ok());
    }

    #[test]
    fn analyze_missing_file_fails() {
        let result = cmd_analyze(
            args(Utf8PathBuf::from("/nonexistent/tweets.csv")),
            true,
            &Config::default(),
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn analyze_header_only_file_fails() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("empty.csv");
        fs::write(&path, "sentiment,message\n").unwrap();
        let file = Utf8PathBuf::try_from(path).unwrap();
        let err = cmd_analyze(args(file), true, &Config::default(), None).unwrap_err();
        assert!(format!("{err:#}").contains("no records to analyze"));
    }
}
