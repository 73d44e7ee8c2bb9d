//! Summary command

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use climate_pulse_core::ingest::{self, DatasetSummary};
use climate_pulse_core::{Record, Sentiment};

/// Arguments for the `summary` subcommand.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// CSV file with `sentiment` and `message` columns.
    pub file: Utf8PathBuf,

    /// Only summarize records of this class.
    #[arg(long, value_enum)]
    pub sentiment: Option<Sentiment>,
}

#[derive(Serialize)]
struct SummaryOutput {
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sentiment_filter: Option<Sentiment>,
    #[serde(flatten)]
    summary: DatasetSummary,
}

/// Print the dataset summary, optionally restricted to one class.
#[instrument(name = "cmd_summary", skip_all, fields(file = %args.file))]
pub fn cmd_summary(
    args: SummaryArgs,
    global_json: bool,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    debug!(sentiment = ?args.sentiment, "executing summary command");

    let records = super::load_dataset(&args.file, max_input)?;
    let summary = match args.sentiment {
        Some(class) => {
            let subset: Vec<Record> = ingest::filter_by_sentiment(&records, class)
                .into_iter()
                .cloned()
                .collect();
            ingest::summarize(&subset)
        }
        None => ingest::summarize(&records),
    };

    let output = SummaryOutput {
        file: args.file.to_string(),
        sentiment_filter: args.sentiment,
        summary,
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", output.file.bold());
    if let Some(class) = output.sentiment_filter {
        println!("{}: {}", "Filter".dimmed(), class.label().cyan());
    }
    println!("{}: {}", "Tweets".dimmed(), output.summary.total_tweets);
    for class in Sentiment::ALL {
        if let Some(count) = output.summary.sentiment_distribution.get(&class.code()) {
            println!("  {:>8} ({:>2}) {}", class.label(), class.code(), count);
        }
    }
    match output.summary.average_text_length {
        Some(len) => println!("{}: {len:.1} characters", "Average length".dimmed()),
        None => println!("{}: {}", "Average length".dimmed(), "n/a".yellow()),
    }
    if let Some(words) = output.summary.average_word_count {
        println!("{}: {words:.1}", "Average words".dimmed());
    }

    Ok(())
}
