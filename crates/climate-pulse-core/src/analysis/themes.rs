//! Theme extraction: global and per-class vocabulary.

use std::collections::BTreeMap;

use crate::record::{Record, Sentiment};
use crate::text::FrequencyTable;
use crate::vocab::Vocabulary;

use super::reports::ThemeAnalysis;

/// Default number of global themes reported.
pub const DEFAULT_TOP_THEMES: usize = 20;

/// Tokens kept per sentiment class.
pub const THEMES_PER_CLASS: usize = 10;

/// Build global and per-class frequency tables and the climate subset.
///
/// Every class in {-1, 0, 1, 2} gets an entry, empty when the class has no
/// records.
#[tracing::instrument(skip_all, fields(records = records.len(), top_n))]
pub fn identify_key_themes(records: &[Record], vocab: &Vocabulary, top_n: usize) -> ThemeAnalysis {
    let global = frequency_for(records.iter(), vocab);

    let theme_by_sentiment: BTreeMap<i8, FrequencyTable> = Sentiment::ALL
        .into_iter()
        .map(|class| {
            let table = frequency_for(records.iter().filter(|r| r.sentiment == class), vocab);
            (class.code(), table.top(THEMES_PER_CLASS))
        })
        .collect();

    let climate_related_words = global.filter(|token| vocab.is_climate_related(token));

    tracing::debug!(
        unique = global.len(),
        climate = climate_related_words.len(),
        "themes extracted"
    );

    ThemeAnalysis {
        top_themes: global.most_common(top_n),
        total_unique_words: global.len(),
        theme_by_sentiment,
        climate_related_words,
    }
}

fn frequency_for<'a>(records: impl Iterator<Item = &'a Record>, vocab: &Vocabulary) -> FrequencyTable {
    let mut table = FrequencyTable::new();
    for r in records {
        table.add_text(&r.message, vocab);
    }
    table
}
