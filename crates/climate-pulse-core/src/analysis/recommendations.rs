//! Rule-based recommendations.

use super::reports::{SentimentBalance, ThemeAnalysis};

/// Fewer distinct climate tokens than this triggers the vocabulary rule.
pub const MIN_CLIMATE_TERMS: usize = 10;

/// Themes named in the closing recommendation.
const FOCUS_THEMES: usize = 5;

/// Apply the recommendation rules in their fixed order.
///
/// Each rule adds at most one line. The stance rules are checked
/// independently of each other; the closing theme line is always present.
pub fn generate_recommendations(balance: &SentimentBalance, themes: &ThemeAnalysis) -> Vec<String> {
    let SentimentBalance {
        pro_climate: pro,
        anti_climate: anti,
        neutral,
    } = *balance;

    let mut recommendations = Vec::new();

    if anti > pro {
        recommendations.push(
            "High anti-climate change sentiment detected. Consider targeted educational campaigns."
                .to_string(),
        );
    }

    if neutral > pro + anti {
        recommendations.push(
            "High neutral sentiment suggests need for more engaging climate change content."
                .to_string(),
        );
    }

    if pro > anti {
        recommendations.push(
            "Pro-climate change sentiment is dominant. Leverage this for broader engagement."
                .to_string(),
        );
    }

    if themes.climate_related_words.len() < MIN_CLIMATE_TERMS {
        recommendations.push(
            "Limited climate-specific terminology. Consider expanding climate change vocabulary."
                .to_string(),
        );
    }

    let focus: Vec<&str> = themes
        .top_themes
        .iter()
        .take(FOCUS_THEMES)
        .map(|(token, _)| token.as_str())
        .collect();
    recommendations.push(format!("Focus on key themes: {}", focus.join(", ")));

    recommendations
}
