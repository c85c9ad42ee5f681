//! Series labels and styling.
//!
//! Raw duration columns arrive under many spellings (`top1_ms`, `rank-10_ms`,
//! `r100_ms`, …). They are matched against an ordered rule table, most
//! specific tier first, and a tier only matches a whole number: `top100`
//! never satisfies the rule for tier 1 or tier 10.

use crate::core::catalog::DEFAULT_COLOR;
use crate::core::format::prettify_colnames;

/// Dash pattern for ordinary series.
pub const SOLID: [u32; 2] = [1, 0];
/// Dash pattern for the slowest tier.
pub const DASHED: [u32; 2] = [4, 4];

pub const TOP_1: &str = "Top 1";
pub const TOP_100: &str = "Top 100";

/// Label rules in evaluation order.
const TIER_RULES: &[(u32, &str)] = &[
    (100, TOP_100),
    (10, "Top 10"),
    (3, "Top 3"),
    (2, "Top 2"),
    (1, TOP_1),
];

/// Words allowed glued to a tier number (`top10`, `rank3`, `r1`).
const TIER_PREFIXES: &[&str] = &["top", "rank", "r"];

const SERIES_COLORS: &[(&str, &str)] = &[
    (TOP_1, "#FFD700"),
    ("Top 2", "#C0C0C0"),
    ("Top 3", "#CD7F32"),
    ("Top 10", "#636363"),
    (TOP_100, "#636363"),
];

/// A run of digits and the letters glued directly in front of it.
#[derive(Debug, PartialEq)]
struct NumberToken<'a> {
    prefix: &'a str,
    number: &'a str,
}

fn number_tokens(text: &str) -> Vec<NumberToken<'_>> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }

        let mut word_start = start;
        while word_start > 0 && bytes[word_start - 1].is_ascii_alphabetic() {
            word_start -= 1;
        }

        tokens.push(NumberToken {
            prefix: &text[word_start..start],
            number: &text[start..i],
        });
    }

    tokens
}

/// A standalone number, or one glued to a known prefix word, names a tier.
fn matches_tier(token: &NumberToken<'_>, tier: u32) -> bool {
    let Ok(value) = token.number.parse::<u32>() else {
        return false;
    };
    value == tier && (token.prefix.is_empty() || TIER_PREFIXES.contains(&token.prefix))
}

/// Map a raw measurement name (without the `_ms` suffix) to its display label.
pub fn standardize_series_label(raw: &str) -> String {
    let normalized = raw.trim().replace(['-', '.'], " ");
    let lowered = normalized.to_lowercase();
    let tokens = number_tokens(&lowered);

    TIER_RULES
        .iter()
        .find(|(tier, _)| tokens.iter().any(|token| matches_tier(token, *tier)))
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| prettify_colnames(&normalized))
}

pub fn series_color(label: &str) -> &'static str {
    SERIES_COLORS
        .iter()
        .find(|(l, _)| *l == label)
        .map(|(_, c)| *c)
        .unwrap_or(DEFAULT_COLOR)
}

pub fn series_dash(label: &str) -> [u32; 2] {
    if label == TOP_100 {
        DASHED
    } else {
        SOLID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_spellings_map_to_top_labels() {
        for (raw, expected) in [
            ("top1", "Top 1"),
            ("top 1", "Top 1"),
            ("rank1", "Top 1"),
            ("r1", "Top 1"),
            ("top_2", "Top 2"),
            ("rank-3", "Top 3"),
            ("top10", "Top 10"),
            ("rank 10", "Top 10"),
            ("top100", "Top 100"),
            ("r100", "Top 100"),
            ("time.top.100", "Top 100"),
            ("duration_10", "Top 10"),
            ("Top1", "Top 1"),
        ] {
            assert_eq!(standardize_series_label(raw), expected, "raw = {raw}");
        }
    }

    #[test]
    fn tier_100_is_never_a_smaller_tier() {
        for raw in ["top100", "rank100", "r100", "top 100", "100", "top-100", "leader_100"] {
            let label = standardize_series_label(raw);
            assert_eq!(label, "Top 100", "raw = {raw}");
        }
    }

    #[test]
    fn numbers_inside_words_do_not_match() {
        assert_eq!(standardize_series_label("p90"), "P90");
        assert_eq!(standardize_series_label("top11"), "Top11");
        assert_eq!(standardize_series_label("gen2_time"), "Gen2 Time");
    }

    #[test]
    fn unmatched_names_are_title_cased() {
        assert_eq!(standardize_series_label("duration"), "Duration");
        assert_eq!(standardize_series_label("median_run"), "Median Run");
        assert_eq!(standardize_series_label("world-record"), "World Record");
    }

    #[test]
    fn label_derivation_is_stable() {
        let first = standardize_series_label("rank_10");
        let second = standardize_series_label("rank_10");
        assert_eq!(first, second);
        assert_eq!(series_color(&first), series_color(&second));
        assert_eq!(series_dash(&first), series_dash(&second));
    }

    #[test]
    fn styling_table() {
        assert_eq!(series_color("Top 1"), "#FFD700");
        assert_eq!(series_color("Top 3"), "#CD7F32");
        assert_eq!(series_color("Duration"), DEFAULT_COLOR);
        assert_eq!(series_dash("Top 100"), DASHED);
        assert_eq!(series_dash("Top 10"), SOLID);
    }

    #[test]
    fn tokens_capture_prefix_words() {
        assert_eq!(
            number_tokens("rank 10 and top3"),
            vec![
                NumberToken { prefix: "", number: "10" },
                NumberToken { prefix: "top", number: "3" },
            ]
        );
    }
}
