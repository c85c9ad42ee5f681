//! Formatting helpers for presenting durations, gaps and column names.

use time::{macros::format_description, Duration, OffsetDateTime};

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;

/// Split a millisecond count into `(hours, minutes, seconds, millis)`.
fn split_ms(ms: i64) -> (i64, i64, i64, i64) {
    let hours = ms / MS_PER_HOUR;
    let minutes = (ms % MS_PER_HOUR) / MS_PER_MINUTE;
    let seconds = (ms % MS_PER_MINUTE) / MS_PER_SECOND;
    let millis = ms % MS_PER_SECOND;
    (hours, minutes, seconds, millis)
}

/// Normalise an optional float into whole, non-negative milliseconds.
/// Missing or non-finite input yields `None`.
fn whole_ms(value: Option<f64>) -> Option<i64> {
    let value = value?;
    if !value.is_finite() {
        return None;
    }
    Some(value.max(0.0).floor() as i64)
}

/// Leaderboard table format: zero-padded `MM:SS.mmm`, or `HH:MM:SS.mmm`
/// once an hour component exists. Missing input renders as an empty string.
pub fn ms_to_str(value: Option<f64>) -> String {
    let Some(ms) = whole_ms(value) else {
        return String::new();
    };
    let (hours, minutes, seconds, millis) = split_ms(ms);
    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}.{millis:03}")
    } else {
        format!("{minutes:02}:{seconds:02}.{millis:03}")
    }
}

/// Positive gaps get a leading `+`; zero, negative or missing gaps are blank.
pub fn gap_ms_to_str(value: Option<f64>) -> String {
    match value {
        Some(gap) if gap.is_finite() && gap > 0.0 => format!("+{}", ms_to_str(Some(gap))),
        _ => String::new(),
    }
}

/// Chart/tooltip format: `H:MM:SS.mmm` when at least one hour, else `M:SS.mmm`.
pub fn format_duration_ms(value: Option<f64>) -> String {
    let Some(ms) = whole_ms(value) else {
        return String::new();
    };
    let (hours, minutes, seconds, millis) = split_ms(ms);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}.{millis:03}")
    } else {
        format!("{minutes}:{seconds:02}.{millis:03}")
    }
}

/// Axis tick format, same shape as [`format_duration_ms`] without millis.
pub fn format_axis_ms(value: f64) -> String {
    let Some(ms) = whole_ms(Some(value)) else {
        return String::new();
    };
    let (hours, minutes, seconds, _) = split_ms(ms);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// Percentile cards show hour-long times without the millis so they fit.
pub fn format_percentile_ms(value: Option<f64>) -> String {
    let text = ms_to_str(value);
    if text.matches(':').count() == 2 {
        text[..text.len() - 4].to_string()
    } else {
        text
    }
}

/// snake_case column name to Title Case.
pub fn prettify_colnames(column: &str) -> String {
    column
        .replace('_', " ")
        .split(' ')
        .map(title_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_word(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut at_word_start = true;
    for ch in word.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

/// Coarse relative delta: seconds, minutes, hours or days.
pub fn format_delta(delta: Duration) -> String {
    let seconds = delta.whole_seconds();
    if seconds < 60 {
        format!("{seconds} seconds ago")
    } else if seconds < 3_600 {
        format!("{} minutes ago", seconds / 60)
    } else if seconds < 86_400 {
        format!("{} hour(s) ago", seconds / 3_600)
    } else {
        format!("{} day(s) ago", seconds / 86_400)
    }
}

/// `YYYY-MM-DD HH:MM:SS`, used in tables and footers.
pub fn format_datetime(ts: OffsetDateTime) -> String {
    ts.format(&format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second]"
    ))
    .unwrap_or_else(|_| "—".to_string())
}

/// Minute precision, for chart hover labels.
pub fn format_minute(ts: OffsetDateTime) -> String {
    ts.format(&format_description!("[year]-[month]-[day] [hour]:[minute]"))
        .unwrap_or_default()
}

/// `YYYY-MM-DD HH:MM:SS (N unit(s) ago)` relative to `now`.
pub fn human_friendly_time(ts: Option<OffsetDateTime>, now: OffsetDateTime) -> String {
    match ts {
        Some(ts) => format!("{} ({})", format_datetime(ts), format_delta(now - ts)),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn table_format_pads_and_hides_hours() {
        assert_eq!(ms_to_str(Some(0.0)), "00:00.000");
        assert_eq!(ms_to_str(Some(61_005.0)), "01:01.005");
        assert_eq!(ms_to_str(Some(3_600_000.0)), "01:00:00.000");
        assert_eq!(ms_to_str(Some(3_723_456.0)), "01:02:03.456");
    }

    #[test]
    fn missing_values_render_empty() {
        assert_eq!(ms_to_str(None), "");
        assert_eq!(ms_to_str(Some(f64::NAN)), "");
        assert_eq!(format_duration_ms(None), "");
        assert_eq!(format_duration_ms(Some(f64::INFINITY)), "");
    }

    #[test]
    fn chart_format_drops_leading_zero_padding() {
        assert_eq!(format_duration_ms(Some(0.0)), "0:00.000");
        assert_eq!(format_duration_ms(Some(59_000.0)), "0:59.000");
        assert_eq!(format_duration_ms(Some(600_123.0)), "10:00.123");
        assert_eq!(format_duration_ms(Some(3_661_001.0)), "1:01:01.001");
    }

    #[test]
    fn negative_durations_clamp_to_zero() {
        assert_eq!(format_duration_ms(Some(-500.0)), "0:00.000");
        assert_eq!(format_axis_ms(-1.0), "0:00");
    }

    #[test]
    fn axis_format_has_no_millis() {
        assert_eq!(format_axis_ms(177_000.0), "2:57");
        assert_eq!(format_axis_ms(7_200_000.0), "2:00:00");
    }

    #[test]
    fn gaps_only_render_when_positive() {
        assert_eq!(gap_ms_to_str(Some(1_250.0)), "+00:01.250");
        assert_eq!(gap_ms_to_str(Some(0.0)), "");
        assert_eq!(gap_ms_to_str(Some(-10.0)), "");
        assert_eq!(gap_ms_to_str(None), "");
        assert_eq!(gap_ms_to_str(Some(f64::NAN)), "");
    }

    #[test]
    fn percentile_cards_trim_millis_for_long_runs() {
        assert_eq!(format_percentile_ms(Some(3_723_456.0)), "01:02:03");
        assert_eq!(format_percentile_ms(Some(83_456.0)), "01:23.456");
    }

    #[test]
    fn column_names_become_title_case() {
        assert_eq!(prettify_colnames("steam_name"), "Steam Name");
        assert_eq!(prettify_colnames("gap_leader_ms"), "Gap Leader Ms");
        assert_eq!(prettify_colnames("p50 ms"), "P50 Ms");
    }

    #[test]
    fn deltas_pick_coarse_units() {
        assert_eq!(format_delta(Duration::seconds(42)), "42 seconds ago");
        assert_eq!(format_delta(Duration::minutes(5)), "5 minutes ago");
        assert_eq!(format_delta(Duration::hours(3)), "3 hour(s) ago");
        assert_eq!(format_delta(Duration::days(2)), "2 day(s) ago");
    }

    #[test]
    fn friendly_time_appends_delta() {
        let now = datetime!(2025-10-02 12:00 UTC);
        let ts = datetime!(2025-10-02 11:30 UTC);
        assert_eq!(
            human_friendly_time(Some(ts), now),
            "2025-10-02 11:30:00 (30 minutes ago)"
        );
        assert_eq!(human_friendly_time(None, now), "");
    }
}
