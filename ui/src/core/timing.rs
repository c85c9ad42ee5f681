//! Timestamp parsing for snapshot columns.
//!
//! Snapshot exports are not consistent about how they write times: some rows
//! are RFC 3339, some use a space separator, some carry `+00:00` offsets and
//! some are bare dates. Everything is normalised to UTC; anything we can't
//! read becomes `None` so callers can drop the row instead of failing.

use time::{
    format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime,
    PrimitiveDateTime, Time, UtcOffset,
};

/// Parse a timestamp cell in any of the supported layouts.
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(ts) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return Some(ts.to_offset(UtcOffset::UTC));
    }

    let (body, offset) = split_offset(trimmed)?;
    let body = body.replacen('T', " ", 1);

    parse_naive(&body).map(|naive| naive.assume_offset(offset).to_offset(UtcOffset::UTC))
}

/// Unix seconds as float, the unit chart geometry works in.
pub fn unix_seconds(ts: OffsetDateTime) -> f64 {
    ts.unix_timestamp_nanos() as f64 / 1e9
}

pub fn from_unix_seconds(seconds: f64) -> Option<OffsetDateTime> {
    if !seconds.is_finite() {
        return None;
    }
    OffsetDateTime::from_unix_timestamp_nanos((seconds * 1e9).round() as i128).ok()
}

fn parse_naive(body: &str) -> Option<PrimitiveDateTime> {
    let Some((date_part, time_part)) = body.split_once(' ') else {
        let date = Date::parse(body, &format_description!("[year]-[month]-[day]")).ok()?;
        return Some(date.midnight());
    };

    let date = Date::parse(date_part, &format_description!("[year]-[month]-[day]")).ok()?;
    let time_part = time_part.trim();

    let (clock, fraction) = match time_part.split_once('.') {
        Some((clock, fraction)) => (clock, Some(fraction)),
        None => (time_part, None),
    };

    let time = Time::parse(clock, &format_description!("[hour]:[minute]:[second]"))
        .or_else(|_| Time::parse(clock, &format_description!("[hour]:[minute]")))
        .ok()?;

    let nanos = match fraction {
        Some(digits) => fraction_to_nanos(digits)?,
        None => 0,
    };
    let time = time.replace_nanosecond(nanos).ok()?;

    Some(PrimitiveDateTime::new(date, time))
}

fn fraction_to_nanos(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let mut padded: String = digits.chars().take(9).collect();
    while padded.len() < 9 {
        padded.push('0');
    }
    padded.parse().ok()
}

/// Split a trailing UTC designator or numeric offset from the timestamp body.
fn split_offset(raw: &str) -> Option<(&str, UtcOffset)> {
    if let Some(body) = raw.strip_suffix(" UTC").or_else(|| raw.strip_suffix('Z')) {
        return Some((body.trim_end(), UtcOffset::UTC));
    }

    // Only look for a sign after the date portion so `2025-10-01` isn't read as an offset.
    let search_from = raw.find([' ', 'T']).unwrap_or(raw.len());
    let Some(rel) = raw[search_from..].rfind(['+', '-']) else {
        return Some((raw, UtcOffset::UTC));
    };
    let sign_pos = search_from + rel;
    let (body, suffix) = raw.split_at(sign_pos);
    let negative = suffix.starts_with('-');
    let digits: String = suffix[1..].chars().filter(|c| *c != ':').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i8>().ok()?, 0),
        4 => (digits[..2].parse::<i8>().ok()?, digits[2..].parse::<i8>().ok()?),
        _ => return None,
    };
    let (hours, minutes) = if negative {
        (-hours, -minutes)
    } else {
        (hours, minutes)
    };

    let offset = UtcOffset::from_hms(hours, minutes, 0).ok()?;
    Some((body.trim_end(), offset))
}
