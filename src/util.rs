// Utility helpers for parsing and formatting.
//
// This module centralizes the forgiving date/time handling so the rest of
// the code can assume clean, typed values.
use chrono::{NaiveDate, NaiveTime, Timelike};
use num_format::{Locale, ToFormattedString};

/// Sort key given to rows without a start time; larger than any real time.
pub const ABSENT_TIME_KEY: f64 = 999_999.0;

/// Parse a day-first `DD/MM/YYYY` date. Anything else yields `None`.
pub fn parse_date_safe(s: Option<&str>) -> Option<NaiveDate> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, "%d/%m/%Y").ok()
}

/// Parse a `HH:MM:SS` clock time, also accepting `HH:MM`.
pub fn parse_time_safe(s: Option<&str>) -> Option<NaiveTime> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

pub fn clean_text(s: Option<String>) -> String {
    s.map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Minutes since midnight including the fractional seconds part.
pub fn minutes_key(time: Option<NaiveTime>) -> f64 {
    match time {
        Some(t) => f64::from(t.hour() * 60 + t.minute()) + f64::from(t.second()) / 60.0,
        None => ABSENT_TIME_KEY,
    }
}

pub fn format_time(time: Option<NaiveTime>) -> String {
    time.map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_default()
}

/// Render a count cell; zero renders blank.
pub fn format_count(n: u32) -> String {
    if n == 0 {
        String::new()
    } else {
        n.to_string()
    }
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Fixed decimals plus locale-aware thousands separators (`1,234.50`).
    let neg = n.is_sign_negative() && n != 0.0;
    let s = format!("{:.*}", decimals, n.abs());
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        res.push('.');
        res.push_str(frac);
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}
