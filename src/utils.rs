use crate::error::{LedgerError, Result};
use chrono::{Local, NaiveDate};

/// Length of a `YYYY-MM` month key.
pub const MONTH_KEY_LEN: usize = 7;

/// Parses the longest numeric prefix of `input`, the way browsers' `parseFloat` does.
///
/// Leading whitespace is skipped. Returns `None` when no digits can be read, so
/// `"12.5kg"` yields `Some(12.5)` while `"kg"` and `""` yield `None`.
pub fn parse_float(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    if s[end..].starts_with("Infinity") {
        return if bytes.first() == Some(&b'-') {
            Some(f64::NEG_INFINITY)
        } else {
            Some(f64::INFINITY)
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    // An exponent only counts when at least one digit follows it.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Coerces free-form text to a finite number, substituting 0 for anything unusable.
pub fn coerce_number(input: &str) -> f64 {
    parse_float(input).map(finite_or_zero).unwrap_or(0.0)
}

/// Replaces NaN and infinities with 0.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Parses user-typed amounts such as `"1,250.50"` or `"฿ 300"`.
///
/// Every character other than ASCII digits and `.` is dropped before parsing.
/// Empty or unparsable input yields 0.
pub fn parse_formatted_number(input: &str) -> f64 {
    if input.trim().is_empty() {
        return 0.0;
    }
    let cleaned: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    coerce_number(&cleaned)
}

/// Returns the `YYYY-MM` month key of an ISO date string.
///
/// The key is the first seven characters. Shorter strings are returned whole; no
/// validation is performed.
pub fn month_key(date: &str) -> &str {
    match date.char_indices().nth(MONTH_KEY_LEN) {
        Some((idx, _)) => &date[..idx],
        None => date,
    }
}

pub fn parse_iso_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| LedgerError::InvalidDate(date.to_string()))
}

pub fn today_iso() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
