//! Number and timestamp rendering shared by every webtag resolver.

use chrono::NaiveDateTime;
use log::warn;
use std::fmt::Write as _;

/// Placeholder for a value whose record has never been set.
pub const NO_VALUE: &str = "---";
/// Placeholder for a time-of-day tag with no record.
pub const NO_TIME: &str = "----";
/// Placeholder for a date-bearing tag with no record.
pub const NO_DATE: &str = "------";

/// Fixed-point rendering with the configured decimal separator. Truncation
/// chops toward zero instead of rounding.
pub fn format_value(value: f64, dp: usize, truncate: bool, separator: &str) -> String {
    let value = if truncate {
        let factor = 10f64.powi(dp as i32);
        (value * factor).trunc() / factor
    } else {
        value
    };
    let formatted = format!("{value:.dp$}");
    if separator == "." {
        formatted
    } else {
        formatted.replace('.', separator)
    }
}

/// Locale-neutral output for machine-readable payloads (the `rc=y` path).
pub fn commas_to_periods(s: &str) -> String {
    s.replace(',', ".")
}

fn try_format(t: &NaiveDateTime, fmt: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", t.format(fmt)).ok()?;
    Some(out)
}

/// Render a timestamp with the caller's format when present and parseable,
/// else the documented default for the tag.
pub fn format_timestamp(t: &NaiveDateTime, override_fmt: Option<&str>, default_fmt: &str) -> String {
    if let Some(fmt) = override_fmt {
        match try_format(t, fmt) {
            Some(s) => return s,
            None => warn!("invalid date format '{fmt}', using default '{default_fmt}'"),
        }
    }
    try_format(t, default_fmt).unwrap_or_default()
}
