//! Localized post dates.
//!
//! Front matter dates are ISO-8601 strings. They render as a calendar date in
//! the post's locale, using that locale's month names and date pattern:
//!
//! ```text
//! "2020-01-15", en → January 15, 2020
//! "2020-01-15", zh → 2020年1月15日
//! ```
//!
//! Accepted inputs: `YYYY-MM-DD`, RFC 3339 date-times
//! (`2020-01-15T08:30:00+02:00`), and naive date-times
//! (`2020-01-15T08:30:00`). The calendar date written in the string is the one
//! shown; no time-zone conversion happens.

use crate::locale::{LocaleStrings, LocaleTable};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum DateError {
    #[error("invalid date: {0:?}")]
    InvalidDate(String),
}

/// Parse an ISO-8601 date or date-time into its calendar date.
pub fn parse_post_date(input: &str) -> Result<NaiveDate, DateError> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(datetime.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(datetime.date());
        }
    }
    Err(DateError::InvalidDate(input.to_string()))
}

/// Render a calendar date with a locale's month names and pattern.
pub fn render_date(date: NaiveDate, strings: &LocaleStrings) -> String {
    let month = strings
        .month_name(date.month())
        .map(str::to_string)
        .unwrap_or_else(|| date.month().to_string());
    strings
        .date_format
        .replace("{month_number}", &date.month().to_string())
        .replace("{month}", &month)
        .replace("{day}", &date.day().to_string())
        .replace("{year}", &date.year().to_string())
}

/// Format a post date for display.
///
/// `locale` selects the month names and pattern; `None` (or an unknown tag)
/// uses the table's default locale.
pub fn format_post_date(
    date: &str,
    locale: Option<&str>,
    locales: &LocaleTable,
) -> Result<String, DateError> {
    let parsed = parse_post_date(date)?;
    let (_, strings) = locales.resolve(locale);
    Ok(render_date(parsed, strings))
}
