//! Reading-time labels.
//!
//! A post's reading estimate (in minutes) is shown under its title as a row of
//! glyphs followed by the rounded minute count:
//!
//! ```text
//!  3 min   → 🥐 3 min read
//! 12 min   → 🥐🥐 12 min read
//! 30 min   → 🍳🍳 30 min read
//! ```
//!
//! One primary glyph stands for roughly five minutes of reading. Once a post
//! needs more than five of them, the row switches to the alternate glyph and
//! is scaled down by a factor of `e`, so long reads stay compact.
//!
//! The estimate itself comes from [`estimate_reading_minutes`], a word-count
//! heuristic run once per post during scanning.

use std::f64::consts::E;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ReadingTimeError {
    #[error("invalid reading estimate: {0} (must be a finite, non-negative number of minutes)")]
    InvalidInput(f64),
}

/// Glyph for short reads.
pub const PRIMARY_GLYPH: &str = "🥐";
/// Glyph for long reads (more than five primary units).
pub const ALTERNATE_GLYPH: &str = "🍳";

/// Minutes represented by a single primary glyph.
const MINUTES_PER_UNIT: f64 = 5.0;
/// Above this many units the label switches to the alternate glyph.
const MAX_PRIMARY_UNITS: u32 = 5;

/// Formats reading-time labels with a configurable pair of glyphs.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingTimeFormatter {
    pub primary_glyph: String,
    pub alternate_glyph: String,
}

impl Default for ReadingTimeFormatter {
    fn default() -> Self {
        Self {
            primary_glyph: PRIMARY_GLYPH.to_string(),
            alternate_glyph: ALTERNATE_GLYPH.to_string(),
        }
    }
}

impl ReadingTimeFormatter {
    pub fn new(primary_glyph: impl Into<String>, alternate_glyph: impl Into<String>) -> Self {
        Self {
            primary_glyph: primary_glyph.into(),
            alternate_glyph: alternate_glyph.into(),
        }
    }

    /// Format `minutes` as `"<glyphs> <minutes> min read"`.
    ///
    /// The estimate is rounded to the nearest minute first. `NaN`, infinities,
    /// negative values and values too large to count in minutes are rejected.
    pub fn format(&self, minutes: f64) -> Result<String, ReadingTimeError> {
        if !minutes.is_finite() || minutes < 0.0 {
            return Err(ReadingTimeError::InvalidInput(minutes));
        }
        let rounded = minutes.round();
        if rounded > f64::from(u32::MAX) {
            return Err(ReadingTimeError::InvalidInput(minutes));
        }
        let rounded = rounded as u32;

        let units = (f64::from(rounded) / MINUTES_PER_UNIT).round() as u32;
        let glyphs = if units > MAX_PRIMARY_UNITS {
            let count = (f64::from(units) / E).round() as usize;
            self.alternate_glyph.repeat(count)
        } else {
            self.primary_glyph.repeat(units.max(1) as usize)
        };

        Ok(format!("{glyphs} {rounded} min read"))
    }
}

/// Format a reading-time label with the stock glyphs.
pub fn format_reading_time(minutes: f64) -> Result<String, ReadingTimeError> {
    ReadingTimeFormatter::default().format(minutes)
}

/// Estimate the minutes needed to read a markdown document.
///
/// Whitespace-separated runs count as one word each, except that every CJK
/// character counts as a word of its own (those scripts don't separate words
/// with spaces). A `words_per_minute` of zero yields zero.
pub fn estimate_reading_minutes(markdown: &str, words_per_minute: u32) -> f64 {
    if words_per_minute == 0 {
        return 0.0;
    }
    f64::from(count_words(markdown)) / f64::from(words_per_minute)
}

fn count_words(text: &str) -> u32 {
    let mut count = 0u32;
    for token in text.split_whitespace() {
        let mut in_word = false;
        for c in token.chars() {
            if is_cjk(c) {
                count += 1;
                in_word = false;
            } else if c.is_alphanumeric() && !in_word {
                count += 1;
                in_word = true;
            }
        }
    }
    count
}

fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{30FF}'   // Hiragana, Katakana
        | '\u{3400}'..='\u{4DBF}' // CJK Extension A
        | '\u{4E00}'..='\u{9FFF}' // CJK Unified Ideographs
        | '\u{AC00}'..='\u{D7AF}' // Hangul syllables
        | '\u{F900}'..='\u{FAFF}' // CJK Compatibility Ideographs
    )
}
