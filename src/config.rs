//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by the user's `config.toml` in the content root.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "Timetree"
//! canonical_url = "https://example.com"   # No trailing slash needed
//! default_locale = "en"                   # Must have a [locales.<tag>] section
//! default_image = "/social.png"           # Social card fallback
//! posts_dir = "posts"
//! # author = "Jane Doe"
//! # twitter_creator = "@jane"
//! # edit_url_base = "https://github.com/jane/blog/edit/main/content"
//!
//! [reading_time]
//! words_per_minute = 200
//! primary_glyph = "🥐"
//! alternate_glyph = "🍳"
//!
//! [comments]
//! # disqus_shortname = "my-blog"
//!
//! [locales.en]
//! name = "English"
//! alternate_label = "This article is also available in:"
//! ...
//!
//! [colors.dark]  /  [colors.light]  /  [theme]  /  [processing]
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [locales.zh]
//! edit_label = "在 GitHub 上编辑"
//! ```
//!
//! Tables merge key by key, so the example above keeps every other `zh` string
//! and the whole `en` locale. Unknown keys are rejected to catch typos early.

use crate::locale::{LocaleStrings, LocaleTable, is_valid_tag, stock_locales};
use crate::reading_time::{ALTERNATE_GLYPH, PRIMARY_GLYPH, ReadingTimeFormatter};
use crate::theme::{ColorConfig, ThemeConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site title; also the page title fallback.
    pub title: String,
    /// Absolute origin of the published site, used for canonical and share URLs.
    pub canonical_url: String,
    /// Locale of unprefixed URLs and of dates without an explicit locale.
    pub default_locale: String,
    /// Site-relative path of the social card used when a post has no banner.
    pub default_image: String,
    /// Directory under the content root holding the posts.
    pub posts_dir: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Twitter handle for `twitter:creator`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_creator: Option<String>,
    /// Prefix of "edit this post" links; the post's content-relative path is appended.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_url_base: Option<String>,
    pub reading_time: ReadingTimeConfig,
    pub comments: CommentsConfig,
    /// Display strings per locale tag.
    pub locales: BTreeMap<String, LocaleStrings>,
    pub colors: ColorConfig,
    pub theme: ThemeConfig,
    pub processing: ProcessingConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Timetree".to_string(),
            canonical_url: "https://example.com".to_string(),
            default_locale: "en".to_string(),
            default_image: "/social.png".to_string(),
            posts_dir: "posts".to_string(),
            author: None,
            twitter_creator: None,
            edit_url_base: None,
            reading_time: ReadingTimeConfig::default(),
            comments: CommentsConfig::default(),
            locales: stock_locales(),
            colors: ColorConfig::default(),
            theme: ThemeConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.canonical_url.starts_with("http://") || self.canonical_url.starts_with("https://"))
        {
            return Err(ConfigError::Validation(
                "canonical_url must start with http:// or https://".into(),
            ));
        }
        if !self.locales.contains_key(&self.default_locale) {
            return Err(ConfigError::Validation(format!(
                "default_locale '{}' has no [locales.{}] section",
                self.default_locale, self.default_locale
            )));
        }
        for (tag, strings) in &self.locales {
            if !is_valid_tag(tag) {
                return Err(ConfigError::Validation(format!(
                    "locale tag {tag:?} must be letters and digits separated by '-' or '_'"
                )));
            }
            if strings.months.len() != 12 {
                return Err(ConfigError::Validation(format!(
                    "locales.{tag}.months must list 12 months, found {}",
                    strings.months.len()
                )));
            }
            if strings.date_format.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "locales.{tag}.date_format must not be empty"
                )));
            }
        }
        if self.reading_time.words_per_minute == 0 {
            return Err(ConfigError::Validation(
                "reading_time.words_per_minute must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// The locale table handed to the renderers.
    pub fn locale_table(&self) -> LocaleTable {
        LocaleTable::new(self.default_locale.clone(), self.locales.clone())
    }

    /// Canonical origin without a trailing slash.
    pub fn site_origin(&self) -> &str {
        self.canonical_url.trim_end_matches('/')
    }

    /// Absolute URL of a site-relative path.
    pub fn absolute_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.site_origin(), path.trim_start_matches('/'))
    }
}

/// Reading-time estimate and label settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReadingTimeConfig {
    /// Reading speed used to estimate minutes from word count.
    pub words_per_minute: u32,
    /// Glyph for every five minutes of a short read.
    pub primary_glyph: String,
    /// Glyph used once a read needs more than five primary glyphs.
    pub alternate_glyph: String,
}

impl Default for ReadingTimeConfig {
    fn default() -> Self {
        Self {
            words_per_minute: 200,
            primary_glyph: PRIMARY_GLYPH.to_string(),
            alternate_glyph: ALTERNATE_GLYPH.to_string(),
        }
    }
}

impl ReadingTimeConfig {
    pub fn formatter(&self) -> ReadingTimeFormatter {
        ReadingTimeFormatter::new(self.primary_glyph.clone(), self.alternate_glyph.clone())
    }
}

/// Comment widget settings. No widget is embedded unless a shortname is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommentsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disqus_shortname: Option<String>,
}

/// Parallel rendering settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel rendering workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    let config = resolve_config(base, overlay)?;
    log::debug!(
        "loaded config from {} ({} locales)",
        root.display(),
        config.locales.len()
    );
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Timetree Configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Each section only needs the keys it wants to override.
# Unknown keys will cause an error.

# Site title, also used as the page title fallback.
title = "Timetree"

# Absolute origin of the published site (canonical and share URLs).
canonical_url = "https://example.com"

# Locale of unprefixed URLs and of dates without an explicit locale.
# Must have a [locales.<tag>] section below.
default_locale = "en"

# Social card image used when a post has no banner.
default_image = "/social.png"

# Directory under the content root holding the posts.
posts_dir = "posts"

# author = "Jane Doe"
# twitter_creator = "@jane"

# Prefix of "edit this post" links; the post's path under the content root
# is appended.
# edit_url_base = "https://github.com/jane/blog/edit/main/content"

# ---------------------------------------------------------------------------
# Reading time
# ---------------------------------------------------------------------------
[reading_time]
# Reading speed used to estimate minutes from word count.
words_per_minute = 200
# One primary glyph per five minutes; long reads switch to the alternate.
primary_glyph = "🥐"
alternate_glyph = "🍳"

# ---------------------------------------------------------------------------
# Comments
# ---------------------------------------------------------------------------
[comments]
# Disqus shortname. Leave unset to render posts without comments.
# disqus_shortname = "my-blog"

# ---------------------------------------------------------------------------
# Locales
# ---------------------------------------------------------------------------
# date_format placeholders: {month} {month_number} {day} {year}
[locales.en]
name = "English"
alternate_label = "This article is also available in:"
discuss_label = "Discuss on Twitter"
edit_label = "Edit on GitHub"
description = "A technical blog"
months = ["January", "February", "March", "April", "May", "June", "July", "August", "September", "October", "November", "December"]
date_format = "{month} {day}, {year}"

[locales.zh]
name = "中文"
alternate_label = "本文还有以下语言版本："
discuss_label = "在 Twitter 上讨论"
edit_label = "去 GitHub 编辑"
description = "报时树技术博客"
months = ["1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月"]
date_format = "{year}年{month_number}月{day}日"

# ---------------------------------------------------------------------------
# Colors - Dark mode (initial)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#22264A"
text = "#ADB2DC"
heading = "#ffffff"
muted = "#6870AF"        # Captions, secondary text
border = "#343C7A"
surface = "#282E5E"      # Alternate-language box
link = "#d23669"
accent = "#FFCC68"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#EFEFF5"
text = "#535988"
heading = "#100F4D"
muted = "#4b547d"
border = "#D8D8E5"
surface = "#F5F5F5"
link = "#d23669"
accent = "#b54909"

# ---------------------------------------------------------------------------
# Theme / layout
# ---------------------------------------------------------------------------
[theme]
font_sans = 'Muli, "San Francisco", "SF Pro Text", -apple-system, system-ui, BlinkMacSystemFont, Roboto, "Helvetica Neue", "Segoe UI", Arial, sans-serif'
font_serif = "Georgia, serif"
font_mono = '"Source Code Pro", "Fira Code", "Fira Mono", "Roboto Mono", "Lucida Console", Monaco, monospace'
container_base = "784px"
container_lg = "1200px"
transition = ".2s ease-in-out all"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel rendering workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_valid() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn default_config_has_stock_locales() {
        let config = SiteConfig::default();
        assert_eq!(config.default_locale, "en");
        assert!(config.locales.contains_key("en"));
        assert!(config.locales.contains_key("zh"));
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
title = "My Blog"

[colors.light]
accent = "#000000"
"##;
        let overlay: toml::Value = toml::from_str(toml).unwrap();
        let config = resolve_config(stock_defaults_value(), Some(overlay)).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.colors.light.accent, "#000000");
        // Default values preserved
        assert_eq!(config.colors.light.background, "#EFEFF5");
        assert_eq!(config.colors.dark.background, "#22264A");
    }

    #[test]
    fn partial_color_scheme_without_merge_is_error() {
        let toml = r##"
[colors.light]
accent = "#000000"
"##;
        let result: Result<SiteConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn locale_table_mirrors_config() {
        let mut config = SiteConfig::default();
        config.default_locale = "zh".to_string();
        let table = config.locale_table();
        assert_eq!(table.default_locale(), "zh");
        assert_eq!(table.tags().count(), 2);
    }

    #[test]
    fn absolute_url_joins_origin_and_path() {
        let mut config = SiteConfig::default();
        config.canonical_url = "https://blog.example.org/".to_string();
        assert_eq!(
            config.absolute_url("/zh/foo/"),
            "https://blog.example.org/zh/foo/"
        );
        assert_eq!(
            config.absolute_url("social.png"),
            "https://blog.example.org/social.png"
        );
        assert_eq!(
            config.absolute_url("https://cdn.example.org/a.png"),
            "https://cdn.example.org/a.png"
        );
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
canonical_url = "https://gregberge.example"
edit_url_base = "https://github.com/me/blog/edit/main/content"

[comments]
disqus_shortname = "timetree"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.canonical_url, "https://gregberge.example");
        assert_eq!(
            config.edit_url_base.as_deref(),
            Some("https://github.com/me/blog/edit/main/content")
        );
        assert_eq!(config.comments.disqus_shortname.as_deref(), Some("timetree"));
        // Unspecified values should be defaults
        assert_eq!(config.reading_time.words_per_minute, 200);
    }

    #[test]
    fn load_config_merges_locale_tables() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[locales.zh]
edit_label = "在 GitHub 上编辑"

[locales.fr]
name = "Français"
alternate_label = "Cet article est aussi disponible en :"
months = ["janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre", "octobre", "novembre", "décembre"]
date_format = "{day} {month} {year}"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.locales.len(), 3);
        let zh = &config.locales["zh"];
        assert_eq!(zh.edit_label, "在 GitHub 上编辑");
        // Other zh strings survive the merge
        assert_eq!(zh.description, "报时树技术博客");
        let fr = &config.locales["fr"];
        assert_eq!(fr.name, "Français");
        // Omitted keys of a brand-new locale come from the English defaults
        assert_eq!(fr.edit_label, "Edit on GitHub");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[reading_time]
words_per_minut = 250
"#,
        )
        .unwrap();
        let err = load_config(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("unknown field"));
    }

    #[test]
    fn unknown_nested_locale_key_rejected() {
        let toml_str = r#"
[locales.en]
edit = "Edit"
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_rejects_path_like_locale_tag() {
        let mut config = SiteConfig::default();
        config
            .locales
            .insert("../x".to_string(), LocaleStrings::english());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("../x"));
    }

    #[test]
    fn validate_default_locale_must_exist() {
        let mut config = SiteConfig::default();
        config.default_locale = "fr".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("default_locale"));
    }

    #[test]
    fn validate_month_count() {
        let mut config = SiteConfig::default();
        config.locales.get_mut("en").unwrap().months.pop();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("12 months"));
    }

    #[test]
    fn validate_canonical_url_scheme() {
        let mut config = SiteConfig::default();
        config.canonical_url = "example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_words_per_minute() {
        let mut config = SiteConfig::default();
        config.reading_time.words_per_minute = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), r#"default_locale = "de""#).unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str(r#"title = "a""#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"title = "b""#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("title").unwrap().as_str(), Some("b"));
    }

    #[test]
    fn merge_toml_deep_nested() {
        let base: toml::Value = toml::from_str(
            r##"
[colors.light]
background = "#fff"
text = "#000"
"##,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r##"
[colors.light]
background = "#fafafa"
"##,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let light = merged.get("colors").unwrap().get("light").unwrap();
        assert_eq!(light.get("background").unwrap().as_str(), Some("#fafafa"));
        assert_eq!(light.get("text").unwrap().as_str(), Some("#000"));
    }

    #[test]
    fn merge_toml_arrays_replace() {
        let base: toml::Value = toml::from_str(r#"months = ["a", "b"]"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"months = ["c"]"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("months").unwrap().as_array().unwrap().len(), 1);
    }

    // =========================================================================
    // Processing config tests
    // =========================================================================

    #[test]
    fn effective_threads_user_constrains_down() {
        let config = ProcessingConfig {
            max_processes: Some(1),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    #[test]
    fn effective_threads_never_zero() {
        let config = ProcessingConfig {
            max_processes: Some(0),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    #[test]
    fn effective_threads_clamped_to_cores() {
        let config = ProcessingConfig {
            max_processes: Some(99999),
        };
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(effective_threads(&config), cores);
    }

    // =========================================================================
    // stock config tests
    // =========================================================================

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value();
        assert!(val.is_table());
        for key in [
            "reading_time",
            "comments",
            "locales",
            "colors",
            "theme",
            "processing",
        ] {
            assert!(val.get(key).is_some(), "missing {key}");
        }
        assert!(val.get("author").is_none());
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn reading_time_formatter_uses_configured_glyphs() {
        let mut config = ReadingTimeConfig::default();
        config.primary_glyph = "☕".to_string();
        assert_eq!(config.formatter().format(5.0).unwrap(), "☕ 5 min read");
    }
}
