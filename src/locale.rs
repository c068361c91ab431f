//! Per-locale display strings.
//!
//! Every piece of user-visible text that changes with the post's language lives
//! in a [`LocaleStrings`] entry: the language's display name, the labels of the
//! alternate-language box and the edit/discuss links, the site description used
//! as an SEO fallback, and the month names and pattern used to render dates.
//!
//! The table is loaded once as part of [`SiteConfig`](crate::config::SiteConfig)
//! (`[locales.<tag>]` sections of `config.toml`) and handed to the renderers
//! explicitly.
//!
//! ## Tag Resolution
//!
//! [`LocaleTable::resolve`] looks a tag up in three steps:
//!
//! ```text
//! "zh-CN" → exact "zh-CN"? → primary subtag "zh"? → default locale
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Display strings for one locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocaleStrings {
    /// Name of the language in that language (`"English"`, `"中文"`).
    pub name: String,
    /// Lead-in of the box linking to a translated post.
    pub alternate_label: String,
    /// Label of the "discuss this post" link.
    pub discuss_label: String,
    /// Label of the "edit this post" link.
    pub edit_label: String,
    /// Site description used when a page has none of its own.
    pub description: String,
    /// Full month names, January first.
    pub months: Vec<String>,
    /// Date pattern. Placeholders: `{month}` (name), `{month_number}`, `{day}`, `{year}`.
    pub date_format: String,
}

impl Default for LocaleStrings {
    fn default() -> Self {
        Self::english()
    }
}

impl LocaleStrings {
    pub fn english() -> Self {
        Self {
            name: "English".to_string(),
            alternate_label: "This article is also available in:".to_string(),
            discuss_label: "Discuss on Twitter".to_string(),
            edit_label: "Edit on GitHub".to_string(),
            description: "A technical blog".to_string(),
            months: [
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ]
            .iter()
            .map(|m| m.to_string())
            .collect(),
            date_format: "{month} {day}, {year}".to_string(),
        }
    }

    pub fn chinese() -> Self {
        Self {
            name: "中文".to_string(),
            alternate_label: "本文还有以下语言版本：".to_string(),
            discuss_label: "在 Twitter 上讨论".to_string(),
            edit_label: "去 GitHub 编辑".to_string(),
            description: "报时树技术博客".to_string(),
            months: (1..=12).map(|m| format!("{m}月")).collect(),
            date_format: "{year}年{month_number}月{day}日".to_string(),
        }
    }

    /// Month name for a 1-based month number.
    pub fn month_name(&self, month: u32) -> Option<&str> {
        let index = usize::try_from(month).ok()?.checked_sub(1)?;
        self.months.get(index).map(String::as_str)
    }
}

/// All configured locales plus the one used when none is requested.
///
/// The default locale always resolves. When the map has no entry for it, the
/// stock English strings stand in.
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleTable {
    default_locale: String,
    default_strings: LocaleStrings,
    locales: BTreeMap<String, LocaleStrings>,
}

impl Default for LocaleTable {
    fn default() -> Self {
        Self::new("en", stock_locales())
    }
}

/// The locales shipped with the stock configuration.
pub fn stock_locales() -> BTreeMap<String, LocaleStrings> {
    let mut locales = BTreeMap::new();
    locales.insert("en".to_string(), LocaleStrings::english());
    locales.insert("zh".to_string(), LocaleStrings::chinese());
    locales
}

/// Whether `tag` is usable as a locale tag: ASCII letters and digits in
/// `-`/`_`-separated subtags (`en`, `zh-CN`, `pt_BR`).
///
/// Tags become URL and directory segments, so nothing else is accepted.
pub fn is_valid_tag(tag: &str) -> bool {
    !tag.is_empty()
        && tag
            .split(['-', '_'])
            .all(|sub| !sub.is_empty() && sub.chars().all(|c| c.is_ascii_alphanumeric()))
}

impl LocaleTable {
    pub fn new(default_locale: impl Into<String>, locales: BTreeMap<String, LocaleStrings>) -> Self {
        let default_locale = default_locale.into();
        let default_strings = match locales.get(&default_locale) {
            Some(strings) => strings.clone(),
            None => {
                log::warn!("no strings for default locale '{default_locale}', using English");
                LocaleStrings::english()
            }
        };
        Self {
            default_locale,
            default_strings,
            locales,
        }
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Configured tags in sorted order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    /// Whether `tag` names a configured locale (exact match only).
    pub fn is_known(&self, tag: &str) -> bool {
        self.locales.contains_key(tag)
    }

    /// Resolve an optional tag to a configured locale.
    ///
    /// Returns the matched tag together with its strings. Falls back to the
    /// default locale when the tag is absent or unknown.
    pub fn resolve(&self, tag: Option<&str>) -> (&str, &LocaleStrings) {
        if let Some(tag) = tag {
            if let Some((key, strings)) = self.locales.get_key_value(tag) {
                return (key.as_str(), strings);
            }
            let primary = tag.split(['-', '_']).next().unwrap_or(tag);
            if let Some((key, strings)) = self.locales.get_key_value(primary) {
                return (key.as_str(), strings);
            }
            log::debug!(
                "unknown locale '{tag}', falling back to '{}'",
                self.default_locale
            );
        }
        (self.default_locale.as_str(), &self.default_strings)
    }

    /// Display name of a locale, or the tag itself when it isn't configured.
    pub fn language_name<'a>(&'a self, tag: &'a str) -> &'a str {
        self.locales
            .get(tag)
            .map(|l| l.name.as_str())
            .unwrap_or(tag)
    }
}
