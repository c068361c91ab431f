//! Post documents.
//!
//! A post is a markdown file with TOML front matter between `+++` fences:
//!
//! ```text
//! +++
//! title = "Typed styles"
//! date = 2020-01-15
//! description = "Why theme tokens beat magic numbers."
//! lang = "zh"                       # optional, overrides the file name
//! slug = "typed-styles"             # optional, overrides the file name
//! banner = "banner.jpg"             # relative to the post's URL, or absolute
//! banner_credit = "Photo by [Jane](https://example.com)"
//! +++
//!
//! Body in **markdown**.
//! ```
//!
//! `title` and `date` are required. The date may be a TOML date or a string;
//! it must parse (see [`crate::date`]) and is kept as written.
//!
//! Slug and locale end up as URL and output directory segments: a locale must
//! be a plain tag ([`is_valid_tag`]) and a slug may not be `.`/`..` or
//! contain a path separator.
//!
//! ## Resolution
//!
//! - **Slug**: front matter `slug` (sanitized) → file name (see [`crate::naming`])
//! - **Locale**: front matter `lang` → file name suffix → `default_locale`
//! - **Link**: `/<slug>/`, or `/<locale>/<slug>/` outside the default locale

use crate::alternate::LocaleVariant;
use crate::config::SiteConfig;
use crate::date::{DateError, parse_post_date};
use crate::locale::{LocaleTable, is_valid_tag};
use crate::naming;
use crate::reading_time::estimate_reading_minutes;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Post must begin with a `+++` front matter fence: {0}")]
    MissingFrontMatter(PathBuf),
    #[error("Missing closing `+++` front matter fence: {0}")]
    UnclosedFrontMatter(PathBuf),
    #[error("Invalid front matter in {0}: {1}")]
    FrontMatter(PathBuf, #[source] toml::de::Error),
    #[error("Front matter `date` must be a date or a string: {0}")]
    DateType(PathBuf),
    #[error("Invalid date in {0}: {1}")]
    Date(PathBuf, #[source] DateError),
    #[error("Cannot derive a slug for {0}")]
    MissingSlug(PathBuf),
    #[error("Slug {1:?} in {0} is not a single URL segment")]
    InvalidSlug(PathBuf, String),
    #[error("Locale {1:?} in {0} is not a valid locale tag")]
    InvalidLocale(PathBuf, String),
}

const FENCE: &str = "+++";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FrontMatter {
    title: String,
    date: toml::Value,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    lang: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    banner: Option<String>,
    #[serde(default)]
    banner_credit: Option<String>,
    #[serde(default)]
    draft: bool,
}

/// `date = 2020-01-15` and `date = "2020-01-15"` are both accepted.
fn date_text(value: toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s),
        toml::Value::Datetime(dt) => Some(dt.to_string()),
        _ => None,
    }
}

/// A parsed post, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    /// Path relative to the content root, `/`-separated.
    pub source_path: String,
    pub slug: String,
    pub locale: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// ISO-8601 date as written in the front matter.
    pub date: String,
    /// Site-relative or absolute banner URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    /// Markdown caption under the banner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_credit: Option<String>,
    /// Raw markdown body.
    pub body: String,
    pub reading_minutes: f64,
    /// Site-relative URL of the rendered page.
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_link: Option<String>,
    pub draft: bool,
}

impl LocaleVariant for Post {
    fn locale(&self) -> &str {
        &self.locale
    }
    fn slug(&self) -> &str {
        &self.slug
    }
    fn link(&self) -> &str {
        &self.link
    }
}

impl Post {
    /// Parse a post from its source text.
    ///
    /// `relative` is the file's path relative to the posts directory; it
    /// provides the slug and locale when the front matter doesn't.
    pub fn parse(
        input: &str,
        relative: &Path,
        config: &SiteConfig,
        locales: &LocaleTable,
    ) -> Result<Post, PostError> {
        let (front, body) = split_front_matter(input, relative)?;
        let meta: FrontMatter =
            toml::from_str(front).map_err(|e| PostError::FrontMatter(relative.to_path_buf(), e))?;

        let date = date_text(meta.date).ok_or_else(|| PostError::DateType(relative.to_path_buf()))?;
        parse_post_date(&date).map_err(|e| PostError::Date(relative.to_path_buf(), e))?;

        let parsed_name = naming::parse_post_path(relative, locales);
        let slug = match meta.slug.as_deref().map(sanitize_slug) {
            Some(slug) if !slug.is_empty() => slug,
            _ => parsed_name
                .as_ref()
                .map(|p| p.slug.clone())
                .ok_or_else(|| PostError::MissingSlug(relative.to_path_buf()))?,
        };
        let locale = meta
            .lang
            .or_else(|| parsed_name.and_then(|p| p.locale))
            .unwrap_or_else(|| config.default_locale.clone());
        if !is_path_segment(&slug) {
            return Err(PostError::InvalidSlug(relative.to_path_buf(), slug));
        }
        if !is_valid_tag(&locale) {
            return Err(PostError::InvalidLocale(relative.to_path_buf(), locale));
        }
        if !locales.is_known(&locale) {
            log::warn!(
                "{}: locale '{locale}' has no [locales.{locale}] strings, labels fall back to '{}'",
                relative.display(),
                config.default_locale
            );
        }

        let link = naming::post_link(&slug, &locale, &config.default_locale);
        let source_path = format!("{}/{}", config.posts_dir, to_slash(relative));
        let edit_link = config
            .edit_url_base
            .as_deref()
            .map(|base| format!("{}/{}", base.trim_end_matches('/'), source_path));
        let banner = meta.banner.map(|b| resolve_banner(&b, &link));

        Ok(Post {
            source_path,
            slug,
            locale,
            title: meta.title,
            description: meta.description,
            author: meta.author,
            date,
            banner,
            banner_credit: meta.banner_credit,
            reading_minutes: estimate_reading_minutes(body, config.reading_time.words_per_minute),
            body: body.to_string(),
            link,
            edit_link,
            draft: meta.draft,
        })
    }

    /// Read and parse a post file.
    pub fn load(
        path: &Path,
        relative: &Path,
        config: &SiteConfig,
        locales: &LocaleTable,
    ) -> Result<Post, PostError> {
        let content = std::fs::read_to_string(path)?;
        Post::parse(&content, relative, config, locales)
    }
}

/// Split `input` into (front matter, body).
fn split_front_matter<'a>(input: &'a str, path: &Path) -> Result<(&'a str, &'a str), PostError> {
    let input = input.trim_start_matches('\u{feff}');
    let rest = input
        .strip_prefix(FENCE)
        .and_then(|r| r.strip_prefix("\r\n").or_else(|| r.strip_prefix('\n')))
        .ok_or_else(|| PostError::MissingFrontMatter(path.to_path_buf()))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            let front = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok((front, body));
        }
        offset += line.len();
    }
    Err(PostError::UnclosedFrontMatter(path.to_path_buf()))
}

/// Relative banners live next to the rendered page.
fn resolve_banner(banner: &str, link: &str) -> String {
    if banner.starts_with('/') || banner.starts_with("http://") || banner.starts_with("https://") {
        banner.to_string()
    } else {
        format!("{link}{}", banner.trim_start_matches("./"))
    }
}

fn is_path_segment(s: &str) -> bool {
    !s.is_empty() && !s.chars().all(|c| c == '.') && !s.contains(['/', '\\'])
}

fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Sanitize a front matter slug for use in URLs.
///
/// - Lowercases ASCII letters
/// - Replaces anything but letters, digits, `-`, `_` and `.` with dashes
/// - Collapses consecutive dashes and strips them from both ends
/// - Returns an empty slug when only dots remain
pub fn sanitize_slug(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    let mut prev_dash = false;
    for c in raw.trim().chars() {
        let c = if c.is_alphanumeric() || c == '_' || c == '.' {
            c.to_ascii_lowercase()
        } else {
            '-'
        };
        if c == '-' {
            if !prev_dash {
                slug.push('-');
            }
            prev_dash = true;
        } else {
            slug.push(c);
            prev_dash = false;
        }
    }
    let slug = slug.trim_matches('-');
    if slug.chars().all(|c| c == '.') {
        return String::new();
    }
    slug.to_string()
}
