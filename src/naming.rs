//! Post file naming convention.
//!
//! A post's slug and locale come from its path under the posts directory.
//! Two layouts are supported, and may be mixed:
//!
//! ```text
//! posts/
//! ├── hello-world.md           # slug "hello-world", default locale
//! ├── hello-world.zh.md        # slug "hello-world", locale "zh"
//! └── typed-styles/
//!     ├── index.md             # slug "typed-styles", default locale
//!     ├── index.zh.md          # slug "typed-styles", locale "zh"
//!     └── banner.jpg
//! ```
//!
//! A trailing `.<tag>` is only read as a locale when `<tag>` is a configured
//! locale, so `release-v1.2.md` keeps its dots in the slug.

use crate::locale::LocaleTable;
use std::path::Path;

const INDEX_STEM: &str = "index";

/// Result of parsing a post path like `hello-world.zh.md`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPostName {
    pub slug: String,
    /// Locale from the file name, if any.
    pub locale: Option<String>,
}

/// Split a file stem into name and optional locale suffix.
///
/// - `"hello-world"` → ("hello-world", None)
/// - `"hello-world.zh"` → ("hello-world", Some("zh")) when `zh` is known
/// - `"release-v1.2"` → ("release-v1.2", None)
pub fn split_locale_suffix<'a>(stem: &'a str, locales: &LocaleTable) -> (&'a str, Option<&'a str>) {
    match stem.rsplit_once('.') {
        Some((name, suffix)) if !name.is_empty() && locales.is_known(suffix) => {
            (name, Some(suffix))
        }
        _ => (stem, None),
    }
}

/// Parse a post's path (relative to the posts directory).
///
/// Returns `None` for paths without a usable slug, e.g. `index.md` directly
/// inside the posts directory.
pub fn parse_post_path(relative: &Path, locales: &LocaleTable) -> Option<ParsedPostName> {
    let stem = relative.file_stem()?.to_str()?;
    let (name, locale) = split_locale_suffix(stem, locales);

    let slug = if name == INDEX_STEM {
        relative.parent()?.file_name()?.to_str()?.to_string()
    } else {
        name.to_string()
    };
    if slug.is_empty() {
        return None;
    }

    Some(ParsedPostName {
        slug,
        locale: locale.map(str::to_string),
    })
}

/// Site-relative link of a post: `/<slug>/` in the default locale,
/// `/<locale>/<slug>/` otherwise.
pub fn post_link(slug: &str, locale: &str, default_locale: &str) -> String {
    if locale == default_locale {
        format!("/{slug}/")
    } else {
        format!("/{locale}/{slug}/")
    }
}

/// Site-relative home of a locale: `/` for the default locale, `/<locale>/` otherwise.
pub fn locale_home(locale: &str, default_locale: &str) -> String {
    if locale == default_locale {
        "/".to_string()
    } else {
        format!("/{locale}/")
    }
}
