//! Translated-counterpart lookup.
//!
//! Posts that share a slug are translations of each other. When rendering one
//! of them, the page offers a link to a counterpart in another language. The
//! content index supplies the candidates (see
//! [`ContentIndex::siblings`](crate::scan::ContentIndex::siblings)); this module
//! picks one.
//!
//! When several translations exist, the **first** match in document-index order
//! wins. The candidates are consumed lazily and iteration stops at that match.

use crate::locale::LocaleTable;
use serde::Serialize;

/// A translated counterpart of the current document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlternateReference {
    pub locale: String,
    pub link: String,
}

/// Anything that can stand in as a locale variant of a document.
pub trait LocaleVariant {
    fn locale(&self) -> &str;
    fn slug(&self) -> &str;
    fn link(&self) -> &str;
}

impl<T: LocaleVariant + ?Sized> LocaleVariant for &T {
    fn locale(&self) -> &str {
        (**self).locale()
    }
    fn slug(&self) -> &str {
        (**self).slug()
    }
    fn link(&self) -> &str {
        (**self).link()
    }
}

/// A bare `(locale, slug, link)` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRecord {
    pub locale: String,
    pub slug: String,
    pub link: String,
}

impl VariantRecord {
    pub fn new(locale: &str, slug: &str, link: &str) -> Self {
        Self {
            locale: locale.to_string(),
            slug: slug.to_string(),
            link: link.to_string(),
        }
    }
}

impl LocaleVariant for VariantRecord {
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

/// Find the first sibling with the same slug and a different locale.
///
/// Returns `None` when the document has no translation.
pub fn resolve_alternate<I>(
    current_locale: &str,
    current_slug: &str,
    siblings: I,
) -> Option<AlternateReference>
where
    I: IntoIterator,
    I::Item: LocaleVariant,
{
    siblings
        .into_iter()
        .find(|doc| doc.slug() == current_slug && doc.locale() != current_locale)
        .map(|doc| AlternateReference {
            locale: doc.locale().to_string(),
            link: doc.link().to_string(),
        })
}

/// What the alternate-language box shows: the lead-in, the link, and its label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternateLink {
    /// Lead-in in the *current* locale ("This article is also available in:").
    pub prompt: String,
    /// Language name of the alternate ("中文").
    pub label: String,
    pub href: String,
}

impl AlternateLink {
    pub fn new(current_locale: &str, reference: &AlternateReference, locales: &LocaleTable) -> Self {
        let (_, strings) = locales.resolve(Some(current_locale));
        let prompt = strings.alternate_label.clone();
        Self {
            prompt,
            label: locales.language_name(&reference.locale).to_string(),
            href: reference.link.clone(),
        }
    }
}
