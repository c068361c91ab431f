//! # Timetree
//!
//! A small static blog renderer. Markdown posts with TOML front matter become
//! themed, SEO-annotated HTML pages with locale-aware dates, a link to the
//! post's translation, an "edit this post" link and an optional comment embed.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      content/  →  Manifest   (config + posts in document-index order)
//! 2. Generate  Manifest  →  dist/      (final HTML site)
//! ```
//!
//! The scan stage does all parsing and validation, so `check` can reject bad
//! content without writing anything. The generate stage only renders.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: loads config, walks the posts directory, builds the [`scan::ContentIndex`] |
//! | [`generate`] | Stage 2: renders every page in parallel and writes the site |
//! | [`config`] | `config.toml` loading, merging, validation and the stock config |
//! | [`locale`] | Per-locale display strings and tag resolution |
//! | [`naming`] | `<slug>.<locale>.md` file convention and link layout |
//! | [`post`] | Front matter parsing and the [`post::Post`] model |
//! | [`reading_time`] | Reading-time estimate and the glyph label |
//! | [`date`] | Locale-aware post date formatting |
//! | [`alternate`] | Finding a post's translated counterpart |
//! | [`theme`] | Color schemes and CSS custom properties |
//! | [`seo`] | Title, OpenGraph, Twitter card and JSON-LD head tags |
//! | [`layout`] | Document skeleton, header and footer |
//! | [`template`] | Post and home page templates |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Explicit Locale Table
//!
//! Every user-visible string that depends on language lives in the
//! [`locale::LocaleTable`] loaded from config and is passed to the renderers
//! as an argument. Nothing reads an ambient "current locale", so pages of
//! different languages render side by side on the rayon pool.
//!
//! ## Dates Are Never Passed Through
//!
//! A post date that cannot be parsed is a build error
//! ([`date::DateError::InvalidDate`]), not raw text on the page.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): malformed markup is
//! a compile error and all interpolation is escaped by default. Values embedded
//! in `<script>` blocks (JSON-LD, the comment embed) are JSON-encoded instead.

pub mod alternate;
pub mod config;
pub mod date;
pub mod generate;
pub mod layout;
pub mod locale;
pub mod naming;
pub mod output;
pub mod post;
pub mod reading_time;
pub mod scan;
pub mod seo;
pub mod template;
pub mod theme;

#[cfg(test)]
pub(crate) mod test_helpers;
