//! HTML site generation.
//!
//! Stage 2 of the build. Takes the scan [`Manifest`] and writes the final
//! static site.
//!
//! ## Generated Pages
//!
//! - **Post pages** (`/{slug}/index.html`, `/{locale}/{slug}/index.html`)
//! - **Home pages** (`/index.html`, `/{locale}/index.html`): posts of the
//!   locale, newest first
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                 # Home of the default locale
//! ├── hello-world/
//! │   └── index.html
//! ├── typed-styles/
//! │   ├── index.html
//! │   └── banner.jpg             # Copied from posts/typed-styles/
//! └── zh/
//!     ├── index.html             # Home of zh
//!     ├── hello-world/
//!     │   └── index.html
//!     └── typed-styles/
//!         ├── index.html
//!         └── banner.jpg
//! ```
//!
//! ## Parallelism
//!
//! Post pages are rendered and written in parallel with
//! [rayon](https://docs.rs/rayon). Every worker only reads the manifest and
//! writes its own directory, so no coordination is needed.
//!
//! ## CSS
//!
//! `static/post.css` is embedded at compile time; color and theme custom
//! properties generated from config are prepended, and the result is inlined
//! into every page.

use crate::config::SiteConfig;
use crate::date::parse_post_date;
use crate::locale::LocaleTable;
use crate::naming;
use crate::post::Post;
use crate::scan::{ContentIndex, Manifest};
use crate::template::{RenderContext, RenderError, render_index, render_post};
use crate::theme;
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Reverse;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// One written page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedPage {
    pub title: String,
    pub locale: String,
    /// Path relative to the output directory, `/`-separated.
    pub path: String,
    /// Files copied next to the page.
    pub assets: usize,
}

/// Everything [`generate`] wrote, in document-index order.
#[derive(Debug, Default, Serialize)]
pub struct GenerateReport {
    pub posts: Vec<GeneratedPage>,
    pub homes: Vec<GeneratedPage>,
}

const CSS_STATIC: &str = include_str!("../static/post.css");

/// The full stylesheet: generated custom properties followed by the base styles.
pub fn build_css(config: &SiteConfig) -> String {
    let color_css = theme::generate_color_css(&config.colors);
    let theme_css = theme::generate_theme_css(&config.theme);
    format!("{}\n\n{}\n\n{}", color_css, theme_css, CSS_STATIC)
}

/// Render the whole site from `manifest` into `output_dir`.
///
/// `source` is the content root the manifest was scanned from; assets of
/// directory-style posts are copied from there.
pub fn generate(
    manifest: &Manifest,
    source: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let config = &manifest.config;
    let locales = config.locale_table();
    let css = build_css(config);
    let ctx = RenderContext::new(config, &locales, &css);

    fs::create_dir_all(output_dir)?;

    let posts = manifest
        .index
        .posts
        .par_iter()
        .map(|post| write_post_page(post, &manifest.index, &ctx, source, output_dir))
        .collect::<Result<Vec<_>, _>>()?;

    let homes = write_homes(&manifest.index, &ctx, output_dir)?;

    log::debug!(
        "generated {} posts and {} home pages in {}",
        posts.len(),
        homes.len(),
        output_dir.display()
    );
    Ok(GenerateReport { posts, homes })
}

fn write_post_page(
    post: &Post,
    index: &ContentIndex,
    ctx: &RenderContext,
    source: &Path,
    output_dir: &Path,
) -> Result<GeneratedPage, GenerateError> {
    let alternate = index.alternate_of(post);
    let html = render_post(post, alternate.as_ref(), ctx)?;

    let page_dir = output_dir.join(link_dir(&post.link));
    fs::create_dir_all(&page_dir)?;
    fs::write(page_dir.join("index.html"), html.into_string())?;

    let assets = if is_directory_post(post, ctx.locales) {
        let post_source = source.join(&post.source_path);
        match post_source.parent() {
            Some(dir) => copy_assets(dir, &page_dir)?,
            None => 0,
        }
    } else {
        0
    };

    log::debug!("rendered {} → {}", post.source_path, post.link);
    Ok(GeneratedPage {
        title: post.title.clone(),
        locale: post.locale.clone(),
        path: page_path(&post.link),
        assets,
    })
}

/// Home pages: the default locale always, other locales when they have posts.
///
/// Conflicts with post pages were already rejected by the scan.
fn write_homes(
    index: &ContentIndex,
    ctx: &RenderContext,
    output_dir: &Path,
) -> Result<Vec<GeneratedPage>, GenerateError> {
    let default_locale = ctx.config.default_locale.as_str();
    let home_locales = index.home_locales(default_locale);

    let mut homes = Vec::with_capacity(home_locales.len());
    for locale in home_locales {
        let link = naming::locale_home(locale, default_locale);
        let mut posts: Vec<&Post> = index.posts.iter().filter(|p| p.locale == locale).collect();
        // Newest first; equal dates keep document-index order
        posts.sort_by_cached_key(|p| Reverse(parse_post_date(&p.date).ok()));

        let html = render_index(locale, &link, &posts, ctx)?;
        let page_dir = output_dir.join(link_dir(&link));
        fs::create_dir_all(&page_dir)?;
        fs::write(page_dir.join("index.html"), html.into_string())?;

        homes.push(GeneratedPage {
            title: ctx.config.title.clone(),
            locale: locale.to_string(),
            path: page_path(&link),
            assets: 0,
        });
    }
    Ok(homes)
}

/// Whether the post is `<slug>/index.md` (or a translation of it), whose
/// directory may hold images and other files.
fn is_directory_post(post: &Post, locales: &LocaleTable) -> bool {
    Path::new(&post.source_path)
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|stem| naming::split_locale_suffix(stem, locales).0 == "index")
        .unwrap_or(false)
}

/// Copy every non-markdown file under `src` into `dst`, keeping subdirectories.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || is_markdown(path) {
            continue;
        }
        let relative = path.strip_prefix(src).unwrap_or(path);
        let target = dst.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(path, &target)?;
        copied += 1;
    }
    Ok(copied)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}

/// `/zh/foo/` → `zh/foo`
fn link_dir(link: &str) -> PathBuf {
    link.split('/').filter(|s| !s.is_empty()).collect()
}

/// `/zh/foo/` → `zh/foo/index.html`
fn page_path(link: &str) -> String {
    format!("{}index.html", link.trim_start_matches('/'))
}

// ============================================================================
// Tests
// ============================================================================
