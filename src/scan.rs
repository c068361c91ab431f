//! Content scanning and the post index.
//!
//! Stage 1 of the build. Loads `config.toml`, walks the posts directory, and
//! parses every markdown file into a [`Post`].
//!
//! ## Directory Structure
//!
//! ```text
//! content/                         # Content root
//! ├── config.toml                  # Site configuration (optional)
//! └── posts/                       # `posts_dir`
//!     ├── hello-world.md
//!     ├── hello-world.zh.md        # Translation of hello-world
//!     └── typed-styles/
//!         ├── index.md
//!         ├── index.zh.md
//!         └── banner.jpg           # Copied next to both rendered pages
//! ```
//!
//! ## Document-Index Order
//!
//! Files are visited sorted by path. That order is kept in
//! [`ContentIndex::posts`] and is the order in which translation candidates are
//! offered to [`resolve_alternate`](crate::alternate::resolve_alternate), so
//! "the first alternate" is deterministic: with `hello.fr.md` and `hello.zh.md`
//! both present, an English `hello.md` links to the French one.
//!
//! ## Validation
//!
//! Everything `build` could trip over is rejected here, before any file is
//! written:
//!
//! - Front matter, dates, slugs and locale tags (see [`crate::post`])
//! - Two posts may not share both slug and locale
//! - A post may not render to a home page (`posts/zh.md` → `/zh/`)
//! - Drafts (`draft = true`) are skipped

use crate::alternate::{AlternateReference, resolve_alternate};
use crate::config::{self, SiteConfig};
use crate::naming;
use crate::post::{Post, PostError};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Post error: {0}")]
    Post(#[from] PostError),
    #[error("Posts directory not found: {0}")]
    MissingPostsDir(PathBuf),
    #[error("Duplicate post '{slug}' in locale '{locale}': {first} and {second}")]
    DuplicatePost {
        slug: String,
        locale: String,
        first: String,
        second: String,
    },
    #[error("Post {source_path} and the home page of '{locale}' both render to {link}")]
    PathConflict {
        source_path: String,
        locale: String,
        link: String,
    },
}

/// Every post of the site, in document-index order.
#[derive(Debug, Default, Serialize)]
pub struct ContentIndex {
    pub posts: Vec<Post>,
}

impl ContentIndex {
    /// Build an index, rejecting duplicate `(slug, locale)` pairs.
    pub fn new(posts: Vec<Post>) -> Result<Self, ScanError> {
        let mut seen: HashMap<(&str, &str), &str> = HashMap::new();
        for post in &posts {
            let key = (post.slug.as_str(), post.locale.as_str());
            if let Some(first) = seen.insert(key, post.source_path.as_str()) {
                return Err(ScanError::DuplicatePost {
                    slug: post.slug.clone(),
                    locale: post.locale.clone(),
                    first: first.to_string(),
                    second: post.source_path.clone(),
                });
            }
        }
        Ok(Self { posts })
    }

    /// Posts sharing `slug`, lazily, in document-index order.
    pub fn siblings<'a>(&'a self, slug: &'a str) -> impl Iterator<Item = &'a Post> + 'a {
        self.posts.iter().filter(move |p| p.slug == slug)
    }

    /// The translated counterpart of `post`, if any.
    pub fn alternate_of(&self, post: &Post) -> Option<AlternateReference> {
        resolve_alternate(&post.locale, &post.slug, self.siblings(&post.slug))
    }

    /// Locales that get a home page: the default locale, then every other
    /// locale with posts, in document-index order.
    pub fn home_locales<'a>(&'a self, default_locale: &'a str) -> Vec<&'a str> {
        let mut locales = vec![default_locale];
        for post in &self.posts {
            if !locales.contains(&post.locale.as_str()) {
                locales.push(&post.locale);
            }
        }
        locales
    }

    /// Reject posts whose page would overwrite a home page.
    pub fn check_home_conflicts(&self, default_locale: &str) -> Result<(), ScanError> {
        for locale in self.home_locales(default_locale) {
            let link = naming::locale_home(locale, default_locale);
            if let Some(post) = self.posts.iter().find(|p| p.link == link) {
                return Err(ScanError::PathConflict {
                    source_path: post.source_path.clone(),
                    locale: locale.to_string(),
                    link,
                });
            }
        }
        Ok(())
    }

    pub fn find(&self, slug: &str, locale: &str) -> Option<&Post> {
        self.posts
            .iter()
            .find(|p| p.slug == slug && p.locale == locale)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

/// Output of the scan stage.
#[derive(Debug, Serialize)]
pub struct Manifest {
    pub index: ContentIndex,
    /// Number of draft posts that were skipped.
    pub drafts: usize,
    pub config: SiteConfig,
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    // Load site config (uses defaults if config.toml doesn't exist)
    let config = config::load_config(root)?;
    let locales = config.locale_table();

    let posts_dir = root.join(&config.posts_dir);
    if !posts_dir.is_dir() {
        return Err(ScanError::MissingPostsDir(posts_dir));
    }

    let mut posts = Vec::new();
    let mut drafts = 0;
    for entry in WalkDir::new(&posts_dir).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_markdown(path) {
            continue;
        }
        let relative = path.strip_prefix(&posts_dir).unwrap_or(path);
        let post = Post::load(path, relative, &config, &locales)?;
        if post.draft {
            log::debug!("skipping draft {}", post.source_path);
            drafts += 1;
            continue;
        }
        log::debug!("scanned {} → {}", post.source_path, post.link);
        posts.push(post);
    }

    let index = ContentIndex::new(posts)?;
    index.check_home_conflicts(&config.default_locale)?;
    Ok(Manifest {
        index,
        drafts,
        config,
    })
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}
