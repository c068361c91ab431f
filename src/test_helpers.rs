//! Shared test utilities for the timetree test suite.
//!
//! Provides fixture setup and lookup helpers that work with scan-phase data
//! structures (`Manifest`, `ContentIndex`, `Post`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let post = find_post(&manifest.index, "hello-world", "zh");
//! assert_eq!(post.link, "/zh/hello-world/");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::post::Post;
use crate::scan::ContentIndex;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write a post under `<root>/posts/`, creating parent directories.
pub fn write_post(root: &Path, relative: &str, content: &str) {
    let path = root.join("posts").join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

// =========================================================================
// Index lookups (panic with the available keys on miss)
// =========================================================================

/// Find a post by slug and locale. Panics if not found.
pub fn find_post<'a>(index: &'a ContentIndex, slug: &str, locale: &str) -> &'a Post {
    index.find(slug, locale).unwrap_or_else(|| {
        let keys = post_keys(index);
        panic!("post '{slug}' ({locale}) not found. Available: {keys:?}")
    })
}

/// All `(slug, locale)` pairs in document-index order.
pub fn post_keys(index: &ContentIndex) -> Vec<(&str, &str)> {
    index
        .posts
        .iter()
        .map(|p| (p.slug.as_str(), p.locale.as_str()))
        .collect()
}
