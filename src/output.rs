//! CLI output formatting for the build stages.
//!
//! Output is **information-centric, not file-centric**: every post leads with
//! its positional index, title and locale, and file paths follow as indented
//! context lines.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Posts
//! 001 Hello, world [en]
//!     Source: posts/hello-world.md
//!     Link: /hello-world/
//!     Translation: zh → /zh/hello-world/
//!     The *first* post.
//! 002 你好，世界 [zh]
//!     ...
//!
//! Drafts
//!     1 skipped
//!
//! Config
//!     config.toml
//! ```
//!
//! ## Generate
//!
//! ```text
//! Posts
//! 001 Hello, world → hello-world/index.html
//! 004 Typed styles → typed-styles/index.html (1 asset)
//!
//! Home pages
//! en → index.html
//! zh → zh/index.html
//!
//! Generated 5 posts, 2 home pages
//! ```
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout.

use crate::generate::GenerateReport;
use crate::scan::Manifest;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

/// Format scan stage output: every post with its source, link and translation.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Posts".to_string());
    for (i, post) in manifest.index.posts.iter().enumerate() {
        lines.push(format!(
            "{} {} [{}]",
            format_index(i + 1),
            post.title,
            post.locale
        ));
        lines.push(format!("    Source: {}", post.source_path));
        lines.push(format!("    Link: {}", post.link));
        if let Some(alternate) = manifest.index.alternate_of(post) {
            lines.push(format!(
                "    Translation: {} → {}",
                alternate.locale, alternate.link
            ));
        }
        if let Some(desc) = &post.description {
            let truncated = truncate_desc(desc.trim(), 60);
            if !truncated.is_empty() {
                lines.push(format!("    {}", truncated));
            }
        }
    }

    if manifest.drafts > 0 {
        lines.push(String::new());
        lines.push("Drafts".to_string());
        lines.push(format!("    {} skipped", manifest.drafts));
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push("    config.toml".to_string());
    } else {
        lines.push("    (stock defaults)".to_string());
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Generate output
// ============================================================================

/// Format generate stage output: each written page and its output path.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();

    if !report.posts.is_empty() {
        lines.push("Posts".to_string());
        for (i, page) in report.posts.iter().enumerate() {
            let assets = match page.assets {
                0 => String::new(),
                n => format!(" ({})", plural(n, "asset", "assets")),
            };
            lines.push(format!(
                "{} {} → {}{}",
                format_index(i + 1),
                page.title,
                page.path,
                assets
            ));
        }
        lines.push(String::new());
    }

    lines.push("Home pages".to_string());
    for page in &report.homes {
        lines.push(format!("{} → {}", page.locale, page.path));
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}",
        plural(report.posts.len(), "post", "posts"),
        plural(report.homes.len(), "home page", "home pages")
    ));
    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
