//! End-to-end tests: build the fixture blog through the library API and the
//! `timetree` binary, then inspect the generated files.

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use timetree::{generate, scan};
use walkdir::WalkDir;

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/content")
}

fn copy_dir(src: &Path, dst: &Path) {
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry.unwrap();
        let target = dst.join(entry.path().strip_prefix(src).unwrap());
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target).unwrap();
        } else {
            std::fs::copy(entry.path(), target).unwrap();
        }
    }
}

/// A writable copy of the fixture content.
fn fixture_copy() -> TempDir {
    let content = TempDir::new().unwrap();
    copy_dir(&fixtures(), content.path());
    content
}

fn add_post(content: &TempDir, name: &str, front_matter: &str) {
    std::fs::write(
        content.path().join("posts").join(name),
        format!("+++\n{front_matter}\n+++\nbody\n"),
    )
    .unwrap();
}

fn timetree(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_timetree"))
        .args(args)
        .output()
        .expect("failed to run timetree")
}

// ---------------------------------------------------------------------------
// Library pipeline
// ---------------------------------------------------------------------------

#[test]
fn scan_then_generate_builds_translated_site() {
    let content = fixture_copy();
    let output = TempDir::new().unwrap();

    let manifest = scan::scan(content.path()).unwrap();
    let report = generate::generate(&manifest, content.path(), output.path()).unwrap();
    assert_eq!(report.posts.len(), 5);

    let en = std::fs::read_to_string(output.path().join("typed-styles/index.html")).unwrap();
    assert!(en.contains("<h1>Typed styles</h1>"));
    assert!(en.contains("November 3, 2019"));
    assert!(en.contains(r#"<a href="/zh/typed-styles/">中文</a>"#));
    assert!(en.contains(r#"<meta property="og:image" content="https://blog.example.com/typed-styles/banner.jpg">"#));
    assert!(en.contains(
        "https://github.com/example/blog/edit/main/content/posts/typed-styles/index.md"
    ));

    let zh = std::fs::read_to_string(output.path().join("zh/typed-styles/index.html")).unwrap();
    assert!(zh.contains("2019年11月3日"));
    assert!(zh.contains(r#"<a href="/typed-styles/">English</a>"#));
}

#[test]
fn user_locale_overrides_apply_to_pages() {
    let content = fixture_copy();
    let config_path = content.path().join("config.toml");
    let mut config = std::fs::read_to_string(&config_path).unwrap();
    config.push_str("\n[locales.zh]\nedit_label = \"在 GitHub 上编辑\"\n");
    std::fs::write(&config_path, config).unwrap();
    let output = TempDir::new().unwrap();

    let manifest = scan::scan(content.path()).unwrap();
    generate::generate(&manifest, content.path(), output.path()).unwrap();

    let zh = std::fs::read_to_string(output.path().join("zh/hello-world/index.html")).unwrap();
    assert!(zh.contains("在 GitHub 上编辑"));
    // Untouched zh strings keep their stock values
    assert!(zh.contains("本文还有以下语言版本："));
}

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

#[test]
fn cli_build_writes_site() {
    let output = TempDir::new().unwrap();
    let out = timetree(&[
        "build",
        "--source",
        fixtures().to_str().unwrap(),
        "--output",
        output.path().to_str().unwrap(),
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Generated 5 posts, 2 home pages"));
    assert!(output.path().join("zh/index.html").exists());
}

#[test]
fn cli_check_accepts_fixtures() {
    let out = timetree(&["check", "--source", fixtures().to_str().unwrap()]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("==> Content is valid"));
}

#[test]
fn cli_check_rejects_post_on_home_page() {
    let content = fixture_copy();
    add_post(&content, "zh.md", "title = \"Clash\"\ndate = 2020-01-01");

    let out = timetree(&["check", "--source", content.path().to_str().unwrap()]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("posts/zh.md"), "{stderr}");
}

#[test]
fn cli_build_fails_before_writing_on_conflict() {
    let content = fixture_copy();
    add_post(&content, "zh.md", "title = \"Clash\"\ndate = 2020-01-01");
    let output = TempDir::new().unwrap();
    let dist = output.path().join("dist");

    let out = timetree(&[
        "build",
        "--source",
        content.path().to_str().unwrap(),
        "--output",
        dist.to_str().unwrap(),
    ]);
    assert!(!out.status.success());
    assert!(!dist.exists());
}

#[test]
fn cli_build_never_writes_outside_output() {
    let content = fixture_copy();
    add_post(
        &content,
        "evil.md",
        "title = \"Evil\"\ndate = 2020-01-01\nlang = \"../../escaped\"",
    );
    add_post(
        &content,
        "dots.md",
        "title = \"Dots\"\ndate = 2020-01-01\nslug = \"..\"",
    );
    let root = TempDir::new().unwrap();
    let dist = root.path().join("a/b/dist");

    let out = timetree(&[
        "build",
        "--source",
        content.path().to_str().unwrap(),
        "--output",
        dist.to_str().unwrap(),
    ]);
    assert!(!out.status.success());
    assert!(!root.path().join("a/escaped").exists());
    assert!(!root.path().join("a/b/index.html").exists());

    // With the bad lang gone, the dotted slug falls back to the file name
    std::fs::remove_file(content.path().join("posts/evil.md")).unwrap();
    let out = timetree(&[
        "build",
        "--source",
        content.path().to_str().unwrap(),
        "--output",
        dist.to_str().unwrap(),
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(dist.join("dots/index.html").exists());
    assert!(!root.path().join("a/b/index.html").exists());
}

#[test]
fn cli_gen_config_prints_stock_config() {
    let out = timetree(&["gen-config"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("[locales.zh]"));
    assert!(stdout.contains("words_per_minute = 200"));
}

#[test]
fn cli_reading_time() {
    let out = timetree(&["reading-time", "30"]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "🍳🍳 30 min read");
}

#[test]
fn cli_reading_time_rejects_negative() {
    let out = timetree(&["reading-time", "-1"]);
    assert!(!out.status.success());
}

#[test]
fn cli_format_date() {
    let out = timetree(&["format-date", "2020-01-15"]);
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "January 15, 2020");

    let out = timetree(&["format-date", "2020-01-15", "--locale", "zh"]);
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "2020年1月15日");
}

#[test]
fn cli_format_date_rejects_garbage() {
    let out = timetree(&["format-date", "not-a-date"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("not-a-date"));
}
