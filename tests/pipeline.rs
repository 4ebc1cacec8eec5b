//! End-to-end pipeline test: content directory → scan → manifest JSON →
//! generate → HTML tree, for both production and preview semantics.

use smallpress::generate::generate_site;
use smallpress::scan::{Manifest, scan};
use smallpress::visibility::{BuildContext, FixedClock};
use std::fs;
use std::path::Path;

use chrono::{TimeZone, Utc};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A small blog: one live article, one draft, one scheduled article, one
/// standalone page, one asset.
fn setup_blog() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(
        root,
        "config.toml",
        "title = \"Integration Blog\"\nlatest_count = 2\n",
    );
    write(root, "about.md", "# About\n\nHi.\n");
    write(root, "assets/favicon.svg", "<svg></svg>");
    write(
        root,
        "articles/live-post.md",
        "+++\ntitle = \"Live post\"\ndate = \"2024-05-01\"\npublished = true\ntags = [\"notes\"]\n+++\nHello readers.\n",
    );
    write(
        root,
        "articles/draft-post.md",
        "+++\ntitle = \"Draft post\"\ndate = \"2024-06-15\"\n+++\nNot done yet.\n",
    );
    write(
        root,
        "articles/scheduled-post.md",
        "+++\ntitle = \"Scheduled post\"\ndate = \"2025-01-01\"\npublished = true\n+++\nFrom the future.\n",
    );
    tmp
}

fn clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap())
}

#[test]
fn production_build_end_to_end() {
    let content = setup_blog();
    let dist = TempDir::new().unwrap();

    // Round-trip the manifest through JSON, as the CLI does between stages.
    let manifest = scan(content.path()).unwrap();
    let json = serde_json::to_string_pretty(&manifest).unwrap();
    let manifest: Manifest = serde_json::from_str(&json).unwrap();

    let summary = generate_site(
        &manifest,
        content.path(),
        dist.path(),
        &BuildContext::production(),
        &clock(),
    )
    .unwrap();

    assert_eq!(summary.article_pages, 1);
    assert_eq!(summary.hidden_articles, 2);

    let index = fs::read_to_string(dist.path().join("index.html")).unwrap();
    assert!(index.contains("Integration Blog"));
    assert!(index.contains("Live post"));
    assert!(!index.contains("Draft post"));
    assert!(!index.contains("Scheduled post"));

    assert!(dist.path().join("articles/live-post/index.html").exists());
    assert!(!dist.path().join("articles/draft-post").exists());
    assert!(!dist.path().join("articles/scheduled-post").exists());

    assert!(dist.path().join("tags/notes/index.html").exists());
    assert!(dist.path().join("about/index.html").exists());
    assert!(dist.path().join("favicon.svg").exists());
}

#[test]
fn preview_build_shows_everything_with_badges() {
    let content = setup_blog();
    let dist = TempDir::new().unwrap();
    let manifest = scan(content.path()).unwrap();

    let summary = generate_site(
        &manifest,
        content.path(),
        dist.path(),
        &BuildContext::preview(),
        &clock(),
    )
    .unwrap();

    assert_eq!(summary.article_pages, 3);
    assert_eq!(summary.hidden_articles, 0);

    let archive = fs::read_to_string(dist.path().join("articles/index.html")).unwrap();
    // Date-descending: scheduled (2025) before draft (June) before live (May).
    let scheduled = archive.find("Scheduled post").unwrap();
    let draft = archive.find("Draft post").unwrap();
    let live = archive.find("Live post").unwrap();
    assert!(scheduled < draft && draft < live);

    let draft_page =
        fs::read_to_string(dist.path().join("articles/draft-post/index.html")).unwrap();
    assert!(draft_page.contains("class=\"status-badge\">draft<"));

    let scheduled_page =
        fs::read_to_string(dist.path().join("articles/scheduled-post/index.html")).unwrap();
    assert!(scheduled_page.contains("class=\"status-badge\">scheduled<"));
}

#[test]
fn rebuilding_the_same_snapshot_is_deterministic() {
    let content = setup_blog();
    let manifest = scan(content.path()).unwrap();

    let dist_a = TempDir::new().unwrap();
    let dist_b = TempDir::new().unwrap();
    let ctx = BuildContext::production();
    generate_site(&manifest, content.path(), dist_a.path(), &ctx, &clock()).unwrap();
    generate_site(&manifest, content.path(), dist_b.path(), &ctx, &clock()).unwrap();

    let a = fs::read_to_string(dist_a.path().join("articles/index.html")).unwrap();
    let b = fs::read_to_string(dist_b.path().join("articles/index.html")).unwrap();
    assert_eq!(a, b);
}
