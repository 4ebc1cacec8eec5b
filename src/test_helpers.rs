//! Shared test utilities for the smallpress test suite.
//!
//! Provides article constructors for filter-level tests, a fixture blog
//! written into a temp directory for scan/generate tests, and lookup helpers
//! that panic with a clear message on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let a = find_article(&manifest, "hello-world");
//! assert_eq!(a.date, Some(utc(2024, 1, 1)));
//! ```

use std::fs;
use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

use crate::article::{ARTICLE_TAG, Article};
use crate::scan::Manifest;

// =========================================================================
// Instants and articles
// =========================================================================

/// UTC midnight of the given calendar day.
pub fn utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

/// A bare article with the given slug, date, and publish flag.
pub fn article(slug: &str, date: Option<DateTime<Utc>>, published: Option<bool>) -> Article {
    named_article(slug, slug, date, published)
}

/// Like [`article`], with a distinct display title.
pub fn named_article(
    slug: &str,
    title: &str,
    date: Option<DateTime<Utc>>,
    published: Option<bool>,
) -> Article {
    Article {
        title: title.to_string(),
        slug: slug.to_string(),
        date,
        published,
        tags: vec![ARTICLE_TAG.to_string()],
        summary: None,
        body: String::new(),
        source_path: format!("articles/{slug}.md"),
    }
}

// =========================================================================
// Fixture setup
// =========================================================================

/// Write the fixture blog into a temp directory and return it.
///
/// The fixture covers every publish state the filter distinguishes. With a
/// clock at 2024-07-01, production builds see exactly `second-post` and
/// `hello-world` (in that order):
///
/// | article | date | published | state at 2024-07-01 |
/// |---------|------|-----------|---------------------|
/// | `hello-world` | 2024-01-01 | true | live |
/// | `second-post` | 2024-03-15 | true | live |
/// | `unpublished-false` | 2024-02-01 | false | draft |
/// | `draft-in-progress` | 2024-06-01 | — | draft |
/// | `scheduled-for-december` | 2024-12-31 | true | scheduled |
/// | `bad-date` | "someday" | true | draft (malformed date) |
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    fs::write(
        root.join("config.toml"),
        "title = \"Fixture Blog\"\ndescription = \"Posts from the test suite\"\nlatest_count = 9\n",
    )
    .unwrap();

    fs::write(
        root.join("about.md"),
        "# About this blog\n\nWritten entirely by the test suite.\n",
    )
    .unwrap();

    fs::create_dir_all(root.join("assets")).unwrap();
    fs::write(root.join("assets/favicon.svg"), "<svg></svg>").unwrap();

    write_article(
        root,
        "hello-world.md",
        "+++\ntitle = \"Hello, world\"\ndate = \"2024-01-01\"\npublished = true\ntags = [\"rust\"]\nsummary = \"The first post.\"\n+++\n# Hello\n\nThis is the first post.\n",
    );
    write_article(
        root,
        "second-post.md",
        "+++\ntitle = \"Second post\"\ndate = \"2024-03-15\"\npublished = true\ntags = [\"web\"]\n+++\nMore words.\n",
    );
    write_article(
        root,
        "unpublished-false.md",
        "+++\ntitle = \"Held back\"\ndate = \"2024-02-01\"\npublished = false\n+++\nNot ready.\n",
    );
    write_article(
        root,
        "draft-in-progress.md",
        "+++\ntitle = \"Work in progress\"\ndate = \"2024-06-01\"\n+++\nStill writing this one.\n",
    );
    write_article(
        root,
        "scheduled-for-december.md",
        "+++\ntitle = \"Year in review\"\ndate = \"2024-12-31\"\npublished = true\n+++\nSee you in December.\n",
    );
    write_article(
        root,
        "bad-date.md",
        "+++\ntitle = \"Someday\"\ndate = \"someday\"\npublished = true\n+++\nNo particular day.\n",
    );

    tmp
}

/// Write an article file under `<root>/articles/`, creating parent
/// directories as needed. `rel` may contain subdirectories.
pub fn write_article(root: &Path, rel: &str, content: &str) {
    let path = root.join("articles").join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

// =========================================================================
// Manifest lookups — panics with a clear message on miss
// =========================================================================

/// Find an article by slug. Panics if not found.
pub fn find_article<'a>(manifest: &'a Manifest, slug: &str) -> &'a Article {
    manifest
        .articles
        .iter()
        .find(|a| a.slug == slug)
        .unwrap_or_else(|| {
            let slugs: Vec<&str> = manifest.articles.iter().map(|a| a.slug.as_str()).collect();
            panic!("article '{slug}' not found. Available: {slugs:?}")
        })
}
