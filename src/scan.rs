//! Content scanning and manifest generation.
//!
//! Stage 1 of the smallpress build pipeline. Walks the content directory,
//! parses markdown and frontmatter, and produces a structured manifest that
//! the generate stage consumes.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                         # Content root
//! ├── config.toml                  # Site configuration (optional)
//! ├── about.md                     # Standalone page → /about/
//! ├── colophon.md                  # Another page
//! ├── assets/                      # Static files → copied to output root
//! │   └── favicon.svg
//! └── articles/                    # The blog collection
//!     ├── first-post.md            # → /articles/first-post/
//!     ├── drafts-are-hidden.md     # No `published = true` → draft
//!     └── 2024/                    # Subdirectories are fine; the slug
//!         └── year-in-review.md    #   comes from the file stem
//! ```
//!
//! ## Ordering
//!
//! Articles enter the manifest sorted by source path. This order is the
//! tie-break the visibility filter preserves for articles sharing a date, so
//! repeated scans of the same tree produce identical manifests and identical
//! sites.
//!
//! ## Validation
//!
//! The scanner enforces one hard rule: no two articles may share a slug
//! (two files named `post.md` in different subdirectories would otherwise
//! silently overwrite each other's output). Everything about *frontmatter*
//! is soft: malformed fields become warnings in the manifest, reported by
//! `smallpress check`, and the affected article degrades to a draft.

use crate::article::{ARTICLE_TAG, Article, PageDoc};
use crate::config::{self, SiteConfig};
use crate::frontmatter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Duplicate article slug '{0}' ({1} and {2})")]
    DuplicateSlug(String, String, String),
}

/// Directory under the content root holding the article collection.
const ARTICLES_DIR: &str = "articles";

/// Manifest output from the scan stage.
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    /// All articles, published or not, in source-path order. Filtering is
    /// the generate stage's job; the manifest is the full snapshot.
    pub articles: Vec<Article>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<PageDoc>,
    pub config: SiteConfig,
    /// Frontmatter problems found while scanning, one line per problem,
    /// prefixed with the source path. Never fatal.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl Manifest {
    /// All articles carrying the given tag, in manifest order.
    ///
    /// This is the lookup the generate stage composes with the visibility
    /// filter: tag pages feed `articles_with_tag(tag)` into
    /// [`crate::visibility::select_published`].
    pub fn articles_with_tag(&self, tag: &str) -> Vec<&Article> {
        self.articles.iter().filter(|a| a.has_tag(tag)).collect()
    }

    /// Every tag that appears on at least one article, sorted and deduped.
    pub fn all_tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self
            .articles
            .iter()
            .flat_map(|a| a.tags.iter().map(String::as_str))
            .collect();
        tags.sort_unstable();
        tags.dedup();
        tags
    }
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;

    let mut warnings = Vec::new();
    let articles = scan_articles(root, &mut warnings)?;
    let pages = scan_pages(root)?;

    Ok(Manifest {
        articles,
        pages,
        config,
        warnings,
    })
}

/// Walk `content/articles/` and parse every markdown file into an
/// [`Article`].
fn scan_articles(root: &Path, warnings: &mut Vec<String>) -> Result<Vec<Article>, ScanError> {
    let articles_root = root.join(ARTICLES_DIR);
    if !articles_root.is_dir() {
        return Ok(Vec::new());
    }

    let mut md_files: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(&articles_root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && is_markdown(entry.path()) {
            md_files.push(entry.into_path());
        }
    }
    // Deterministic insertion order across platforms and directory layouts.
    md_files.sort();

    let mut articles: Vec<Article> = Vec::new();
    for path in &md_files {
        let article = parse_article(path, root, warnings)?;
        if let Some(existing) = articles.iter().find(|a| a.slug == article.slug) {
            return Err(ScanError::DuplicateSlug(
                article.slug.clone(),
                existing.source_path.clone(),
                article.source_path.clone(),
            ));
        }
        articles.push(article);
    }
    Ok(articles)
}

fn parse_article(
    path: &Path,
    root: &Path,
    warnings: &mut Vec<String>,
) -> Result<Article, ScanError> {
    let content = fs::read_to_string(path)?;
    let source_path = relative_display(path, root);

    let parsed = frontmatter::parse(&content);
    for w in &parsed.warnings {
        warnings.push(format!("{source_path}: {w}"));
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let slug = slugify(&stem);
    let title = parsed
        .frontmatter
        .title
        .clone()
        .unwrap_or_else(|| stem.replace('-', " "));

    let mut tags = parsed.frontmatter.tags.clone();
    if !tags.iter().any(|t| t == ARTICLE_TAG) {
        tags.insert(0, ARTICLE_TAG.to_string());
    }

    if !content.starts_with("+++") {
        warnings.push(format!(
            "{source_path}: no frontmatter block; article will be treated as a draft"
        ));
    }

    Ok(Article {
        title,
        slug,
        date: parsed.frontmatter.date,
        published: parsed.frontmatter.published,
        tags,
        summary: parsed.frontmatter.summary.clone(),
        body: parsed.body.to_string(),
        source_path,
    })
}

/// Parse top-level markdown files (outside `articles/`) into standalone
/// pages. The page title comes from the first `# heading`, falling back to
/// the filename stem with dashes → spaces.
fn scan_pages(root: &Path) -> Result<Vec<PageDoc>, ScanError> {
    let mut md_files: Vec<PathBuf> = fs::read_dir(root)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && is_markdown(p))
        .collect();
    md_files.sort();

    let mut pages = Vec::new();
    for path in &md_files {
        let content = fs::read_to_string(path)?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let link_title = stem.replace('-', " ");

        let title = content
            .lines()
            .find(|line| line.starts_with("# "))
            .map(|line| line.trim_start_matches("# ").trim().to_string())
            .unwrap_or_else(|| link_title.clone());

        pages.push(PageDoc {
            title,
            link_title,
            slug: slugify(&stem),
            body: content,
        });
    }
    Ok(pages)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}

fn relative_display(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

const MAX_SLUG_LEN: usize = 80;

/// Sanitize a filename stem for use as a URL slug.
///
/// - Lowercases ASCII letters
/// - Replaces non-alphanumeric characters (except dashes) with dashes
/// - Collapses consecutive dashes into one
/// - Strips leading and trailing dashes
/// - Truncates to `MAX_SLUG_LEN` characters (breaks at last dash before limit)
pub fn slugify(stem: &str) -> String {
    let slug: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();

    // Collapse consecutive dashes
    let mut collapsed = String::with_capacity(slug.len());
    let mut prev_dash = false;
    for c in slug.chars() {
        if c == '-' {
            if !prev_dash {
                collapsed.push('-');
            }
            prev_dash = true;
        } else {
            collapsed.push(c);
            prev_dash = false;
        }
    }

    let trimmed = collapsed.trim_matches('-');

    if trimmed.len() <= MAX_SLUG_LEN {
        trimmed.to_string()
    } else {
        let truncated = &trimmed[..MAX_SLUG_LEN];
        match truncated.rfind('-') {
            Some(pos) => truncated[..pos].to_string(),
            None => truncated.to_string(),
        }
    }
}
