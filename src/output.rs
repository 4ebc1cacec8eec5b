//! CLI output formatting — summary display of pipeline results.
//!
//! Formatting functions return lines so tests can assert on them; the
//! `print_*` wrappers are the only place anything is written to stdout.
//!
//! The per-article status column uses the same predicates as the visibility
//! filter ([`Article::is_live`], [`Article::is_scheduled`]), so what `scan`
//! prints always agrees with what `generate` publishes.

use crate::article::Article;
use crate::generate::Summary;
use crate::scan::Manifest;
use crate::visibility::BuildContext;
use chrono::{DateTime, Utc};
use std::path::Path;

/// Status word for one article at instant `now`.
fn status(article: &Article, now: DateTime<Utc>) -> &'static str {
    if article.is_live(now) {
        "live"
    } else if article.is_scheduled(now) {
        "scheduled"
    } else {
        "draft"
    }
}

/// Lines describing a scan manifest: one per article with date and status,
/// one per page, then any warnings.
pub fn format_scan_summary(manifest: &Manifest, now: DateTime<Utc>) -> Vec<String> {
    let mut lines = Vec::new();

    let live = manifest
        .articles
        .iter()
        .filter(|a| a.is_live(now))
        .count();
    lines.push(format!(
        "{} articles ({} live), {} pages",
        manifest.articles.len(),
        live,
        manifest.pages.len()
    ));

    let width = manifest
        .articles
        .iter()
        .map(|a| a.slug.len())
        .max()
        .unwrap_or(0);
    for article in &manifest.articles {
        let date = article
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "----------".to_string());
        lines.push(format!(
            "  {:width$}  {}  {}",
            article.slug,
            date,
            status(article, now),
        ));
    }

    for page in &manifest.pages {
        lines.push(format!("  {} (page)", page.slug));
    }

    if !manifest.warnings.is_empty() {
        lines.push("warnings:".to_string());
        for w in &manifest.warnings {
            lines.push(format!("  {w}"));
        }
    }

    lines
}

pub fn print_scan_output(manifest: &Manifest, source: &Path, now: DateTime<Utc>) {
    println!("Scanned {}", source.display());
    for line in format_scan_summary(manifest, now) {
        println!("{line}");
    }
}

/// Lines describing a generate run.
pub fn format_generate_summary(summary: &Summary, ctx: &BuildContext) -> Vec<String> {
    let mut lines = vec![format!(
        "{} article pages, {} tag pages, {} standalone pages",
        summary.article_pages, summary.tag_pages, summary.standalone_pages
    )];
    if ctx.show_all_articles {
        lines.push("preview build: drafts and scheduled articles included".to_string());
    } else if summary.hidden_articles > 0 {
        lines.push(format!(
            "{} articles held back (drafts, scheduled, or undated)",
            summary.hidden_articles
        ));
    }
    lines
}

pub fn print_generate_output(summary: &Summary, ctx: &BuildContext, output_dir: &Path) {
    for line in format_generate_summary(summary, ctx) {
        println!("{line}");
    }
    println!("Site generated at {}", output_dir.display());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan;
    use crate::test_helpers::{setup_fixtures, utc};

    #[test]
    fn scan_summary_counts_and_statuses() {
        let tmp = setup_fixtures();
        let manifest = scan::scan(tmp.path()).unwrap();
        let lines = format_scan_summary(&manifest, utc(2024, 7, 1));

        assert_eq!(lines[0], "6 articles (2 live), 1 pages");
        let joined = lines.join("\n");
        assert!(joined.contains("hello-world"));
        assert!(joined.contains("2024-01-01  live"));
        assert!(joined.contains("draft-in-progress"));
        assert!(joined.contains("2024-06-01  draft"));
        assert!(joined.contains("2024-12-31  scheduled"));
        assert!(joined.contains("----------  draft"), "bad-date row: {joined}");
        assert!(joined.contains("about (page)"));
    }

    #[test]
    fn scan_summary_surfaces_warnings() {
        let tmp = setup_fixtures();
        let manifest = scan::scan(tmp.path()).unwrap();
        let joined = format_scan_summary(&manifest, utc(2024, 7, 1)).join("\n");
        assert!(joined.contains("warnings:"));
        assert!(joined.contains("bad-date.md"));
    }

    #[test]
    fn generate_summary_reports_held_back_articles() {
        let summary = Summary {
            article_pages: 2,
            tag_pages: 2,
            standalone_pages: 1,
            hidden_articles: 4,
        };
        let lines = format_generate_summary(&summary, &BuildContext::production());
        assert!(lines[1].contains("4 articles held back"));
    }

    #[test]
    fn generate_summary_notes_preview_mode() {
        let summary = Summary::default();
        let lines = format_generate_summary(&summary, &BuildContext::preview());
        assert!(lines.iter().any(|l| l.contains("preview build")));
    }
}
