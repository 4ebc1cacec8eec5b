//! Shared types used across both pipeline stages.
//!
//! These types are serialized to JSON between stages (scan → generate) and
//! must be identical across both modules.
//!
//! The publish-state predicates (`is_published`, `is_live`, `is_scheduled`,
//! `is_draft`) live here so that the filtering logic in [`crate::visibility`]
//! and the status badges rendered by [`crate::generate`] share one
//! definition. Two copies of "is this article public?" would eventually
//! disagree, and a badge that contradicts the index is worse than no badge.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The tag every blog article carries. Injected by the scan stage for files
/// under `content/articles/`, so downstream consumers can ask the manifest
/// for "everything tagged article" without caring about directory layout.
pub const ARTICLE_TAG: &str = "article";

/// A blog article parsed from `content/articles/NAME.md`.
///
/// Frontmatter fields that fail to parse are carried as `None` rather than
/// rejected: the visibility filter treats them as "draft", and `check`
/// reports them as warnings. The body and display fields pass through the
/// filter untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Title from frontmatter, or the filename stem with dashes → spaces.
    pub title: String,
    /// URL slug (filename stem, sanitized).
    pub slug: String,
    /// Publish date as a UTC instant. Calendar dates are anchored to UTC
    /// midnight at parse time. `None` when absent or malformed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    /// Explicit publish flag. `None` when the field is absent or not a
    /// boolean — which is *not* the same as `Some(false)` to an author,
    /// but both mean "draft" to the filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
    /// Tag labels. Always contains at least [`ARTICLE_TAG`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Teaser text shown on the homepage and archive listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Raw markdown body (everything after the frontmatter fence).
    pub body: String,
    /// Path of the source file, relative to the content root.
    pub source_path: String,
}

impl Article {
    /// Whether the author explicitly marked this article published.
    ///
    /// Only a literal `published = true` counts. Absent, `false`, and
    /// non-boolean values are all drafts (closed-by-default).
    pub fn is_published(&self) -> bool {
        self.published == Some(true)
    }

    /// Whether this article belongs in production output at instant `now`:
    /// explicitly published *and* dated at or before `now`.
    ///
    /// This is the single publish predicate; [`crate::visibility`] and the
    /// generate stage both call it.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.is_published() && matches!(self.date, Some(d) if d <= now)
    }

    /// Published but future-dated: will go live on its own once `now`
    /// catches up. Shown with a "scheduled" badge in preview builds.
    pub fn is_scheduled(&self, now: DateTime<Utc>) -> bool {
        self.is_published() && matches!(self.date, Some(d) if d > now)
    }

    /// Not explicitly published. Shown with a "draft" badge in preview
    /// builds.
    pub fn is_draft(&self) -> bool {
        !self.is_published()
    }

    /// Whether this article carries the given tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// A standalone page generated from a markdown file in the content root
/// (e.g. `content/about.md`). Pages are outside the article collection:
/// no date, no publish flag, always rendered, linked from the site nav.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageDoc {
    /// Title from the first `# heading` in the markdown, or the filename
    /// stem with dashes → spaces as a fallback.
    pub title: String,
    /// Display label in nav (filename stem with dashes → spaces).
    pub link_title: String,
    /// URL slug (filename stem, sanitized).
    pub slug: String,
    /// Raw markdown content.
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{article, utc};

    // =========================================================================
    // is_published() — closed-by-default
    // =========================================================================

    #[test]
    fn published_true_is_published() {
        let a = article("a", Some(utc(2024, 1, 1)), Some(true));
        assert!(a.is_published());
    }

    #[test]
    fn published_false_is_not_published() {
        let a = article("a", Some(utc(2024, 1, 1)), Some(false));
        assert!(!a.is_published());
        assert!(a.is_draft());
    }

    #[test]
    fn absent_published_is_not_published() {
        let a = article("a", Some(utc(2024, 1, 1)), None);
        assert!(!a.is_published());
        assert!(a.is_draft());
    }

    // =========================================================================
    // is_live() / is_scheduled() — date window
    // =========================================================================

    #[test]
    fn past_dated_published_is_live() {
        let now = utc(2024, 7, 1);
        let a = article("a", Some(utc(2024, 1, 1)), Some(true));
        assert!(a.is_live(now));
        assert!(!a.is_scheduled(now));
    }

    #[test]
    fn date_equal_to_now_is_live() {
        let now = utc(2024, 7, 1);
        let a = article("a", Some(now), Some(true));
        assert!(a.is_live(now));
    }

    #[test]
    fn future_dated_published_is_scheduled_not_live() {
        let now = utc(2024, 7, 1);
        let a = article("a", Some(utc(2024, 12, 31)), Some(true));
        assert!(!a.is_live(now));
        assert!(a.is_scheduled(now));
        assert!(!a.is_draft());
    }

    #[test]
    fn future_dated_unpublished_is_draft_not_scheduled() {
        let now = utc(2024, 7, 1);
        let a = article("a", Some(utc(2024, 12, 31)), None);
        assert!(!a.is_scheduled(now));
        assert!(a.is_draft());
    }

    #[test]
    fn dateless_article_is_never_live() {
        let now = utc(2024, 7, 1);
        let a = article("a", None, Some(true));
        assert!(!a.is_live(now));
        assert!(!a.is_scheduled(now));
    }

    // =========================================================================
    // has_tag()
    // =========================================================================

    #[test]
    fn has_tag_matches_exactly() {
        let mut a = article("a", None, None);
        a.tags = vec!["article".into(), "rust".into()];
        assert!(a.has_tag("rust"));
        assert!(!a.has_tag("Rust"));
        assert!(!a.has_tag("go"));
    }
}
