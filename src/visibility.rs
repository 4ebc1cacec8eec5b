//! Draft/publish filtering and ranking of articles.
//!
//! This is the decision core of the generator: given the articles from a
//! scan snapshot and the build context, which of them appear in the rendered
//! site, and in what order?
//!
//! ## The publish rule
//!
//! In a production build an article is included iff it is *live*: its
//! frontmatter says `published = true` **and** its date (a UTC instant) is
//! at or before the current UTC instant. Everything else — drafts, articles
//! with `published = false` or no flag at all, future-dated articles,
//! articles whose date failed to parse — is excluded. In a preview build
//! (`BuildContext::preview`) the filter is lifted entirely so authors can
//! proofread in-progress and scheduled posts.
//!
//! ## Ordering
//!
//! Output is sorted by date descending (newest first) with a stable sort,
//! so articles sharing a date keep their scan order and repeated builds of
//! the same snapshot are byte-identical. Dateless articles (preview only)
//! sort last.
//!
//! ## Purity
//!
//! The selection functions are pure: they never mutate articles, never touch
//! the filesystem, and never cache. "Now" comes from an injected [`Clock`]
//! read fresh on every call, so tests pin time with [`FixedClock`] and the
//! same process could, in principle, serve different instants per call.

use crate::article::Article;
use chrono::{DateTime, Utc};
use std::cmp::Reverse;

/// Source of the current UTC instant.
///
/// The filter must not call an ambient time source directly; callers hand it
/// a clock instead. Production code uses [`SystemClock`], tests use
/// [`FixedClock`].
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// The real clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a fixed instant, for deterministic tests.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Build-wide context for visibility decisions.
///
/// Constructed exactly once by the CLI entry point from the invocation
/// (`build` vs `preview`) and threaded explicitly into every filter call.
/// The filter never reads process-global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildContext {
    /// When true, every article is included regardless of publish state or
    /// date. Set for interactive preview builds.
    pub show_all_articles: bool,
}

impl BuildContext {
    /// Production semantics: only live articles are visible.
    pub fn production() -> Self {
        Self {
            show_all_articles: false,
        }
    }

    /// Preview semantics: drafts and scheduled articles are visible too.
    pub fn preview() -> Self {
        Self {
            show_all_articles: true,
        }
    }
}

/// Select the articles visible in this build, newest first.
///
/// Pure with respect to the snapshot: articles pass through by reference,
/// unmutated. Accepts anything that yields `&Article` so callers can feed it
/// a full manifest slice or a tag-filtered subset.
pub fn select_published<'a, I>(articles: I, ctx: &BuildContext, clock: &dyn Clock) -> Vec<&'a Article>
where
    I: IntoIterator<Item = &'a Article>,
{
    let now = clock.now();
    let mut selected: Vec<&Article> = articles
        .into_iter()
        .filter(|a| ctx.show_all_articles || a.is_live(now))
        .collect();

    // Stable sort: equal dates keep input order. Dateless articles can only
    // survive the filter in preview mode; MIN_UTC puts them last.
    selected.sort_by_key(|a| Reverse(a.date.unwrap_or(DateTime::<Utc>::MIN_UTC)));
    selected
}

/// The first `limit` articles of [`select_published`] — the homepage teaser
/// list. `limit == 0` yields an empty list; a limit beyond the filtered
/// count yields everything. (A negative limit is unrepresentable: the
/// argument is a `usize`.)
pub fn select_latest<'a, I>(
    articles: I,
    ctx: &BuildContext,
    clock: &dyn Clock,
    limit: usize,
) -> Vec<&'a Article>
where
    I: IntoIterator<Item = &'a Article>,
{
    let mut selected = select_published(articles, ctx, clock);
    selected.truncate(limit);
    selected
}
