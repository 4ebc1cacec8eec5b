//! # Smallpress
//!
//! A minimal static site generator for personal blogs. Your filesystem is the
//! data source: markdown files under `content/articles/` become blog articles,
//! markdown files in the content root become standalone pages, and a TOML
//! frontmatter block on each article carries its metadata (date, published
//! flag, tags, summary).
//!
//! # Architecture: Two-Stage Pipeline
//!
//! Smallpress processes content through two independent stages, with a JSON
//! manifest between them:
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (markdown + frontmatter → structured data)
//! 2. Generate  manifest  →  dist/            (filter, rank, render HTML)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Debuggability**: the manifest is human-readable JSON you can inspect.
//! - **Incremental builds**: regenerate HTML without re-reading content.
//! - **Testability**: each stage is a pure function from manifest to manifest,
//!   so unit tests can exercise pipeline logic without touching the filesystem.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1 — walks the content directory, parses frontmatter, produces the scan manifest |
//! | [`frontmatter`] | TOML frontmatter extraction and tolerant field parsing |
//! | [`visibility`] | Draft/publish filtering and date-descending ranking of articles |
//! | [`generate`] | Stage 2 — renders the final HTML site from the manifest using Maud |
//! | [`config`] | `config.toml` loading, validation, and CSS variable generation |
//! | [`article`] | Shared types serialized between stages (`Article`, `PageDoc`) |
//! | [`output`] | CLI output formatting — summary display of pipeline results |
//!
//! # Design Decisions
//!
//! ## Draft-by-Default Publishing
//!
//! An article appears in production output only when its frontmatter says
//! `published = true` *and* its date is not in the future. A missing
//! `published` field, `published = false`, a missing date, and a date that
//! fails to parse all mean the same thing: the article is a draft. Silently
//! holding back a half-finished post is strictly safer than accidentally
//! publishing it, so every malformed case fails closed. The `preview`
//! command lifts the filter entirely so authors can proofread drafts and
//! future-dated posts locally.
//!
//! ## UTC Everywhere
//!
//! Publish dates are calendar dates ("this post goes live on 2024-07-01").
//! Comparing a calendar date against "now" in the machine's local timezone
//! shifts the cutoff by up to a day depending on where the build runs — a CI
//! box in UTC and a laptop in UTC-8 would disagree about whether today's post
//! is live. Smallpress anchors frontmatter dates to UTC midnight at parse time
//! and compares against a UTC clock, so every machine agrees. See
//! [`frontmatter::parse_date`] and [`visibility`].
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system, rather than Handlebars or Tera. Malformed HTML is a
//! build error, template variables are Rust expressions, interpolation is
//! auto-escaped, and there is no template directory to ship or get out of
//! sync.
//!
//! ## TOML Frontmatter
//!
//! Frontmatter is TOML between `+++` fences, parsed with the same `toml`
//! crate as `config.toml` — one syntax for authors to learn, one parser to
//! maintain. Unknown frontmatter keys are allowed (authors keep private
//! notes there); unknown *config* keys are rejected to catch typos early.
//!
//! # The "Forever Stack"
//!
//! The output is plain HTML and established CSS. No JavaScript framework, no
//! Node, no database. The binary has zero runtime dependencies; the generated
//! site can be dropped on any file server and will render for as long as
//! browsers render HTML.

pub mod article;
pub mod config;
pub mod frontmatter;
pub mod generate;
pub mod output;
pub mod scan;
pub mod visibility;

#[cfg(test)]
pub(crate) mod test_helpers;
