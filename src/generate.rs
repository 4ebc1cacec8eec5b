//! HTML site generation.
//!
//! Stage 2 of the smallpress build pipeline. Takes the scan manifest,
//! applies the visibility filter, and renders the final static site.
//!
//! ## Generated Pages
//!
//! - **Homepage** (`/index.html`): site header plus the "latest N" teaser
//!   list from [`visibility::select_latest`]
//! - **Archive** (`/articles/index.html`): every visible article from
//!   [`visibility::select_published`], newest first
//! - **Article pages** (`/articles/{slug}/index.html`): rendered markdown body
//! - **Tag pages** (`/tags/{tag}/index.html`): visible articles carrying a tag
//! - **Standalone pages** (`/{slug}/index.html`): about, colophon, etc.
//!
//! The same [`BuildContext`] drives every listing, so a draft can never
//! appear in one index and be missing from another. In preview builds,
//! articles that would be invisible in production get a status badge —
//! "draft" for unpublished articles, "scheduled" for published future-dated
//! ones — derived from the same predicates the filter uses
//! ([`Article::is_draft`], [`Article::is_scheduled`]), not a reimplemented
//! condition.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── favicon.svg                # content/assets/* (copied)
//! ├── about/index.html
//! ├── articles/
//! │   ├── index.html
//! │   └── hello-world/index.html
//! └── tags/
//!     └── rust/index.html
//! ```
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating,
//! with `pulldown-cmark` converting article bodies. The stylesheet is
//! embedded at compile time; theme colors from `config.toml` are prepended
//! as CSS custom properties.

use crate::article::{ARTICLE_TAG, Article, PageDoc};
use crate::config::{self, SiteConfig};
use crate::scan::Manifest;
use crate::visibility::{self, BuildContext, Clock, SystemClock};
use chrono::{DateTime, Utc};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// What got rendered, for CLI reporting.
#[derive(Debug, Default)]
pub struct Summary {
    pub article_pages: usize,
    pub tag_pages: usize,
    pub standalone_pages: usize,
    /// Articles excluded by the visibility filter in this build.
    pub hidden_articles: usize,
}

/// Render the site from a manifest file on disk, using the real clock.
pub fn generate(
    manifest_path: &Path,
    source_dir: &Path,
    output_dir: &Path,
    ctx: &BuildContext,
) -> Result<Summary, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;
    generate_site(&manifest, source_dir, output_dir, ctx, &SystemClock)
}

/// Render the site from an in-memory manifest. The clock is injected so
/// tests can pin "now"; it is read once per build, inside the filter calls.
pub fn generate_site(
    manifest: &Manifest,
    source_dir: &Path,
    output_dir: &Path,
    ctx: &BuildContext,
    clock: &dyn Clock,
) -> Result<Summary, GenerateError> {
    let config = &manifest.config;
    let now = clock.now();

    let color_css = config::generate_color_css(&config.colors);
    let css = format!("{}\n\n{}", color_css, CSS_STATIC);

    fs::create_dir_all(output_dir)?;

    // Static assets from content/assets/ land at the output root.
    let assets_dir = source_dir.join("assets");
    if assets_dir.is_dir() {
        copy_dir_recursive(&assets_dir, output_dir)?;
    }

    let mut summary = Summary::default();

    // One filter pass drives every listing on the site.
    let visible = visibility::select_published(&manifest.articles, ctx, clock);
    let latest = visibility::select_latest(&manifest.articles, ctx, clock, config.latest_count);
    summary.hidden_articles = manifest.articles.len() - visible.len();

    let home = render_home(config, &manifest.pages, &latest, ctx, now, &css);
    fs::write(output_dir.join("index.html"), home.into_string())?;

    let archive_dir = output_dir.join("articles");
    fs::create_dir_all(&archive_dir)?;
    let archive = render_archive(config, &manifest.pages, &visible, ctx, now, &css);
    fs::write(archive_dir.join("index.html"), archive.into_string())?;

    for article in visible.iter().copied() {
        let article_dir = archive_dir.join(&article.slug);
        fs::create_dir_all(&article_dir)?;
        let page = render_article_page(config, &manifest.pages, article, ctx, now, &css);
        fs::write(article_dir.join("index.html"), page.into_string())?;
        summary.article_pages += 1;
    }

    // Tag pages cover tags that appear on at least one *visible* article.
    // The implicit "article" tag would just duplicate the archive.
    for tag in manifest.all_tags() {
        if tag == ARTICLE_TAG {
            continue;
        }
        let tagged = visibility::select_published(manifest.articles_with_tag(tag), ctx, clock);
        if tagged.is_empty() {
            continue;
        }
        let tag_dir = output_dir.join("tags").join(tag);
        fs::create_dir_all(&tag_dir)?;
        let page = render_tag_page(config, &manifest.pages, tag, &tagged, ctx, now, &css);
        fs::write(tag_dir.join("index.html"), page.into_string())?;
        summary.tag_pages += 1;
    }

    for page in &manifest.pages {
        let page_dir = output_dir.join(&page.slug);
        fs::create_dir_all(&page_dir)?;
        let rendered = render_standalone_page(config, &manifest.pages, page, &css);
        fs::write(page_dir.join("index.html"), rendered.into_string())?;
        summary.standalone_pages += 1;
    }

    Ok(summary)
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// ============================================================================
// Link and date helpers
// ============================================================================

/// Join a site-relative path onto the configured base URL.
fn href(config: &SiteConfig, path: &str) -> String {
    if config.base_url == "/" {
        format!("/{path}")
    } else {
        format!("{}/{path}", config.base_url)
    }
}

/// Human display form of a publish date, e.g. "March 15, 2024".
fn format_display_date(date: DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Machine form for the `<time datetime>` attribute.
fn format_datetime_attr(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure.
fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css.to_string())) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the site header: title, tagline, and nav links.
fn site_header(config: &SiteConfig, pages: &[PageDoc]) -> Markup {
    html! {
        header.site-header {
            h1.site-title {
                a href=(href(config, "")) { (config.title) }
            }
            @if !config.description.is_empty() {
                p.site-description { (config.description) }
            }
            nav.site-nav {
                a href=(href(config, "articles/")) { "Articles" }
                @for page in pages {
                    a href=(href(config, &format!("{}/", page.slug))) { (page.link_title) }
                }
            }
        }
    }
}

/// Status badge for preview builds. Production builds never render badges:
/// the filter has already removed everything that isn't live.
fn status_badge(article: &Article, ctx: &BuildContext, now: DateTime<Utc>) -> Markup {
    html! {
        @if ctx.show_all_articles {
            @if article.is_draft() {
                span.status-badge { "draft" }
            } @else if article.is_scheduled(now) {
                span.status-badge { "scheduled" }
            }
        }
    }
}

/// One entry in an article listing: date, linked title, badge, summary.
fn article_list_item(
    config: &SiteConfig,
    article: &Article,
    ctx: &BuildContext,
    now: DateTime<Utc>,
) -> Markup {
    html! {
        li {
            @if let Some(date) = article.date {
                time datetime=(format_datetime_attr(date)) { (format_display_date(date)) }
                " — "
            }
            a href=(href(config, &format!("articles/{}/", article.slug))) { (article.title) }
            (status_badge(article, ctx, now))
            @if let Some(summary) = &article.summary {
                p.summary { (summary) }
            }
        }
    }
}

fn article_listing(
    config: &SiteConfig,
    articles: &[&Article],
    ctx: &BuildContext,
    now: DateTime<Utc>,
) -> Markup {
    html! {
        ul.article-list {
            @for article in articles.iter().copied() {
                (article_list_item(config, article, ctx, now))
            }
        }
    }
}

/// Convert a markdown body to HTML. `pulldown-cmark` escapes its input; the
/// resulting fragment is trusted markup.
fn markdown_to_html(markdown: &str) -> Markup {
    let parser = Parser::new(markdown);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    PreEscaped(out)
}

// ============================================================================
// Pages
// ============================================================================

fn render_home(
    config: &SiteConfig,
    pages: &[PageDoc],
    latest: &[&Article],
    ctx: &BuildContext,
    now: DateTime<Utc>,
    css: &str,
) -> Markup {
    base_document(
        &config.title,
        css,
        html! {
            (site_header(config, pages))
            main {
                h2 { "Latest articles" }
                (article_listing(config, latest, ctx, now))
                p {
                    a href=(href(config, "articles/")) { "All articles →" }
                }
            }
        },
    )
}

fn render_archive(
    config: &SiteConfig,
    pages: &[PageDoc],
    visible: &[&Article],
    ctx: &BuildContext,
    now: DateTime<Utc>,
    css: &str,
) -> Markup {
    base_document(
        &format!("Articles — {}", config.title),
        css,
        html! {
            (site_header(config, pages))
            main {
                h2 { "Articles" }
                (article_listing(config, visible, ctx, now))
            }
        },
    )
}

fn render_article_page(
    config: &SiteConfig,
    pages: &[PageDoc],
    article: &Article,
    ctx: &BuildContext,
    now: DateTime<Utc>,
    css: &str,
) -> Markup {
    let display_tags: Vec<&String> = article.tags.iter().filter(|t| *t != ARTICLE_TAG).collect();
    base_document(
        &format!("{} — {}", article.title, config.title),
        css,
        html! {
            (site_header(config, pages))
            main {
                article {
                    h2 { (article.title) (status_badge(article, ctx, now)) }
                    p.article-meta {
                        @if let Some(date) = article.date {
                            time datetime=(format_datetime_attr(date)) {
                                (format_display_date(date))
                            }
                        }
                        @if !display_tags.is_empty() {
                            span.tag-list {
                                " · "
                                @for tag in &display_tags {
                                    a href=(href(config, &format!("tags/{tag}/"))) {
                                        "#" (tag)
                                    }
                                }
                            }
                        }
                    }
                    (markdown_to_html(&article.body))
                }
            }
        },
    )
}

fn render_tag_page(
    config: &SiteConfig,
    pages: &[PageDoc],
    tag: &str,
    tagged: &[&Article],
    ctx: &BuildContext,
    now: DateTime<Utc>,
    css: &str,
) -> Markup {
    base_document(
        &format!("#{tag} — {}", config.title),
        css,
        html! {
            (site_header(config, pages))
            main {
                h2 { "#" (tag) }
                (article_listing(config, tagged, ctx, now))
            }
        },
    )
}

fn render_standalone_page(
    config: &SiteConfig,
    pages: &[PageDoc],
    page: &PageDoc,
    css: &str,
) -> Markup {
    base_document(
        &format!("{} — {}", page.title, config.title),
        css,
        html! {
            (site_header(config, pages))
            main {
                article {
                    (markdown_to_html(&page.body))
                }
            }
        },
    )
}
