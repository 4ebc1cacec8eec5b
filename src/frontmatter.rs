//! TOML frontmatter extraction and tolerant field parsing.
//!
//! An article file looks like:
//!
//! ```text
//! +++
//! title = "Why I still write HTML by hand"
//! date = "2024-03-10"
//! published = true
//! tags = ["web", "opinion"]
//! summary = "A short defense of the boring stack."
//! +++
//!
//! Body markdown starts here...
//! ```
//!
//! ## Tolerance policy
//!
//! Frontmatter parsing never fails the build. The filter downstream is
//! closed-by-default, so the safe degradation for every malformed field is
//! "treat as absent" — which makes the article a draft:
//!
//! - No fence, or no closing fence → the whole file is body, no metadata.
//! - TOML that doesn't parse → no metadata, one warning.
//! - `published` that isn't a boolean → `None`, warning.
//! - `date` that isn't a recognized date → `None`, warning.
//! - `tags` entries that aren't strings → skipped, warning.
//!
//! Warnings are surfaced by `smallpress check`; they never abort a build.
//! Hiding a malformed draft is safer than publishing unintended content.
//!
//! ## Date semantics
//!
//! Dates are interpreted as **UTC instants**, never local time. A calendar
//! date (`2024-03-10`) is anchored to UTC midnight of that day. An RFC 3339
//! datetime with an offset is converted to UTC. This keeps the "is this
//! article's date in the past?" comparison identical on every machine the
//! build runs on; constructing either side of that comparison in local time
//! reintroduces an off-by-one-day bug around midnight.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use toml::Value;

/// Fence line delimiting the frontmatter block, as in Zola and Hugo's TOML
/// mode.
const FENCE: &str = "+++";

/// Parsed frontmatter fields. All optional; see the module docs for how
/// malformed values degrade.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    pub title: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub published: Option<bool>,
    pub tags: Vec<String>,
    pub summary: Option<String>,
}

/// Result of splitting and parsing one markdown file.
#[derive(Debug)]
pub struct Parsed<'a> {
    pub frontmatter: Frontmatter,
    /// Everything after the closing fence (or the whole file if unfenced).
    pub body: &'a str,
    /// Human-readable notes about fields that were ignored.
    pub warnings: Vec<String>,
}

/// Split a file into its frontmatter block and body, then parse the fields.
pub fn parse(content: &str) -> Parsed<'_> {
    let Some((raw, body)) = split_fences(content) else {
        return Parsed {
            frontmatter: Frontmatter::default(),
            body: content,
            warnings: Vec::new(),
        };
    };

    let mut warnings = Vec::new();
    let table: toml::Table = match raw.parse() {
        Ok(t) => t,
        Err(e) => {
            warnings.push(format!("frontmatter is not valid TOML: {e}"));
            return Parsed {
                frontmatter: Frontmatter::default(),
                body,
                warnings,
            };
        }
    };

    let frontmatter = from_table(&table, &mut warnings);
    Parsed {
        frontmatter,
        body,
        warnings,
    }
}

/// Extract the text between the opening and closing `+++` fences.
///
/// The opening fence must be the first line of the file. Returns `None` if
/// either fence is missing, in which case the whole file is body.
fn split_fences(content: &str) -> Option<(&str, &str)> {
    let rest = content.strip_prefix(FENCE)?;
    let rest = rest.strip_prefix('\n').or_else(|| rest.strip_prefix("\r\n"))?;

    // Closing fence: a line that is exactly `+++`.
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == FENCE {
            let raw = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((raw, body));
        }
        offset += line.len();
    }
    None
}

/// Pull the known fields out of a parsed TOML table, degrading per field.
fn from_table(table: &toml::Table, warnings: &mut Vec<String>) -> Frontmatter {
    let mut fm = Frontmatter::default();

    if let Some(v) = table.get("title") {
        match v {
            Value::String(s) => fm.title = Some(s.clone()),
            other => warnings.push(format!("title is not a string (got {other})")),
        }
    }

    if let Some(v) = table.get("summary") {
        match v {
            Value::String(s) => fm.summary = Some(s.clone()),
            other => warnings.push(format!("summary is not a string (got {other})")),
        }
    }

    if let Some(v) = table.get("published") {
        match v {
            Value::Boolean(b) => fm.published = Some(*b),
            // `published = "true"` is a common typo. It still means draft —
            // only a literal boolean counts — but it deserves a warning.
            other => warnings.push(format!(
                "published is not a boolean (got {other}); treating as draft"
            )),
        }
    }

    if let Some(v) = table.get("date") {
        let parsed = match v {
            Value::String(s) => parse_date(s),
            // TOML has native date types; their display form round-trips
            // through the same string parser.
            Value::Datetime(d) => parse_date(&d.to_string()),
            _ => None,
        };
        match parsed {
            Some(d) => fm.date = Some(d),
            None => warnings.push(format!(
                "date {v} is not a recognized date; article will be treated as a draft"
            )),
        }
    }

    if let Some(v) = table.get("tags") {
        match v {
            Value::Array(items) => {
                for item in items {
                    match item {
                        Value::String(s) => fm.tags.push(s.clone()),
                        other => warnings.push(format!("ignoring non-string tag {other}")),
                    }
                }
            }
            other => warnings.push(format!("tags is not an array (got {other})")),
        }
    }

    fm
}

/// Parse a frontmatter date string into a UTC instant.
///
/// Accepted forms, tried in order:
/// - RFC 3339 with offset: `2024-03-10T09:00:00+02:00` (converted to UTC)
/// - Naive datetime: `2024-03-10T09:00:00` (taken as already-UTC)
/// - Calendar date: `2024-03-10` (anchored to UTC midnight)
///
/// Returns `None` for anything else. Both sides of the publish-window
/// comparison are UTC; nothing here consults the host timezone.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc());
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}
