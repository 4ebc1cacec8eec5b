//! Site configuration module.
//!
//! Handles loading and validating `config.toml` from the content root.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "A smallpress blog"   # Site title, shown in the header and <title>
//! description = ""              # One-line tagline under the title
//! base_url = "/"                # Prefix for generated links ("/" or "https://...")
//! latest_count = 9              # Homepage teaser list length (0 = no teasers)
//!
//! [colors]
//! background = "#ffffff"
//! text = "#111111"
//! text_muted = "#666666"        # Dates, tags, nav
//! link = "#0044cc"
//! border = "#e0e0e0"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! # Only override the homepage teaser count
//! latest_count = 5
//! ```
//!
//! Unknown keys are rejected to catch typos early. (Frontmatter is the
//! opposite — unknown keys there are author scratch space. Config typos are
//! silent misconfiguration; frontmatter typos are at worst a warning from
//! `check`.)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SiteConfig {
    /// Site title, shown in the header and every page's `<title>`.
    pub title: String,
    /// One-line tagline rendered under the site title on the homepage.
    pub description: String,
    /// Link prefix. Either "/" for root-relative links or an absolute URL
    /// without a trailing slash.
    pub base_url: String,
    /// How many articles the homepage teaser list shows. Zero is legal and
    /// yields a homepage with no teasers.
    pub latest_count: usize,
    pub colors: Colors,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "A smallpress blog".to_string(),
            description: String::new(),
            base_url: "/".to_string(),
            latest_count: 9,
            colors: Colors::default(),
        }
    }
}

/// Theme colors, injected into the stylesheet as CSS custom properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Colors {
    pub background: String,
    pub text: String,
    pub text_muted: String,
    pub link: String,
    pub border: String,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#111111".to_string(),
            text_muted: "#666666".to_string(),
            link: "#0044cc".to_string(),
            border: "#e0e0e0".to_string(),
        }
    }
}

/// Load `config.toml` from the content root, falling back to defaults when
/// the file doesn't exist.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let path = root.join("config.toml");
    let config = if path.exists() {
        let content = fs::read_to_string(&path)?;
        toml::from_str(&content)?
    } else {
        SiteConfig::default()
    };
    validate(&config)?;
    Ok(config)
}

fn validate(config: &SiteConfig) -> Result<(), ConfigError> {
    if config.title.trim().is_empty() {
        return Err(ConfigError::Validation("title must not be empty".into()));
    }
    if config.base_url.is_empty() {
        return Err(ConfigError::Validation(
            "base_url must not be empty (use \"/\" for root-relative links)".into(),
        ));
    }
    if config.base_url != "/" && config.base_url.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "base_url must not end with a slash: {}",
            config.base_url
        )));
    }
    Ok(())
}

/// Generate the `:root` CSS custom-property block from the configured colors.
/// Prepended to the static stylesheet at generate time.
pub fn generate_color_css(colors: &Colors) -> String {
    format!(
        ":root {{\n  --background: {};\n  --text: {};\n  --text-muted: {};\n  --link: {};\n  --border: {};\n}}",
        colors.background, colors.text, colors.text_muted, colors.link, colors.border
    )
}

/// The documented stock config, printed by `smallpress gen-config`.
pub fn stock_config_toml() -> String {
    let defaults = SiteConfig::default();
    format!(
        r##"# smallpress site configuration
# All options are optional - the values below are the defaults.

# Site title, shown in the header and every page's <title>.
title = "{title}"

# One-line tagline rendered under the site title on the homepage.
description = ""

# Link prefix: "/" for root-relative links, or an absolute URL
# like "https://blog.example.com" (no trailing slash).
base_url = "/"

# How many articles the homepage teaser list shows.
latest_count = {latest_count}

[colors]
background = "{background}"
text = "{text}"
text_muted = "{text_muted}"   # Dates, tags, nav
link = "{link}"
border = "{border}"
"##,
        title = defaults.title,
        latest_count = defaults.latest_count,
        background = defaults.colors.background,
        text = defaults.colors.text,
        text_muted = defaults.colors.text_muted,
        link = defaults.colors.link,
        border = defaults.colors.border,
    )
}
