//! Site configuration module.
//!
//! Handles loading, validating, and merging the `config.toml` found in the
//! content root. Everything the renderers treat as fixed — site title,
//! category display order, UI labels, markdown features — comes from here.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "Wiki"                # Site heading, substituted into every page
//! category_order = []           # Categories shown on the index, in this order
//!
//! [labels]
//! home = "Home"                 # Breadcrumb root and index page title
//! search = "Search"             # Search page breadcrumb segment
//! other_articles = "Other articles"  # Index heading for uncategorized pages
//!
//! [markdown]
//! tables = true                 # Pipe-table syntax
//! nl2br = true                  # Bare newlines render as <br>
//! strikethrough = false         # ~~strikethrough~~ syntax
//! footnotes = false             # Footnote references
//! highlight = true              # Syntax highlighting in fenced code blocks
//! highlight_theme = "InspiredGitHub"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! title = "My Wiki"
//! category_order = ["setting", "history"]
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::scan::ROOT_CATEGORY;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml` in the content root.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site title, substituted for the title placeholder on every page.
    #[serde(default = "default_title")]
    pub title: String,
    /// Category display order for the index page. Scanned categories not
    /// listed here are omitted from the index entirely.
    pub category_order: Vec<String>,
    /// UI strings (breadcrumb root, search crumb, uncategorized heading).
    pub labels: LabelsConfig,
    /// Markdown engine feature toggles.
    pub markdown: MarkdownConfig,
}

fn default_title() -> String {
    "Wiki".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            category_order: Vec::new(),
            labels: LabelsConfig::default(),
            markdown: MarkdownConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Validation("title must not be empty".into()));
        }
        for (name, value) in [
            ("labels.home", &self.labels.home),
            ("labels.search", &self.labels.search),
            ("labels.other_articles", &self.labels.other_articles),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{name} must not be empty"
                )));
            }
        }
        for (i, category) in self.category_order.iter().enumerate() {
            if category.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "category_order[{i}] must not be empty"
                )));
            }
            if category == ROOT_CATEGORY {
                return Err(ConfigError::Validation(format!(
                    "category_order must not contain the reserved name \"{ROOT_CATEGORY}\""
                )));
            }
            if self.category_order[..i].contains(category) {
                return Err(ConfigError::Validation(format!(
                    "category_order contains \"{category}\" more than once"
                )));
            }
        }
        if !crate::markdown::theme_exists(&self.markdown.highlight_theme) {
            return Err(ConfigError::Validation(format!(
                "markdown.highlight_theme \"{}\" is not a bundled theme (available: {})",
                self.markdown.highlight_theme,
                crate::markdown::theme_names().join(", ")
            )));
        }
        Ok(())
    }
}

/// UI strings substituted into breadcrumbs and headings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelsConfig {
    /// Breadcrumb root label; also the index page's title placeholder.
    pub home: String,
    /// Final breadcrumb segment on the search page.
    pub search: String,
    /// Index page heading for pages sitting directly in the content root.
    pub other_articles: String,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            home: "Home".to_string(),
            search: "Search".to_string(),
            other_articles: "Other articles".to_string(),
        }
    }
}

/// Markdown engine feature toggles.
///
/// Fenced code blocks are core syntax and always active; `highlight` only
/// controls whether their contents are syntax-highlighted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkdownConfig {
    /// Pipe-table syntax.
    pub tables: bool,
    /// Render bare newlines inside paragraphs as `<br>`.
    pub nl2br: bool,
    /// `~~strikethrough~~` syntax.
    pub strikethrough: bool,
    /// Footnote references and definitions.
    pub footnotes: bool,
    /// Syntax-highlight fenced code blocks.
    pub highlight: bool,
    /// Highlight theme name; must be one of the bundled defaults.
    pub highlight_theme: String,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            tables: true,
            nl2br: true,
            strikethrough: false,
            footnotes: false,
            highlight: true,
            highlight_theme: "InspiredGitHub".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Markwiki Configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file in the content root, next to your markdown directories:
#   content/config.toml
#
# Unknown keys will cause an error.

# Site title, substituted into every page's {{TITLE}} placeholder.
title = "Wiki"

# Categories shown on the index page, in display order. A category is the
# first directory segment of a page's path, e.g. "setting" for
# content/setting/intro.md. Scanned categories not listed here are omitted
# from the index. Pages directly in the content root always appear in a
# separate trailing section (see labels.other_articles).
category_order = []

# ---------------------------------------------------------------------------
# UI labels
# ---------------------------------------------------------------------------
[labels]
# Breadcrumb root label; also the index page's title.
home = "Home"

# Final breadcrumb segment on the search page.
search = "Search"

# Index page heading for pages sitting directly in the content root.
other_articles = "Other articles"

# ---------------------------------------------------------------------------
# Markdown features
# ---------------------------------------------------------------------------
[markdown]
# Pipe-table syntax.
tables = true

# Render bare newlines inside paragraphs as <br>.
nl2br = true

# ~~strikethrough~~ syntax.
strikethrough = false

# Footnote references and definitions.
footnotes = false

# Syntax-highlight fenced code blocks (```rust ... ```).
highlight = true

# Highlight theme. One of: InspiredGitHub, Solarized (dark),
# Solarized (light), base16-eighties.dark, base16-mocha.dark,
# base16-ocean.dark, base16-ocean.light.
highlight_theme = "InspiredGitHub"
"##
}
