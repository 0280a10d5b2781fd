//! Content scanning and manifest generation.
//!
//! Stage 1 of the markwiki build pipeline. Walks the content tree to discover
//! markdown files, parses each into a [`Page`], and produces the [`Manifest`]
//! that the renderers consume.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                         # Content root
//! ├── config.toml                  # Site configuration (optional)
//! ├── readme.md                    # Root page → /readme.html, category "root"
//! ├── setting/
//! │   ├── intro.md                 # → /setting/intro.html, category "setting"
//! │   └── regions/
//! │       └── north.md             # → /setting/regions/north.html, category "setting"
//! └── history/
//!     └── timeline.md              # → /history/timeline.html, category "history"
//! ```
//!
//! ## Page Parsing
//!
//! - The title comes from the first level-1 heading line anywhere in the file
//!   (`# <text>`, at least one whitespace character after the `#`); without
//!   one, the file stem is used.
//! - That first heading line is blanked out of the body, which is then
//!   trimmed and rendered to HTML with the configured markdown features.
//! - The URL mirrors the relative path with the extension swapped for
//!   `.html`; the category is the first path segment, or [`ROOT_CATEGORY`]
//!   for files directly in the content root.
//!
//! Scan order is deterministic: directories are walked depth-first with
//! entries sorted byte-wise by file name, so repeated builds over unchanged
//! input produce identical output.

use crate::config::{self, MarkdownConfig, SiteConfig};
use crate::markdown;
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
}

/// Category assigned to pages sitting directly in the content root.
pub const ROOT_CATEGORY: &str = "root";

/// Manifest output from the scan stage.
#[derive(Debug)]
pub struct Manifest {
    /// All pages, in scan order.
    pub pages: Vec<Page>,
    /// Pages grouped by category.
    pub categories: CategoryIndex,
    /// Effective site configuration.
    pub config: SiteConfig,
}

/// One page derived from one source markdown file.
///
/// Created once during scanning and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Page {
    /// Title from the first `# heading` line, or the file stem as fallback.
    pub title: String,
    /// Absolute site path ending in `.html`, e.g. `/setting/intro.html`.
    pub url: String,
    /// Source path relative to the content root.
    pub path: String,
    /// First path segment, or [`ROOT_CATEGORY`] for top-level files.
    pub category: String,
    /// Rendered HTML body (heading line removed).
    pub content: String,
    /// Stem of the source file name.
    pub filename: String,
}

/// Category name → pages, in scan order.
///
/// Holds indices into [`Manifest::pages`] rather than copies; pages are
/// created once by the scanner and shared from there.
#[derive(Debug, Default)]
pub struct CategoryIndex {
    groups: Vec<(String, Vec<usize>)>,
}

impl CategoryIndex {
    /// Group pages by category.
    ///
    /// Group order is first appearance in scan order, page order within each
    /// group is scan order. Pure grouping: no sorting, no deduplication —
    /// two files mapping to the same URL both keep their entry, and the
    /// later one wins when files are written.
    pub fn from_pages(pages: &[Page]) -> Self {
        let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
        for (i, page) in pages.iter().enumerate() {
            match groups.iter_mut().find(|(name, _)| *name == page.category) {
                Some((_, indices)) => indices.push(i),
                None => groups.push((page.category.clone(), vec![i])),
            }
        }
        Self { groups }
    }

    /// Page indices for a category, in scan order.
    pub fn get(&self, category: &str) -> Option<&[usize]> {
        self.groups
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, indices)| indices.as_slice())
    }

    /// Category names in scan order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(name, _)| name.as_str())
    }

    /// `(name, page indices)` pairs in scan order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.groups
            .iter()
            .map(|(name, indices)| (name.as_str(), indices.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Scan the content root into a [`Manifest`].
///
/// Loads `config.toml` (stock defaults if absent), walks the tree for
/// markdown files in sorted order, and parses each into a [`Page`].
pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;

    let files = collect_markdown_files(root)?;
    let mut pages = Vec::with_capacity(files.len());
    for path in &files {
        pages.push(parse_page(root, path, &config.markdown)?);
    }

    let categories = CategoryIndex::from_pages(&pages);

    Ok(Manifest {
        pages,
        categories,
        config,
    })
}

/// All markdown files under `root`, depth-first, entries sorted by file name.
fn collect_markdown_files(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && is_markdown(entry.path()) {
            files.push(entry.path().to_path_buf());
        }
    }
    Ok(files)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}

fn parse_page(root: &Path, path: &Path, markdown: &MarkdownConfig) -> Result<Page, ScanError> {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let content = fs::read_to_string(path)?;
    let (heading, body) = split_title_body(&content);
    let title = heading.unwrap_or_else(|| stem.clone());

    Ok(Page {
        title,
        url: derive_url(rel),
        path: rel.to_string_lossy().to_string(),
        category: derive_category(rel),
        content: markdown::render_markdown(&body, markdown),
        filename: stem,
    })
}

/// Split a document into its title and markdown body.
///
/// The title is taken from the first line anywhere in the file that matches
/// the level-1 heading pattern; that line (and only that line) is blanked so
/// the paragraphs around it stay separated, and the remainder is trimmed.
/// Returns `None` for the title when no line matches.
fn split_title_body(content: &str) -> (Option<String>, String) {
    let mut title = None;
    let mut lines: Vec<&str> = Vec::new();
    for line in content.lines() {
        if title.is_none()
            && let Some(text) = heading_text(line)
        {
            title = Some(text.to_string());
            lines.push("");
            continue;
        }
        lines.push(line);
    }
    (title, lines.join("\n").trim().to_string())
}

/// The heading text if `line` is a level-1 heading: `#`, at least one
/// whitespace character, at least one further character. The text is the
/// remainder with surrounding whitespace trimmed (which may leave it empty).
fn heading_text(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('#')?;
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_whitespace() && chars.next().is_some() => Some(rest.trim()),
        _ => None,
    }
}

/// Site URL for a relative source path: segments joined with `/`, extension
/// swapped for `.html`, leading slash.
fn derive_url(rel: &Path) -> String {
    let stem = rel
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let mut segments: Vec<String> = rel
        .parent()
        .map(|parent| {
            parent
                .components()
                .map(|c| c.as_os_str().to_string_lossy().to_string())
                .collect()
        })
        .unwrap_or_default();
    segments.push(stem);
    format!("/{}.html", segments.join("/"))
}

/// First path segment, or [`ROOT_CATEGORY`] when the file sits directly in
/// the content root.
fn derive_category(rel: &Path) -> String {
    let mut components = rel.components();
    match (components.next(), components.next()) {
        (Some(first), Some(_)) => first.as_os_str().to_string_lossy().to_string(),
        _ => ROOT_CATEGORY.to_string(),
    }
}
