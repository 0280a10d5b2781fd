//! CLI output formatting for the scan and build stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entity (category, article) is its semantic identity — title and
//! positional index — with filesystem paths shown as secondary context via
//! indented `Source:` lines. The output reads as a content inventory while
//! still letting users trace every article back to its markdown file.
//!
//! # Output Format
//!
//! ## Scan / check
//!
//! ```text
//! Categories
//! 001 setting (2 articles)
//!     001 Introduction
//!         Source: setting/intro.md
//!         URL: /setting/intro.html
//!     002 Places
//!         Source: setting/places.md
//!         URL: /setting/places.html
//! 002 root (1 articles)
//!     001 Readme
//!         Source: readme.md
//!         URL: /readme.html
//!
//! Config
//!     config.toml
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//! Search → search.html
//! Search index → search-index.json (2 entries)
//!
//! Articles
//!     001 Readme → readme.html
//!     002 Introduction → setting/intro.html
//!
//! Static
//!     search.js: minified
//!     style.css: minified
//!
//! Generated 2 articles, 2 static files
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use std::path::Path;

use crate::assets::AssetStatus;
use crate::generate::BuildReport;
use crate::scan::Manifest;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Format a category header: positional index + name + article count.
///
/// ```text
/// 001 setting (2 articles)
/// ```
fn category_header(index: usize, name: &str, count: usize) -> String {
    format!("{} {} ({} articles)", format_index(index), name, count)
}

// ============================================================================
// Scan output
// ============================================================================

/// Format scan stage output showing the discovered wiki structure.
///
/// Categories appear in scan order with their articles nested under them,
/// each article tracing back to its source file.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Categories".to_string());
    for (ci, (name, indices)) in manifest.categories.iter().enumerate() {
        lines.push(category_header(ci + 1, name, indices.len()));
        for (pi, &idx) in indices.iter().enumerate() {
            let page = &manifest.pages[idx];
            lines.push(format!("    {} {}", format_index(pi + 1), page.title));
            lines.push(format!("        Source: {}", page.path));
            lines.push(format!("        URL: {}", page.url));
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push("    config.toml".to_string());
    } else {
        lines.push("    (stock defaults)".to_string());
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Build output
// ============================================================================

/// Format the build report: each document with `→` and its output path,
/// placed assets with their status, and a closing summary line.
pub fn format_build_report(report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Home \u{2192} index.html".to_string());
    lines.push("Search \u{2192} search.html".to_string());
    lines.push(format!(
        "Search index \u{2192} search-index.json ({} entries)",
        report.manifest.pages.len()
    ));

    if !report.manifest.pages.is_empty() {
        lines.push(String::new());
        lines.push("Articles".to_string());
        for (i, page) in report.manifest.pages.iter().enumerate() {
            lines.push(format!(
                "    {} {} \u{2192} {}",
                format_index(i + 1),
                page.title,
                page.url.trim_start_matches('/')
            ));
        }
    }

    if !report.assets.placed.is_empty() {
        lines.push(String::new());
        lines.push("Static".to_string());
        for asset in &report.assets.placed {
            let status = match asset.status {
                AssetStatus::Copied => "copied",
                AssetStatus::Minified => "minified",
            };
            lines.push(format!("    {}: {}", asset.path, status));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {} articles, {} static files",
        report.manifest.pages.len(),
        report.assets.placed.len()
    ));

    lines
}

/// Print the build report to stdout.
pub fn print_build_report(report: &BuildReport) {
    for line in format_build_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
