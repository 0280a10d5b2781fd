//! Shared test utilities for the markwiki test suite.
//!
//! Provides content-tree builders for scan tests and in-memory manifest
//! builders for renderer tests, plus lookup helpers that panic with the
//! available candidates on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! write_file(tmp.path(), "setting/intro.md", "# Introduction\n\nHello");
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let page = find_page(&manifest, "Introduction");
//! assert_eq!(page.url, "/setting/intro.html");
//! ```

use std::fs;
use std::path::Path;

use crate::config::SiteConfig;
use crate::scan::{CategoryIndex, Manifest, Page};

// =========================================================================
// Fixture setup
// =========================================================================

/// Write `content` to `root/rel`, creating parent directories as needed.
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Write the three template shells to `dir`, each carrying every
/// placeholder it can use.
pub fn write_shells(dir: &Path) {
    write_file(
        dir,
        "index.html",
        "<title>{{TITLE}}</title><h1>{{PAGE_TITLE}}</h1>\
<nav>{{BREADCRUMBS}}</nav>{{CONTENT}}",
    );
    write_file(
        dir,
        "article.html",
        "<title>{{TITLE}}</title><nav>{{BREADCRUMBS}}</nav>\
<h1>{{PAGE_TITLE}}</h1><main>{{CONTENT}}</main><footer>{{NAVIGATION}}</footer>",
    );
    write_file(
        dir,
        "search.html",
        "<title>{{TITLE}}</title><nav>{{BREADCRUMBS}}</nav><div id=\"results\"></div>",
    );
}

// =========================================================================
// In-memory manifest builders
// =========================================================================

/// A page with plausible derived fields, for renderer tests that never touch
/// the filesystem.
///
/// `url` should look like `/category/name.html` or `/name.html`; the source
/// path and filename are derived from it.
pub fn page(title: &str, url: &str, category: &str) -> Page {
    let rel = url.trim_start_matches('/');
    let stem = rel
        .rsplit('/')
        .next()
        .unwrap_or(rel)
        .trim_end_matches(".html");
    Page {
        title: title.to_string(),
        url: url.to_string(),
        path: format!("{}.md", rel.trim_end_matches(".html")),
        category: category.to_string(),
        content: format!("<p>{title} body</p>"),
        filename: stem.to_string(),
    }
}

/// A manifest over `pages` with the given category display order and stock
/// defaults for everything else.
pub fn manifest_with(pages: Vec<Page>, category_order: &[&str]) -> Manifest {
    let config = SiteConfig {
        category_order: category_order.iter().map(|s| s.to_string()).collect(),
        ..SiteConfig::default()
    };
    let categories = CategoryIndex::from_pages(&pages);
    Manifest {
        pages,
        categories,
        config,
    }
}

// =========================================================================
// Manifest lookups — panics with a clear message on miss
// =========================================================================

/// Find a page by title. Panics if not found.
pub fn find_page<'a>(manifest: &'a Manifest, title: &str) -> &'a Page {
    manifest
        .pages
        .iter()
        .find(|p| p.title == title)
        .unwrap_or_else(|| {
            let titles = page_titles(manifest);
            panic!("page '{title}' not found. Available: {titles:?}")
        })
}

/// All page titles in scan order.
pub fn page_titles(manifest: &Manifest) -> Vec<&str> {
    manifest.pages.iter().map(|p| p.title.as_str()).collect()
}
