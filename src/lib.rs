//! # Markwiki
//!
//! A static wiki generator: a tree of markdown files in, a linked HTML site
//! out. The filesystem is the data source — top-level directories become
//! categories, markdown files become articles, and the first `# heading` in
//! each file becomes its title.
//!
//! # Architecture: Scan, Render, Emit
//!
//! Markwiki builds a site in one pass through three stages:
//!
//! ```text
//! 1. Scan      content/   →  Manifest       (filesystem → pages + categories)
//! 2. Render    Manifest   →  HTML strings   (maud fragments into template shells)
//! 3. Emit      dist/                        (articles, index, search, static/)
//! ```
//!
//! The scan stage owns every parsing decision (titles, URLs, categories,
//! markdown rendering), so the renderers are pure functions over the
//! [`scan::Manifest`] and unit tests can exercise them without touching the
//! filesystem.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1 — walks the content tree, parses markdown files into pages, groups them by category |
//! | [`markdown`] | Markdown → HTML with configurable extensions and syntax highlighting |
//! | [`render`] | Stage 2 — builds index, article, and search pages from the manifest |
//! | [`templates`] | Template shell loading and `{{TOKEN}}` substitution |
//! | [`search`] | `search-index.json` generation for client-side search |
//! | [`assets`] | Static file placement with CSS/JS minification |
//! | [`generate`] | Stage 3 — orchestrates the full build and writes the output tree |
//! | [`config`] | `config.toml` loading, validation, and merging over stock defaults |
//! | [`output`] | CLI output formatting — inventory display of scan and build results |
//!
//! # Design Decisions
//!
//! ## Template Shells + Maud Fragments
//!
//! The page chrome lives in three on-disk HTML shells (`index.html`,
//! `article.html`, `search.html`) with literal `{{TOKEN}}` placeholders, so
//! a site's whole look can change without recompiling. The dynamic fragments
//! spliced into them — category listings, breadcrumbs, prev/next links — are
//! built with [Maud](https://maud.lambda.xyz/):
//!
//! - **Compile-time checking**: malformed fragment HTML is a build error.
//! - **XSS-safe by default**: titles and category names are auto-escaped.
//! - **Type-safe**: fragment variables are Rust expressions, not stringly-typed lookups.
//!
//! ## One Global Article Ordering
//!
//! Prev/next navigation walks a single flattened ordering of all articles —
//! configured categories first, then uncategorized pages, sorted by title.
//! It is computed once per build ([`render::global_order`]) and shared by
//! every article, so navigation is consistent across the site and cannot
//! drift between pages.
//!
//! ## Deterministic Output
//!
//! Directory walks are sorted, the article ordering is computed once, and
//! JSON is emitted with stable formatting. Rebuilding unchanged content
//! produces byte-identical output, which keeps deploy diffs honest.
//!
//! ## Client-Side Search
//!
//! Search ships as a static JSON index (`search-index.json`) that the search
//! page filters in the browser. No server component: the generated site is
//! plain files and runs anywhere a file server does.
//!
//! ## Verify Before Wipe
//!
//! The output directory is deleted and rebuilt on every run, but only after
//! content and templates have been verified. A typo'd path fails the build
//! and leaves the previous output intact.

pub mod assets;
pub mod config;
pub mod generate;
pub mod markdown;
pub mod output;
pub mod render;
pub mod scan;
pub mod search;
pub mod templates;

#[cfg(test)]
pub(crate) mod test_helpers;
