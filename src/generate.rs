//! Site generation.
//!
//! The orchestrating stage of the markwiki build pipeline. Verifies the
//! input directories, scans the content tree, renders every page through
//! the template shells, emits the search index, and places static assets.
//!
//! ## Generated Output
//!
//! ```text
//! dist/
//! ├── index.html                 # Category listing (from index.html shell)
//! ├── search.html                # Search page (from search.html shell)
//! ├── search-index.json          # Client-side search data
//! ├── readme.html                # Root article
//! ├── setting/
//! │   ├── intro.html             # Articles mirror the content tree
//! │   └── regions/
//! │       └── north.html
//! └── static/
//!     ├── style.css              # Minified
//!     └── search.js              # Minified
//! ```
//!
//! The output directory is deleted and rebuilt on every run, but only after
//! the content and template directories have been verified, so a broken
//! invocation never destroys the previous build.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::assets::{self, AssetError, AssetSummary};
use crate::render;
use crate::scan::{self, Manifest, ScanError};
use crate::search;
use crate::templates::{self, TemplateError, TemplateSet};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Content directory not found: {0}")]
    MissingContent(PathBuf),
    #[error("Templates directory not found: {0}")]
    MissingTemplates(PathBuf),
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What a build produced, for reporting.
#[derive(Debug)]
pub struct BuildReport {
    pub manifest: Manifest,
    pub assets: AssetSummary,
    /// Output-relative paths of the documents written, in write order.
    pub written: Vec<String>,
}

/// Run the full build: content and templates in, static site out.
pub fn generate(
    content_dir: &Path,
    templates_dir: &Path,
    static_dir: &Path,
    output_dir: &Path,
) -> Result<BuildReport, GenerateError> {
    let (templates, manifest) = load_inputs(content_dir, templates_dir)?;

    if output_dir.exists() {
        fs::remove_dir_all(output_dir)?;
    }
    fs::create_dir_all(output_dir)?;

    let mut written = Vec::new();

    let index_html = render::render_index(&manifest, &templates.index);
    fs::write(output_dir.join("index.html"), index_html)?;
    println!("Generated index.html");
    written.push("index.html".to_string());

    let search_html = render::render_search(&manifest.config, &templates.search);
    fs::write(output_dir.join("search.html"), search_html)?;
    println!("Generated search.html");
    written.push("search.html".to_string());

    let order = render::global_order(&manifest);
    for page in &manifest.pages {
        let html = render::render_article(page, &manifest, &order, &templates.article);
        let rel = page.url.trim_start_matches('/');
        let target = output_dir.join(rel);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, html)?;
        println!("Generated {rel}");
        written.push(rel.to_string());
    }

    let index_json = search::index_json(&manifest)?;
    fs::write(output_dir.join("search-index.json"), index_json)?;
    println!("Generated search-index.json");
    written.push("search-index.json".to_string());

    let assets = assets::copy_static(static_dir, output_dir)?;

    Ok(BuildReport {
        manifest,
        assets,
        written,
    })
}

/// Validate the inputs without writing anything: both directories must
/// exist, all three shells must load, and the content tree must scan.
pub fn check(content_dir: &Path, templates_dir: &Path) -> Result<Manifest, GenerateError> {
    let (_, manifest) = load_inputs(content_dir, templates_dir)?;
    Ok(manifest)
}

fn load_inputs(
    content_dir: &Path,
    templates_dir: &Path,
) -> Result<(TemplateSet, Manifest), GenerateError> {
    if !content_dir.is_dir() {
        return Err(GenerateError::MissingContent(content_dir.to_path_buf()));
    }
    if !templates_dir.is_dir() {
        return Err(GenerateError::MissingTemplates(templates_dir.to_path_buf()));
    }
    let templates = templates::load(templates_dir)?;
    let manifest = scan::scan(content_dir)?;
    Ok((templates, manifest))
}
