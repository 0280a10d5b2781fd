//! Template shell loading and placeholder substitution.
//!
//! The three page shells (`index.html`, `article.html`, `search.html`) are
//! plain HTML files the site owner edits freely; the renderers only promise
//! to replace the `{{TOKEN}}` placeholders listed here. Shells live on disk
//! rather than in code so a site can be restyled without recompiling.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    Missing(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Site title.
pub const TOKEN_TITLE: &str = "{{TITLE}}";
/// Main body fragment (category listing or rendered article).
pub const TOKEN_CONTENT: &str = "{{CONTENT}}";
/// Per-page title (home label or article title).
pub const TOKEN_PAGE_TITLE: &str = "{{PAGE_TITLE}}";
/// Breadcrumb trail fragment.
pub const TOKEN_BREADCRUMBS: &str = "{{BREADCRUMBS}}";
/// Prev/next link fragment (article shell only).
pub const TOKEN_NAVIGATION: &str = "{{NAVIGATION}}";

/// The three page shells, read once per build.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    pub index: String,
    pub article: String,
    pub search: String,
}

/// Read all three shells from the template directory.
///
/// A missing file fails with an error naming its full path; nothing is
/// cached beyond this one read per build.
pub fn load(dir: &Path) -> Result<TemplateSet, TemplateError> {
    Ok(TemplateSet {
        index: read_template(dir, "index.html")?,
        article: read_template(dir, "article.html")?,
        search: read_template(dir, "search.html")?,
    })
}

fn read_template(dir: &Path, name: &str) -> Result<String, TemplateError> {
    let path = dir.join(name);
    if !path.exists() {
        return Err(TemplateError::Missing(path));
    }
    Ok(fs::read_to_string(&path)?)
}

/// Replace every occurrence of each token with its value, in the listed
/// order. Tokens not listed are left untouched, so a shell may carry markers
/// consumed by client-side script instead.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (token, value) in values {
        out = out.replace(token, value);
    }
    out
}
