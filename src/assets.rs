//! Static asset placement.
//!
//! Mirrors the static source tree into `<output>/static/`. Stylesheets and
//! scripts are minified on the way through; everything else is copied
//! byte-for-byte. The destination is rebuilt from scratch on every run so
//! stale files never linger.
//!
//! Minification never fails a build: a stylesheet lightningcss cannot
//! handle, or a css/js file that is not UTF-8, is placed verbatim instead.

use std::fs;
use std::path::Path;

use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// How one file made it into the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetStatus {
    Copied,
    Minified,
}

/// One file placed by the asset stage.
#[derive(Debug)]
pub struct PlacedAsset {
    /// Path relative to the destination `static/` directory.
    pub path: String,
    pub status: AssetStatus,
}

/// What the asset stage placed, in walk order.
#[derive(Debug, Default)]
pub struct AssetSummary {
    pub placed: Vec<PlacedAsset>,
}

impl AssetSummary {
    pub fn minified_count(&self) -> usize {
        self.placed
            .iter()
            .filter(|a| a.status == AssetStatus::Minified)
            .count()
    }
}

/// Rebuild `<output>/static/` from the static source tree.
///
/// A missing source tree is not an error; the destination is still reset so
/// the output directory always has a `static/` directory.
pub fn copy_static(static_dir: &Path, output_dir: &Path) -> Result<AssetSummary, AssetError> {
    let dest_root = output_dir.join("static");
    if dest_root.exists() {
        fs::remove_dir_all(&dest_root)?;
    }
    fs::create_dir_all(&dest_root)?;

    let mut summary = AssetSummary::default();
    if !static_dir.exists() {
        return Ok(summary);
    }

    for entry in WalkDir::new(static_dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry.path().strip_prefix(static_dir).unwrap_or(entry.path());
        let target = dest_root.join(rel);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        let status = if has_extension(entry.path(), "css") {
            place_css(entry.path(), &target)?
        } else if has_extension(entry.path(), "js") {
            place_js(entry.path(), &target)?
        } else {
            fs::copy(entry.path(), &target)?;
            AssetStatus::Copied
        };
        summary.placed.push(PlacedAsset {
            path: rel.to_string_lossy().to_string(),
            status,
        });
    }

    Ok(summary)
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}

/// Minify a stylesheet into `target`, falling back to a verbatim copy.
fn place_css(source: &Path, target: &Path) -> Result<AssetStatus, AssetError> {
    let bytes = fs::read(source)?;
    if let Ok(text) = std::str::from_utf8(&bytes)
        && let Some(minified) = minify_css(text)
    {
        fs::write(target, minified)?;
        return Ok(AssetStatus::Minified);
    }
    fs::write(target, bytes)?;
    Ok(AssetStatus::Copied)
}

/// Minify a script into `target`, falling back to a verbatim copy.
fn place_js(source: &Path, target: &Path) -> Result<AssetStatus, AssetError> {
    let bytes = fs::read(source)?;
    match std::str::from_utf8(&bytes) {
        Ok(text) => {
            fs::write(target, minifier::js::minify(text).to_string())?;
            Ok(AssetStatus::Minified)
        }
        Err(_) => {
            fs::write(target, bytes)?;
            Ok(AssetStatus::Copied)
        }
    }
}

fn minify_css(source: &str) -> Option<String> {
    let mut stylesheet = StyleSheet::parse(
        source,
        ParserOptions {
            error_recovery: true,
            ..ParserOptions::default()
        },
    )
    .ok()?;
    stylesheet.minify(MinifyOptions::default()).ok()?;
    let output = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .ok()?;
    Some(output.code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::write_file;
    use tempfile::TempDir;

    fn read(output: &Path, rel: &str) -> String {
        fs::read_to_string(output.join("static").join(rel)).unwrap()
    }

    #[test]
    fn copies_plain_files_verbatim() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_file(src.path(), "fonts/note.txt", "hello\n");

        let summary = copy_static(src.path(), out.path()).unwrap();

        assert_eq!(read(out.path(), "fonts/note.txt"), "hello\n");
        assert_eq!(summary.placed.len(), 1);
        assert_eq!(summary.placed[0].path, "fonts/note.txt");
        assert_eq!(summary.placed[0].status, AssetStatus::Copied);
    }

    #[test]
    fn minifies_stylesheets() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_file(
            src.path(),
            "style.css",
            "body {\n    color: #ff0000;\n    margin: 0px;\n}\n",
        );

        let summary = copy_static(src.path(), out.path()).unwrap();

        let minified = read(out.path(), "style.css");
        assert!(minified.len() < "body {\n    color: #ff0000;\n    margin: 0px;\n}\n".len());
        assert_eq!(summary.placed[0].status, AssetStatus::Minified);
        assert_eq!(summary.minified_count(), 1);
    }

    #[test]
    fn minifies_scripts() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_file(
            src.path(),
            "app.js",
            "function hello() {\n    // greet\n    return 1 + 2;\n}\n",
        );

        let summary = copy_static(src.path(), out.path()).unwrap();

        let minified = read(out.path(), "app.js");
        assert!(!minified.contains("// greet"));
        assert_eq!(summary.placed[0].status, AssetStatus::Minified);
    }

    #[test]
    fn non_utf8_stylesheet_is_copied_verbatim() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let bytes = [0xff, 0xfe, 0x00, 0x41];
        fs::write(src.path().join("weird.css"), bytes).unwrap();

        let summary = copy_static(src.path(), out.path()).unwrap();

        assert_eq!(
            fs::read(out.path().join("static/weird.css")).unwrap(),
            bytes
        );
        assert_eq!(summary.minified_count(), 0);
    }

    #[test]
    fn destination_is_rebuilt_from_scratch() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_file(out.path(), "static/stale.css", "old {}");
        write_file(src.path(), "fresh.txt", "new");

        copy_static(src.path(), out.path()).unwrap();

        assert!(!out.path().join("static/stale.css").exists());
        assert!(out.path().join("static/fresh.txt").exists());
    }

    #[test]
    fn missing_source_tree_yields_empty_static_dir() {
        let out = TempDir::new().unwrap();
        let summary = copy_static(Path::new("/nonexistent/static"), out.path()).unwrap();

        assert!(out.path().join("static").is_dir());
        assert!(summary.placed.is_empty());
    }

    #[test]
    fn empty_source_tree_yields_empty_static_dir() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();

        let summary = copy_static(src.path(), out.path()).unwrap();

        assert!(out.path().join("static").is_dir());
        assert!(summary.placed.is_empty());
        assert_eq!(fs::read_dir(out.path().join("static")).unwrap().count(), 0);
    }

    #[test]
    fn nested_directories_are_mirrored() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_file(src.path(), "css/theme/dark.css", "a{color:red}");
        write_file(src.path(), "img/logo.svg", "<svg/>");

        let summary = copy_static(src.path(), out.path()).unwrap();

        assert!(out.path().join("static/css/theme/dark.css").exists());
        assert!(out.path().join("static/img/logo.svg").exists());
        assert_eq!(summary.placed.len(), 2);
    }
}
