//! Search index generation.
//!
//! Builds `search-index.json`, the flat array the search page's client-side
//! script fetches and filters. One entry per page in scan order, each with
//! the page's title, URL, category, and a plain-text digest of its body:
//! markup stripped, whitespace collapsed, cut to [`DIGEST_LIMIT`]
//! characters.

use serde::Serialize;

use crate::scan::Manifest;

/// Maximum length of a digest, in characters.
pub const DIGEST_LIMIT: usize = 500;

/// One searchable record in `search-index.json`.
#[derive(Debug, Serialize)]
pub struct SearchEntry<'a> {
    pub title: &'a str,
    pub url: &'a str,
    pub category: &'a str,
    pub content: String,
}

/// Serialized search index for the whole manifest: a pretty-printed JSON
/// array with non-ASCII text kept literal.
pub fn index_json(manifest: &Manifest) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&build_entries(manifest))
}

/// One entry per page, in scan order.
pub fn build_entries(manifest: &Manifest) -> Vec<SearchEntry<'_>> {
    manifest
        .pages
        .iter()
        .map(|page| SearchEntry {
            title: &page.title,
            url: &page.url,
            category: &page.category,
            content: digest(&page.content),
        })
        .collect()
}

/// Plain-text digest of a rendered HTML body.
fn digest(html: &str) -> String {
    let text = strip_tags(html);
    let collapsed: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_chars(&collapsed, DIGEST_LIMIT).to_string()
}

/// Replace each HTML tag with a single space.
///
/// A tag is a `<`, at least one character that is not `>`, then `>`. A bare
/// `<>` or a `<` with no closing bracket is kept as literal text.
fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('>') {
            Some(close) if close > 0 => {
                out.push(' ');
                rest = &after[close + 1..];
            }
            _ => {
                out.push('<');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// The longest prefix of `text` holding at most `limit` characters.
fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{manifest_with, page};

    // =========================================================================
    // Entries
    // =========================================================================

    #[test]
    fn one_entry_per_page_in_scan_order() {
        let manifest = manifest_with(
            vec![
                page("Zeta", "/setting/zeta.html", "setting"),
                page("Alpha", "/history/alpha.html", "history"),
            ],
            &["setting", "history"],
        );
        let entries = build_entries(&manifest);

        let titles: Vec<&str> = entries.iter().map(|e| e.title).collect();
        assert_eq!(titles, vec!["Zeta", "Alpha"]);
        assert_eq!(entries[0].url, "/setting/zeta.html");
        assert_eq!(entries[0].category, "setting");
    }

    #[test]
    fn entry_content_is_markup_free() {
        let mut p = page("Intro", "/setting/intro.html", "setting");
        p.content = "<p>Hello <strong>world</strong></p>".to_string();
        let manifest = manifest_with(vec![p], &["setting"]);

        let entries = build_entries(&manifest);
        assert_eq!(entries[0].content, "Hello world");
    }

    #[test]
    fn entry_content_collapses_whitespace() {
        let mut p = page("Intro", "/intro.html", "root");
        p.content = "<p>first</p>\n<p>second   line</p>\n".to_string();
        let manifest = manifest_with(vec![p], &[]);

        let entries = build_entries(&manifest);
        assert_eq!(entries[0].content, "first second line");
    }

    #[test]
    fn entry_content_is_capped_at_limit() {
        let mut p = page("Long", "/long.html", "root");
        p.content = format!("<p>{}</p>", "ы".repeat(DIGEST_LIMIT * 2));
        let manifest = manifest_with(vec![p], &[]);

        let entries = build_entries(&manifest);
        assert_eq!(entries[0].content.chars().count(), DIGEST_LIMIT);
    }

    // =========================================================================
    // JSON output
    // =========================================================================

    #[test]
    fn json_is_pretty_printed_array() {
        let manifest = manifest_with(vec![page("Intro", "/intro.html", "root")], &[]);
        let json = index_json(&manifest).unwrap();

        assert!(json.starts_with("[\n"));
        assert!(json.contains("  {\n"));
        assert!(json.contains("\"title\": \"Intro\""));
        assert!(json.contains("\"url\": \"/intro.html\""));
        assert!(json.contains("\"category\": \"root\""));
    }

    #[test]
    fn json_keeps_non_ascii_literal() {
        let manifest = manifest_with(
            vec![page("Введение", "/сеттинг/введение.html", "сеттинг")],
            &["сеттинг"],
        );
        let json = index_json(&manifest).unwrap();

        assert!(json.contains("Введение"));
        assert!(!json.contains("\\u"));
    }

    #[test]
    fn json_for_empty_manifest_is_empty_array() {
        let manifest = manifest_with(vec![], &[]);
        assert_eq!(index_json(&manifest).unwrap(), "[]");
    }

    // =========================================================================
    // Tag stripping
    // =========================================================================

    #[test]
    fn strip_tags_replaces_tags_with_spaces() {
        assert_eq!(strip_tags("<p>a</p><p>b</p>"), " a  b ");
        assert_eq!(strip_tags("plain text"), "plain text");
    }

    #[test]
    fn strip_tags_keeps_empty_and_unclosed_brackets() {
        assert_eq!(strip_tags("a <> b"), "a <> b");
        assert_eq!(strip_tags("a < b"), "a < b");
        assert_eq!(strip_tags("tail<"), "tail<");
    }

    #[test]
    fn strip_tags_spans_to_first_close() {
        // The bracket scan is greedy about content, not structure.
        assert_eq!(strip_tags("<a<b>"), " ");
        assert_eq!(strip_tags("<a>x<b"), " x<b");
    }

    #[test]
    fn truncate_respects_character_boundaries() {
        assert_eq!(truncate_chars("привет", 4), "прив");
        assert_eq!(truncate_chars("short", 500), "short");
    }
}
