//! Markdown to HTML conversion.
//!
//! Wraps the pulldown-cmark engine with the feature set configured in
//! `[markdown]`: tables, strikethrough, footnotes, bare-newline line breaks,
//! and syntax-highlighted fenced code blocks.
//!
//! Highlighting works by intercepting the parser's event stream: a fenced
//! code block's events are swallowed, its text is highlighted with syntect
//! against the configured theme, and the result is re-emitted as a raw HTML
//! event wrapped in `<pre><code>`. Everything else passes through to the
//! engine's own HTML writer. The syntax and theme sets are loaded once per
//! process and shared.

use std::sync::OnceLock;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, html};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{IncludeBackground, styled_line_to_highlighted_html};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::config::MarkdownConfig;

static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();

fn syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme_set() -> &'static ThemeSet {
    THEME_SET.get_or_init(ThemeSet::load_defaults)
}

/// True if `name` is one of the bundled highlight themes.
pub fn theme_exists(name: &str) -> bool {
    theme_set().themes.contains_key(name)
}

/// Names of all bundled highlight themes, sorted.
pub fn theme_names() -> Vec<String> {
    theme_set().themes.keys().cloned().collect()
}

/// Convert a markdown body to an HTML fragment using the configured features.
///
/// Never fails: malformed markdown is whatever the engine makes of it, and a
/// code block the highlighter cannot process is emitted as escaped plain
/// text inside its `<pre><code>` wrapper.
pub fn render_markdown(source: &str, config: &MarkdownConfig) -> String {
    let mut options = Options::empty();
    if config.tables {
        options.insert(Options::ENABLE_TABLES);
    }
    if config.strikethrough {
        options.insert(Options::ENABLE_STRIKETHROUGH);
    }
    if config.footnotes {
        options.insert(Options::ENABLE_FOOTNOTES);
    }

    let theme = if config.highlight {
        theme_set().themes.get(&config.highlight_theme)
    } else {
        None
    };

    // (fence language token, accumulated block text) while inside a fenced
    // code block that we are going to highlight.
    let mut code: Option<(String, String)> = None;
    let mut events: Vec<Event> = Vec::new();

    for event in Parser::new_ext(source, options) {
        match event {
            Event::SoftBreak if config.nl2br => events.push(Event::HardBreak),
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(fence))) if theme.is_some() => {
                let language = fence
                    .split_whitespace()
                    .next()
                    .unwrap_or_default()
                    .to_string();
                match language_class(&language) {
                    Some(class) => {
                        events.push(Event::Html(format!("<pre><code class=\"{class}\">").into()))
                    }
                    None => events.push(Event::Html("<pre><code>".into())),
                }
                code = Some((language, String::new()));
            }
            Event::Text(text) if code.is_some() => {
                if let Some((_, body)) = code.as_mut() {
                    body.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) if code.is_some() => {
                if let (Some((language, body)), Some(theme)) = (code.take(), theme) {
                    match highlight_code(&language, &body, theme) {
                        Ok(highlighted) => events.push(Event::Html(highlighted.into())),
                        Err(_) => events.push(Event::Text(body.into())),
                    }
                }
                events.push(Event::Html("</code></pre>\n".into()));
            }
            other => events.push(other),
        }
    }

    let mut html_output = String::new();
    html::push_html(&mut html_output, events.into_iter());
    html_output
}

/// A `language-<token>` class for the code element, or `None` when the fence
/// has no language or the token contains characters unfit for an attribute
/// value.
fn language_class(token: &str) -> Option<String> {
    if token.is_empty() {
        return None;
    }
    let safe = token
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '+' | '#' | '.' | '_'));
    safe.then(|| format!("language-{token}"))
}

/// Highlight one code block into inline-styled HTML spans.
///
/// Syntax lookup tries the fence token, then a file extension, then the
/// block's first line, before giving up and using plain text.
fn highlight_code(language: &str, code: &str, theme: &Theme) -> Result<String, syntect::Error> {
    let ss = syntax_set();
    let syntax = ss
        .find_syntax_by_token(language)
        .or_else(|| ss.find_syntax_by_extension(language))
        .or_else(|| ss.find_syntax_by_first_line(code))
        .unwrap_or_else(|| ss.find_syntax_plain_text());

    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut highlighted = String::new();
    for line in LinesWithEndings::from(code) {
        let regions = highlighter.highlight_line(line, ss)?;
        highlighted.push_str(&styled_line_to_highlighted_html(
            &regions,
            IncludeBackground::No,
        )?);
    }
    Ok(highlighted)
}
