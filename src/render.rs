//! Page rendering.
//!
//! Stage 2 of the pipeline: turns the scanned [`Manifest`] into complete
//! HTML pages. The dynamic fragments (category listings, breadcrumbs,
//! prev/next links) are built with maud, which escapes user text; the
//! fragments are then spliced into the on-disk shells through
//! [`templates::fill`], which replaces placeholders verbatim.
//!
//! Article prev/next links walk one global ordering of all pages —
//! configured categories first, then root pages, sorted alphabetically by
//! title. The ordering is computed once per build with [`global_order`] and
//! shared by every article render.

use maud::{Markup, html};

use crate::config::SiteConfig;
use crate::scan::{Manifest, Page, ROOT_CATEGORY};
use crate::templates;

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the index page: category sections in configured order, then the
/// root section, substituted into the index shell.
pub fn render_index(manifest: &Manifest, template: &str) -> String {
    let content = categories_fragment(manifest).into_string();
    let crumbs = home_crumb(&manifest.config).into_string();
    templates::fill(
        template,
        &[
            (templates::TOKEN_TITLE, &manifest.config.title),
            (templates::TOKEN_CONTENT, &content),
            (templates::TOKEN_PAGE_TITLE, &manifest.config.labels.home),
            (templates::TOKEN_BREADCRUMBS, &crumbs),
        ],
    )
}

/// Renders one article page into the article shell.
///
/// `order` is the shared global ordering from [`global_order`]; a page whose
/// URL does not appear in it gets neither a previous nor a next link.
pub fn render_article(
    page: &Page,
    manifest: &Manifest,
    order: &[usize],
    template: &str,
) -> String {
    let crumbs = breadcrumbs(page, &manifest.config).into_string();
    let nav = prev_next(page, manifest, order).into_string();
    templates::fill(
        template,
        &[
            (templates::TOKEN_TITLE, &manifest.config.title),
            (templates::TOKEN_CONTENT, &page.content),
            (templates::TOKEN_PAGE_TITLE, &page.title),
            (templates::TOKEN_BREADCRUMBS, &crumbs),
            (templates::TOKEN_NAVIGATION, &nav),
        ],
    )
}

/// Renders the search page shell.
///
/// Only the site title and a fixed breadcrumb are substituted; everything
/// else on that page belongs to the shell and its client-side script.
pub fn render_search(config: &SiteConfig, template: &str) -> String {
    let crumbs = html! {
        a href="/" { (config.labels.home) }
        " / "
        (config.labels.search)
    }
    .into_string();
    templates::fill(
        template,
        &[
            (templates::TOKEN_TITLE, &config.title),
            (templates::TOKEN_BREADCRUMBS, &crumbs),
        ],
    )
}

/// One flattened ordering over all pages: configured categories in display
/// order, then root pages, sorted alphabetically by title in a single pass.
/// Pages in categories missing from the configured order are excluded, like
/// they are from the index.
pub fn global_order(manifest: &Manifest) -> Vec<usize> {
    let mut order: Vec<usize> = Vec::new();
    for name in &manifest.config.category_order {
        if let Some(indices) = manifest.categories.get(name) {
            order.extend_from_slice(indices);
        }
    }
    if let Some(indices) = manifest.categories.get(ROOT_CATEGORY) {
        order.extend_from_slice(indices);
    }
    order.sort_by(|&a, &b| manifest.pages[a].title.cmp(&manifest.pages[b].title));
    order
}

// ============================================================================
// HTML Fragments
// ============================================================================

/// The index page body: one `div.category` per configured category that was
/// actually scanned, then the root section, all inside `div.categories`.
fn categories_fragment(manifest: &Manifest) -> Markup {
    let pages = &manifest.pages;
    let categories = &manifest.categories;
    html! {
        div.categories {
            @for name in &manifest.config.category_order {
                @if let Some(indices) = categories.get(name) {
                    div.category id=(name) {
                        h2 { (capitalize(name)) }
                        (page_list(&sorted_by_title(pages, indices)))
                    }
                }
            }
            @if let Some(indices) = categories.get(ROOT_CATEGORY) {
                div.category {
                    h2 { (manifest.config.labels.other_articles) }
                    (page_list(&sorted_by_title(pages, indices)))
                }
            }
        }
    }
}

fn page_list(pages: &[&Page]) -> Markup {
    html! {
        ul.page-list {
            @for page in pages {
                li { a href=(page.url) { (page.title) } }
            }
        }
    }
}

/// The index page breadcrumb: the bare home link.
fn home_crumb(config: &SiteConfig) -> Markup {
    html! {
        a href="/" { (config.labels.home) }
    }
}

/// Breadcrumb trail: home link, category anchor link (for categorized
/// pages), then the page's own title as plain text.
fn breadcrumbs(page: &Page, config: &SiteConfig) -> Markup {
    html! {
        a href="/" { (config.labels.home) }
        @if page.category != ROOT_CATEGORY {
            " / "
            a href=(format!("/#{}", page.category)) { (capitalize(&page.category)) }
        }
        " / "
        (page.title)
    }
}

/// Prev/next links around the page's position in the global ordering.
fn prev_next(page: &Page, manifest: &Manifest, order: &[usize]) -> Markup {
    let (prev, next) = match order.iter().position(|&i| manifest.pages[i].url == page.url) {
        Some(pos) => (
            pos.checked_sub(1).map(|p| &manifest.pages[order[p]]),
            order.get(pos + 1).map(|&i| &manifest.pages[i]),
        ),
        // URL not in the ordering: no neighbors in either direction.
        None => (None, None),
    };
    html! {
        @if let Some(prev) = prev {
            a.nav-prev href=(prev.url) { "← " (prev.title) }
        }
        @if let Some(next) = next {
            a.nav-next href=(next.url) { (next.title) " →" }
        }
    }
}

fn sorted_by_title<'a>(pages: &'a [Page], indices: &[usize]) -> Vec<&'a Page> {
    let mut selected: Vec<&Page> = indices.iter().map(|&i| &pages[i]).collect();
    selected.sort_by(|a, b| a.title.cmp(&b.title));
    selected
}

/// First character uppercased, remainder lowercased (Unicode aware).
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
