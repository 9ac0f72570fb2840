//! Small tree-query helpers on top of `scraper`.
//!
//! Strategies only need text reads, attribute reads and "nearest ancestor
//! matching X" lookups; everything DOM-specific lives here.

use super::detectors::clean_text;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

pub(crate) fn selector(css: &'static str) -> Selector {
    // Only ever called with literals from this crate.
    Selector::parse(css).unwrap()
}

static LINK: Lazy<Selector> = Lazy::new(|| selector("a[href]"));
static HEADING: Lazy<Selector> = Lazy::new(|| selector("h1, h2, h3, h4"));

/// Text content with whitespace collapsed, like `textContent.trim()`.
pub fn text_content(element: ElementRef) -> String {
    clean_text(&element.text().collect::<String>())
}

/// Text content with a space between every text node, so tokens from
/// sibling elements never run together.
pub fn spaced_text(element: ElementRef) -> String {
    clean_text(&element.text().collect::<Vec<_>>().join(" "))
}

pub fn attr<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}

/// `class` and `id` attributes joined together, for substring tests.
pub fn class_and_id(element: ElementRef) -> String {
    let class = element.value().attr("class").unwrap_or_default();
    let id = element.value().id().unwrap_or_default();
    format!("{class} {id}")
}

pub fn has_class_containing(element: ElementRef, needle: &str) -> bool {
    element
        .value()
        .attr("class")
        .map(|class| class.to_ascii_lowercase().contains(needle))
        .unwrap_or(false)
}

pub fn tag_is(element: ElementRef, tag: &str) -> bool {
    element.value().name().eq_ignore_ascii_case(tag)
}

/// The element itself followed by its element ancestors, innermost first.
pub fn self_and_ancestors<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    std::iter::once(element).chain(element.ancestors().filter_map(ElementRef::wrap))
}

/// Nearest element (starting with `element` itself) accepted by `predicate`.
pub fn closest<'a, F>(element: ElementRef<'a>, predicate: F) -> Option<ElementRef<'a>>
where
    F: Fn(ElementRef<'a>) -> bool,
{
    self_and_ancestors(element).find(|candidate| predicate(*candidate))
}

/// True when some strict ancestor matches `selector`.
pub fn has_ancestor_matching(element: ElementRef, selector: &Selector) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| selector.matches(&ancestor))
}

pub fn first_heading_text(element: ElementRef) -> Option<String> {
    element.select(&HEADING).next().map(text_content)
}

/// Links inside `element` as `(text, href)` pairs, in document order.
pub fn links(element: ElementRef) -> Vec<(String, String)> {
    element
        .select(&LINK)
        .filter_map(|link| {
            let href = link.value().attr("href")?;
            Some((text_content(link), href.trim().to_string()))
        })
        .collect()
}

pub fn document_first<'a>(document: &'a Html, selector: &Selector) -> Option<ElementRef<'a>> {
    document.select(selector).next()
}
