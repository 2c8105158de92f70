//! Product-block discovery shared by both matching tiers.
//!
//! A product link's *block* is the closest element, starting at the link and
//! walking up, whose content satisfies the tier's shape. The walk stops as
//! soon as an element also contains a link to a different product, so a
//! block never spans two products.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

/// How many elements (the link included) the upward walk may visit.
const MAX_BLOCK_DEPTH: usize = 6;

pub(super) static PRODUCT_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"a[href*="/produto/"]"#).expect("valid selector"));
static HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1, h2, h3, h4, h5, h6").expect("valid selector"));
static ALT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[alt]").expect("valid selector"));

/// `R$ <digits>[,<two digits>]`, with `.` thousands groups allowed.
static PRICE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"R\$\s*\d[\d.]*(?:,\d{2})?").expect("valid price regex"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// A matched product block: the enclosing element plus the fields read from it.
pub(super) struct Block<'a> {
    pub element: ElementRef<'a>,
    pub name: String,
    pub price_text: String,
}

/// Trimmed `href` of a product link; empty when absent.
pub(super) fn link_href<'a>(link: ElementRef<'a>) -> &'a str {
    link.value().attr("href").map_or("", str::trim)
}

/// Primary shape: a heading holding the name, followed by a price token.
pub(super) fn heading_block(link: ElementRef<'_>) -> Option<Block<'_>> {
    find_block(link, |element| {
        let heading = if is_heading(element) {
            element
        } else {
            element.select(&HEADING).next()?
        };

        let after_heading = text_after(element, heading);
        let price = PRICE_TOKEN.find(&after_heading)?;
        let name = element_text(heading);

        Some(Block {
            element,
            price_text: price.as_str().to_owned(),
            name,
        })
    })
}

/// Fallback shape: an `alt` attribute inside the link and a price token
/// anywhere in the block.
pub(super) fn alt_block(link: ElementRef<'_>) -> Option<Block<'_>> {
    let alt = link.select(&ALT).next()?.value().attr("alt")?;
    let name = collapse_whitespace(alt);

    find_block(link, |element| {
        let text = element_text(element);
        let price = PRICE_TOKEN.find(&text)?;
        Some(Block {
            element,
            name: name.clone(),
            price_text: price.as_str().to_owned(),
        })
    })
}

fn find_block<'a, F>(link: ElementRef<'a>, matches: F) -> Option<Block<'a>>
where
    F: Fn(ElementRef<'a>) -> Option<Block<'a>>,
{
    let href = link_href(link);
    let path = std::iter::once(link).chain(link.ancestors().filter_map(ElementRef::wrap));

    for element in path.take(MAX_BLOCK_DEPTH) {
        if links_to_other_product(element, href) {
            return None;
        }
        if let Some(block) = matches(element) {
            return Some(block);
        }
    }
    None
}

fn links_to_other_product(element: ElementRef<'_>, href: &str) -> bool {
    element
        .select(&PRODUCT_LINK)
        .any(|other| link_href(other) != href)
}

fn is_heading(element: ElementRef<'_>) -> bool {
    matches!(
        element.value().name(),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6"
    )
}

/// Text content with text nodes separated by a space and whitespace runs
/// collapsed, so adjacent elements never glue words together.
fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

/// Text of `block` that follows `heading` in document order, excluding the
/// heading's own text.
fn text_after(block: ElementRef<'_>, heading: ElementRef<'_>) -> String {
    let mut past_heading = false;
    let mut parts = Vec::new();
    for node in block.descendants() {
        if node.id() == heading.id() {
            past_heading = true;
            continue;
        }
        if !past_heading || node.ancestors().any(|a| a.id() == heading.id()) {
            continue;
        }
        if let Some(text) = node.value().as_text() {
            parts.push(&**text);
        }
    }
    collapse_whitespace(&parts.join(" "))
}

pub(super) fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_owned()
}
