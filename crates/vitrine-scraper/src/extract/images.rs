//! Windowed image scan around a product link.
//!
//! Storefronts rarely nest product photos inside the same element as the
//! name and price, so images are collected from a fixed character window of
//! raw markup centred on the link instead of from the DOM block.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

static IMG: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").expect("valid selector"));

/// Sources containing any of these are decorative, not product photos.
const NOISE_MARKERS: [&str; 2] = ["placeholder", "logo"];

/// Collects `<img>` sources within `radius` characters before and after the
/// `occurrence`-th (zero-based) `href` attribute carrying `href` in `html`.
/// Returns document order; duplicates are left for the normalizer.
pub(super) fn scan_images(
    html: &str,
    href: &str,
    occurrence: usize,
    radius: usize,
) -> Vec<String> {
    let Some(pos) = locate_link(html, href, occurrence) else {
        return Vec::new();
    };

    let start = window_start(html, pos.saturating_sub(radius));
    let end = window_end(
        html,
        pos.saturating_add(href.len())
            .saturating_add(radius)
            .min(html.len()),
    );

    let fragment = Html::parse_fragment(&html[start..end]);
    fragment
        .select(&IMG)
        .filter_map(image_source)
        .filter(|src| !is_noise(src))
        .map(str::to_owned)
        .collect()
}

/// Byte offset of the `occurrence`-th `href` attribute value equal to `href`.
///
/// Quoted forms are tried first so `/produto/anel-1` does not match inside
/// `/produto/anel-10`; the entity-escaped form covers `&amp;` in query strings.
/// Occurrences in text or other attributes are not counted.
fn locate_link(html: &str, href: &str, occurrence: usize) -> Option<usize> {
    if href.is_empty() {
        return None;
    }
    let escaped = href.replace('&', "&amp;");
    [
        format!("\"{href}\""),
        format!("'{href}'"),
        format!("\"{escaped}\""),
        format!("'{escaped}'"),
        href.to_owned(),
    ]
    .iter()
    .find_map(|needle| {
        html.match_indices(needle.as_str())
            .map(|(pos, _)| pos)
            .filter(|&pos| follows_href_attr(html, pos))
            .nth(occurrence)
    })
}

/// Whether the markup just before `pos` reads `href=`, ignoring whitespace
/// and ASCII case.
fn follows_href_attr(html: &str, pos: usize) -> bool {
    let Some(before) = html[..pos].trim_end().strip_suffix('=') else {
        return false;
    };
    let before = before.trim_end();
    before
        .len()
        .checked_sub(4)
        .and_then(|at| before.get(at..))
        .is_some_and(|name| name.eq_ignore_ascii_case("href"))
}

/// `src`, or `data-src` when `src` is missing, blank, or an inline `data:` URI.
fn image_source(img: ElementRef<'_>) -> Option<&str> {
    let value = img.value();
    value
        .attr("src")
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.starts_with("data:"))
        .or_else(|| {
            value
                .attr("data-src")
                .map(str::trim)
                .filter(|s| !s.is_empty())
        })
}

fn is_noise(src: &str) -> bool {
    let lower = src.to_ascii_lowercase();
    NOISE_MARKERS.iter().any(|marker| lower.contains(marker))
}

fn window_start(s: &str, mut idx: usize) -> usize {
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

fn window_end(s: &str, mut idx: usize) -> usize {
    while idx < s.len() && !s.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}
