//! Product extraction from catalog page markup.
//!
//! Extraction runs in two tiers against a tolerant HTML5 tree:
//!
//! 1. **Primary** — a `/produto/` link whose block holds a heading (the name)
//!    followed by an `R$` price token. Images come from a windowed scan of the
//!    raw markup around the link.
//! 2. **Fallback** — only when the primary tier yields no candidates: a
//!    `/produto/` link wrapping an element with an `alt` attribute (the name)
//!    and a price token somewhere in its block. No images.
//!
//! The tiers are never merged. Malformed markup is not an error; it just
//! matches nothing.

mod blocks;
mod images;

use std::collections::{HashMap, HashSet};

use scraper::{ElementRef, Html};
use vitrine_core::{AppConfig, ExtractionStrategy};

use crate::normalize::Normalizer;
use crate::types::{CandidateSet, ExtractionResult, ProductCandidate};

use blocks::{Block, PRODUCT_LINK};

/// Characters of raw markup scanned on each side of a product link for images.
pub const DEFAULT_IMAGE_SCAN_RADIUS: usize = 1500;

/// Category word the source catalog prepends to every product title.
const CATEGORY_PREFIX: &str = "Anel ";

/// Tunables for a single extraction pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    pub image_scan_radius: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            image_scan_radius: DEFAULT_IMAGE_SCAN_RADIUS,
        }
    }
}

impl ExtractOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            image_scan_radius: config.image_scan_radius,
        }
    }
}

/// Extracts and normalizes the products on one page with default options.
///
/// `base_url` is the origin relative links and image sources are resolved
/// against.
#[must_use]
pub fn extract(html: &str, base_url: &str) -> ExtractionResult {
    extract_with(html, &Normalizer::new(base_url), ExtractOptions::default())
}

/// Extracts candidates and runs each through `normalizer`, preserving order.
#[must_use]
pub fn extract_with(
    html: &str,
    normalizer: &Normalizer,
    options: ExtractOptions,
) -> ExtractionResult {
    let set = extract_candidates(html, options);

    let mut records = Vec::with_capacity(set.candidates.len());
    let mut skipped = 0;
    for candidate in set.candidates {
        match normalizer.normalize(candidate) {
            Ok(record) => records.push(record),
            Err(drop) => {
                tracing::debug!(reason = %drop, "candidate dropped");
                skipped += 1;
            }
        }
    }

    ExtractionResult {
        records,
        raw_match_count: set.raw_match_count,
        strategy_used: set.strategy,
        skipped,
    }
}

/// Runs the primary tier, then the fallback tier if the primary produced no
/// candidates.
#[must_use]
pub fn extract_candidates(html: &str, options: ExtractOptions) -> CandidateSet {
    let document = Html::parse_document(html);

    let (primary, primary_raw) = match_primary(&document, html, options);
    if !primary.is_empty() {
        tracing::debug!(
            strategy = %ExtractionStrategy::Primary,
            raw_matches = primary_raw,
            candidates = primary.len(),
            "extraction complete"
        );
        return CandidateSet {
            candidates: primary,
            raw_match_count: primary_raw,
            strategy: ExtractionStrategy::Primary,
        };
    }

    let (fallback, fallback_raw) = match_fallback(&document);
    if !fallback.is_empty() {
        tracing::debug!(
            strategy = %ExtractionStrategy::Fallback,
            raw_matches = fallback_raw,
            candidates = fallback.len(),
            "primary pattern matched nothing; used fallback"
        );
        return CandidateSet {
            candidates: fallback,
            raw_match_count: fallback_raw,
            strategy: ExtractionStrategy::Fallback,
        };
    }

    tracing::debug!(
        raw_matches = primary_raw + fallback_raw,
        "no product blocks matched"
    );
    CandidateSet::empty(primary_raw + fallback_raw)
}

fn match_primary(
    document: &Html,
    html: &str,
    options: ExtractOptions,
) -> (Vec<ProductCandidate>, usize) {
    let matches = innermost_blocks(document, blocks::heading_block);
    let raw = matches.len();
    let candidates = matches
        .into_iter()
        .filter_map(|m| {
            let mut candidate = candidate_from(m.block, m.href)?;
            candidate.image_urls =
                images::scan_images(html, m.href, m.occurrence, options.image_scan_radius);
            Some(candidate)
        })
        .collect();

    (candidates, raw)
}

fn match_fallback(document: &Html) -> (Vec<ProductCandidate>, usize) {
    let matches = innermost_blocks(document, blocks::alt_block);
    let raw = matches.len();
    let candidates = matches
        .into_iter()
        .filter_map(|m| candidate_from(m.block, m.href))
        .collect();

    (candidates, raw)
}

/// A block together with the link that first produced it.
struct LinkMatch<'a> {
    block: Block<'a>,
    href: &'a str,
    /// How many earlier links in the document share `href`.
    occurrence: usize,
}

/// Matches every product link against `find`, keeping one entry per block.
///
/// A block that encloses another link's block is dropped: a second link to
/// the same product (navigation, breadcrumb, carousel) would otherwise claim
/// a page-sized ancestor as its own block.
fn innermost_blocks<'a, F>(document: &'a Html, find: F) -> Vec<LinkMatch<'a>>
where
    F: Fn(ElementRef<'a>) -> Option<Block<'a>>,
{
    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    let mut seen = HashSet::new();
    let mut matches = Vec::new();

    for link in document.select(&PRODUCT_LINK) {
        let href = blocks::link_href(link);
        let counter = occurrences.entry(href).or_insert(0);
        let occurrence = *counter;
        *counter += 1;

        let Some(block) = find(link) else {
            continue;
        };
        if seen.insert(block.element.id()) {
            matches.push(LinkMatch {
                block,
                href,
                occurrence,
            });
        }
    }

    matches.retain(|m| {
        !m.block
            .element
            .descendants()
            .skip(1)
            .any(|node| seen.contains(&node.id()))
    });
    matches
}

/// `None` when any field is empty after cleanup.
fn candidate_from(block: Block<'_>, href: &str) -> Option<ProductCandidate> {
    let name = strip_category_prefix(&block.name);
    if name.is_empty() || block.price_text.is_empty() || href.is_empty() {
        return None;
    }
    Some(ProductCandidate {
        name: name.to_owned(),
        price_text: block.price_text,
        image_urls: Vec::new(),
        source_url: href.to_owned(),
    })
}

fn strip_category_prefix(name: &str) -> &str {
    match name.get(..CATEGORY_PREFIX.len()) {
        Some(head) if head.eq_ignore_ascii_case(CATEGORY_PREFIX) => {
            name[CATEGORY_PREFIX.len()..].trim_start()
        }
        _ => name,
    }
}

#[cfg(test)]
#[path = "../extract_test.rs"]
mod tests;
