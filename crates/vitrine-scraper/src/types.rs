//! Intermediate extraction types.
//!
//! A [`ProductCandidate`] is what the markup said, verbatim apart from
//! whitespace cleanup. It lives only for one extraction pass and is turned
//! into a [`vitrine_core::ProductRecord`] (or dropped) by the normalizer.

use serde::Serialize;
use vitrine_core::{ExtractionStrategy, ProductRecord};

/// An unvalidated product lifted from page markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCandidate {
    pub name: String,
    /// Price token as it appeared on the page, e.g. `"R$ 1.234,56"`.
    pub price_text: String,
    /// Image sources in document order; may contain duplicates and relative paths.
    pub image_urls: Vec<String>,
    /// Product link `href` exactly as found; may be relative.
    pub source_url: String,
}

/// Raw output of the extractor for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    pub candidates: Vec<ProductCandidate>,
    /// Blocks the reporting strategy matched, including ones skipped for
    /// empty fields.
    pub raw_match_count: usize,
    pub strategy: ExtractionStrategy,
}

impl CandidateSet {
    pub(crate) fn empty(raw_match_count: usize) -> Self {
        Self {
            candidates: Vec::new(),
            raw_match_count,
            strategy: ExtractionStrategy::None,
        }
    }
}

/// Validated records for one page plus how they were found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    pub records: Vec<ProductRecord>,
    pub raw_match_count: usize,
    pub strategy_used: ExtractionStrategy,
    /// Candidates the normalizer dropped.
    pub skipped: usize,
}
