//! Candidate → [`vitrine_core::ProductRecord`] validation.
//!
//! Price parsing is delegated to [`crate::parse`]; this module owns the
//! record invariants (non-empty name, positive price, absolute URLs) and
//! reports why a candidate was dropped instead of failing.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use vitrine_core::ProductRecord;

use crate::parse::parse_price;
use crate::types::ProductCandidate;

/// Why a candidate was not turned into a record. Never a hard failure; the
/// coordinator only counts these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationDrop {
    #[error("name is empty")]
    EmptyName,

    #[error("source URL is empty")]
    EmptySourceUrl,

    #[error("price text {0:?} has no parseable number")]
    UnparseablePrice(String),

    #[error("price {0} is not positive")]
    NonPositivePrice(Decimal),
}

/// Validates candidates against a fixed source-site origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalizer {
    origin: String,
}

impl Normalizer {
    /// `origin` is stored without trailing slashes, e.g. `https://loja.example.com.br`.
    #[must_use]
    pub fn new(origin: &str) -> Self {
        Self {
            origin: origin.trim().trim_end_matches('/').to_owned(),
        }
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Resolves `url` against the origin unless it already starts with `http`.
    ///
    /// Protocol-relative URLs (`//cdn…`) take the origin's scheme; everything
    /// else is joined to the origin with exactly one `/`.
    #[must_use]
    pub fn absolutize(&self, url: &str) -> String {
        if url.starts_with("http") {
            return url.to_owned();
        }
        if let Some(rest) = url.strip_prefix("//") {
            let scheme = self.origin.split_once("://").map_or("https", |(s, _)| s);
            return format!("{scheme}://{rest}");
        }
        format!("{}/{}", self.origin, url.trim_start_matches('/'))
    }

    /// Validates one candidate.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationDrop`] the candidate hits; the candidate
    /// must then be counted as skipped, not reported as an error.
    pub fn normalize(&self, candidate: ProductCandidate) -> Result<ProductRecord, ValidationDrop> {
        let name = candidate.name.trim();
        if name.is_empty() {
            return Err(ValidationDrop::EmptyName);
        }

        let source_url = candidate.source_url.trim();
        if source_url.is_empty() {
            return Err(ValidationDrop::EmptySourceUrl);
        }

        let price = parse_price(&candidate.price_text)
            .ok_or_else(|| ValidationDrop::UnparseablePrice(candidate.price_text.clone()))?;
        if price <= Decimal::ZERO {
            return Err(ValidationDrop::NonPositivePrice(price));
        }

        let images: BTreeSet<String> = candidate
            .image_urls
            .iter()
            .map(String::as_str)
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(|url| self.absolutize(url))
            .collect();

        Ok(ProductRecord {
            name: name.to_owned(),
            price,
            images,
            source_url: self.absolutize(source_url),
        })
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
