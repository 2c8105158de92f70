use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A validated product scraped from the source catalog, ready to hand to the
/// storage collaborator.
///
/// Every field has passed normalization; a record is never emitted partially
/// valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Trimmed display name, never empty.
    pub name: String,
    /// Strictly positive price in the catalog currency (BRL).
    pub price: Decimal,
    /// Absolute image URLs. A set: order carries no meaning downstream.
    pub images: BTreeSet<String>,
    /// Absolute canonical product page URL; the upsert key for storage.
    pub source_url: String,
}

/// Which matching strategy produced a page's candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStrategy {
    /// Full product-block match: link, heading, price, nearby images.
    Primary,
    /// Link + `alt` text + price only; no images.
    Fallback,
    /// Neither pattern matched anything usable.
    None,
}

impl std::fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionStrategy::Primary => write!(f, "primary"),
            ExtractionStrategy::Fallback => write!(f, "fallback"),
            ExtractionStrategy::None => write!(f, "none"),
        }
    }
}
