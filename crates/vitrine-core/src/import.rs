//! Operator-facing summary of an import run.
//!
//! These types are what the admin console and the batch job display; they
//! never carry raw error values, only human-readable reasons.

use serde::{Deserialize, Serialize};

use crate::products::ExtractionStrategy;

/// A page that could not be ingested, with the reason shown to operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportFailure {
    pub url: String,
    pub reason: String,
}

/// Per-page outcome of an import run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageReport {
    pub url: String,
    pub strategy: ExtractionStrategy,
    pub raw_match_count: usize,
    pub imported: usize,
    pub skipped: usize,
}

/// Aggregated result of importing one or more source pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    /// Records accepted by the storage collaborator.
    pub imported: usize,
    /// Candidates dropped during normalization.
    pub skipped: usize,
    /// One entry per page that failed, in input order.
    pub errors: Vec<ImportFailure>,
    /// One entry per page that was fetched and extracted, in input order.
    #[serde(default)]
    pub pages: Vec<PageReport>,
}

impl ImportSummary {
    /// Returns `true` if every requested page failed.
    #[must_use]
    pub fn all_failed(&self) -> bool {
        self.pages.is_empty() && !self.errors.is_empty()
    }
}
