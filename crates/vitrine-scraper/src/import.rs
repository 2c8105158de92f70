//! Import coordinator: fetch → extract → normalize → store, per page.
//!
//! A failing page is recorded in [`ImportSummary::errors`] and never stops the
//! rest of the batch. Nothing is retried; the operator decides whether to
//! re-run.

use futures::stream::{self, StreamExt};
use vitrine_core::{AppConfig, ImportFailure, ImportSummary, PageReport, MAX_IN_FLIGHT_CAP};

use crate::client::PageFetcher;
use crate::error::ScraperError;
use crate::extract::{extract_with, ExtractOptions};
use crate::normalize::Normalizer;
use crate::store::ProductStore;
use crate::types::ExtractionResult;

/// Drives the ingestion pipeline for one or more catalog pages.
///
/// Holds no state between calls: every import is independent.
pub struct Importer {
    fetcher: PageFetcher,
    normalizer: Normalizer,
    options: ExtractOptions,
    max_in_flight: usize,
}

/// What happened to one page. A page can both report records and carry a
/// failure when the store rejected some of them.
struct PageOutcome {
    report: Option<PageReport>,
    failure: Option<ImportFailure>,
}

impl Importer {
    /// `max_in_flight` is clamped to `1..=MAX_IN_FLIGHT_CAP`.
    #[must_use]
    pub fn new(
        fetcher: PageFetcher,
        normalizer: Normalizer,
        options: ExtractOptions,
        max_in_flight: usize,
    ) -> Self {
        Self {
            fetcher,
            normalizer,
            options,
            max_in_flight: max_in_flight.clamp(1, MAX_IN_FLIGHT_CAP),
        }
    }

    /// Builds an importer from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        let fetcher = PageFetcher::new(
            config.scraper_request_timeout_secs,
            &config.scraper_user_agent,
        )?;
        Ok(Self::new(
            fetcher,
            Normalizer::new(&config.source_origin),
            ExtractOptions::from_config(config),
            config.scraper_max_in_flight,
        ))
    }

    #[must_use]
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    #[must_use]
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    /// Test extraction: fetches `url` and returns what would be imported,
    /// without touching any store.
    ///
    /// # Errors
    ///
    /// Returns the fetch error unchanged; extraction itself cannot fail.
    pub async fn preview(&self, url: &str) -> Result<ExtractionResult, ScraperError> {
        let html = self.fetcher.fetch(url).await?;
        Ok(self.preview_html(&html))
    }

    /// Test extraction over markup the caller already has.
    #[must_use]
    pub fn preview_html(&self, html: &str) -> ExtractionResult {
        extract_with(html, &self.normalizer, self.options)
    }

    /// Imports pre-fetched markup. `url` is only used for reporting.
    pub async fn import_html<S: ProductStore>(
        &self,
        url: &str,
        html: &str,
        store: &S,
    ) -> ImportSummary {
        let result = self.preview_html(html);
        let outcome = self.store_page(url, result, store).await;
        summarize(vec![outcome])
    }

    /// Fetches and imports every URL with bounded concurrency.
    ///
    /// Per-URL failures (bad URL, transport error, store rejection) become
    /// entries in `errors`; `errors` and `pages` are in input order.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::EmptyBatch`] if `urls` is empty.
    pub async fn import_from<S: ProductStore>(
        &self,
        urls: &[String],
        store: &S,
    ) -> Result<ImportSummary, ScraperError> {
        if urls.is_empty() {
            return Err(ScraperError::EmptyBatch);
        }

        let mut outcomes: Vec<(usize, PageOutcome)> = stream::iter(0..urls.len())
            .map(|idx| {
                let url = urls[idx].as_str();
                async move { (idx, self.import_page(url, store).await) }
            })
            .buffer_unordered(self.max_in_flight)
            .collect()
            .await;
        outcomes.sort_by_key(|(idx, _)| *idx);

        let summary = summarize(outcomes.into_iter().map(|(_, outcome)| outcome).collect());
        tracing::info!(
            pages = urls.len(),
            imported = summary.imported,
            skipped = summary.skipped,
            errors = summary.errors.len(),
            "import complete"
        );
        Ok(summary)
    }

    async fn import_page<S: ProductStore>(&self, url: &str, store: &S) -> PageOutcome {
        match self.fetcher.fetch(url).await {
            Ok(html) => {
                let result = self.preview_html(&html);
                self.store_page(url, result, store).await
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "page import failed");
                PageOutcome {
                    report: None,
                    failure: Some(ImportFailure {
                        url: url.to_owned(),
                        reason: e.to_string(),
                    }),
                }
            }
        }
    }

    async fn store_page<S: ProductStore>(
        &self,
        url: &str,
        result: ExtractionResult,
        store: &S,
    ) -> PageOutcome {
        let mut imported = 0;
        let mut rejected = 0;
        let mut last_error = None;

        for record in &result.records {
            match store.upsert(record).await {
                Ok(()) => imported += 1,
                Err(e) => {
                    tracing::warn!(url, source_url = %record.source_url, error = %e, "store rejected record");
                    rejected += 1;
                    last_error = Some(e.to_string());
                }
            }
        }

        tracing::info!(
            url,
            strategy = %result.strategy_used,
            raw_matches = result.raw_match_count,
            imported,
            skipped = result.skipped,
            "page imported"
        );

        PageOutcome {
            report: Some(PageReport {
                url: url.to_owned(),
                strategy: result.strategy_used,
                raw_match_count: result.raw_match_count,
                imported,
                skipped: result.skipped,
            }),
            failure: last_error.map(|reason| ImportFailure {
                url: url.to_owned(),
                reason: format!("{rejected} record(s) not stored: {reason}"),
            }),
        }
    }
}

fn summarize(outcomes: Vec<PageOutcome>) -> ImportSummary {
    let mut summary = ImportSummary::default();
    for outcome in outcomes {
        if let Some(report) = outcome.report {
            summary.imported += report.imported;
            summary.skipped += report.skipped;
            summary.pages.push(report);
        }
        if let Some(failure) = outcome.failure {
            summary.errors.push(failure);
        }
    }
    summary
}
