//! `import` command handler.
//!
//! Per-page failures are part of the printed summary, not command errors.
//! The command only fails when there is nothing to import, configuration is
//! broken, or every page failed.

use std::path::Path;

use vitrine_core::{AppConfig, ImportSummary};
use vitrine_scraper::{Importer, MemoryStore};

use crate::catalog::CatalogFile;

/// Imports `urls` (or the URLs listed in `sources` when `urls` is empty) and
/// prints the summary as JSON on stdout.
///
/// # Errors
///
/// Returns an error if the sources file cannot be loaded, the URL list is
/// empty, the catalog cannot be read or written, or every page failed.
pub(crate) async fn run_import(
    config: &AppConfig,
    urls: Vec<String>,
    sources: &Path,
    output: &Path,
    dry_run: bool,
) -> anyhow::Result<()> {
    let urls = if urls.is_empty() {
        let file = vitrine_core::load_sources(sources)?;
        tracing::info!(path = %sources.display(), count = file.sources.len(), "loaded sources file");
        file.urls()
    } else {
        urls
    };

    let importer = Importer::from_config(config)?;
    let summary = if dry_run {
        tracing::info!(pages = urls.len(), "dry run; catalog will not be written");
        importer.import_from(&urls, &MemoryStore::new()).await?
    } else {
        import_into_catalog(&importer, &urls, output).await?
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);

    if summary.all_failed() {
        anyhow::bail!("all {} page(s) failed to import", summary.errors.len());
    }
    Ok(())
}

async fn import_into_catalog(
    importer: &Importer,
    urls: &[String],
    output: &Path,
) -> anyhow::Result<ImportSummary> {
    let catalog = CatalogFile::open(output).await?;
    let before = catalog.len().await;

    let summary = importer.import_from(urls, &catalog).await?;
    catalog.flush().await?;

    tracing::info!(
        path = %output.display(),
        before,
        after = catalog.len().await,
        "catalog written"
    );
    Ok(summary)
}
