//! `extract` command handler: the operator's test-extraction path.

use std::path::Path;

use anyhow::Context;
use vitrine_core::AppConfig;
use vitrine_scraper::Importer;

/// Prints the extraction result for one page as JSON. Exactly one of `url`
/// and `html_file` is set; clap enforces this.
///
/// # Errors
///
/// Returns an error if the page cannot be fetched or the file cannot be read.
pub(crate) async fn run_extract(
    config: &AppConfig,
    url: Option<&str>,
    html_file: Option<&Path>,
) -> anyhow::Result<()> {
    let importer = Importer::from_config(config)?;

    let result = match (url, html_file) {
        (Some(url), _) => importer.preview(url).await?,
        (None, Some(path)) => {
            let html = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            importer.preview_html(&html)
        }
        (None, None) => anyhow::bail!("either --url or --html-file is required"),
    };

    tracing::info!(
        strategy = %result.strategy_used,
        records = result.records.len(),
        skipped = result.skipped,
        "extraction finished"
    );
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
