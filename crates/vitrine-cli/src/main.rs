mod catalog;
mod extract;
mod import;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "vitrine-cli")]
#[command(about = "Catalog ingestion for the Vitrine storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch catalog pages and upsert their products into a catalog file
    Import {
        /// Page URLs to import; defaults to the sources file when empty
        urls: Vec<String>,

        /// Sources file to read page URLs from
        #[arg(long, env = "VITRINE_SOURCES_PATH")]
        sources: Option<PathBuf>,

        /// Catalog file records are upserted into
        #[arg(long, default_value = "catalog.json")]
        output: PathBuf,

        /// Report what would be imported without writing the catalog
        #[arg(long)]
        dry_run: bool,
    },
    /// Run a test extraction and print the result without storing anything
    Extract(ExtractArgs),
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct ExtractArgs {
    /// Fetch and extract a live page
    #[arg(long)]
    url: Option<String>,

    /// Extract from markup saved on disk
    #[arg(long)]
    html_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = vitrine_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Import {
            urls,
            sources,
            output,
            dry_run,
        } => {
            let sources = sources.unwrap_or_else(|| config.sources_path.clone());
            import::run_import(&config, urls, &sources, &output, dry_run).await
        }
        Commands::Extract(args) => {
            extract::run_extract(&config, args.url.as_deref(), args.html_file.as_deref()).await
        }
    }
}
