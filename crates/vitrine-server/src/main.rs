mod api;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use vitrine_scraper::{Importer, MemoryStore};

use crate::{
    api::{build_app, default_rate_limit_state, AppState},
    middleware::AuthState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = vitrine_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let importer = Importer::from_config(&config)?;
    let state = AppState {
        importer: Arc::new(importer),
        store: Arc::new(MemoryStore::new()),
    };
    let auth = AuthState::from_keys(&config.api_keys, config.is_development())?;
    let app = build_app(state, auth, default_rate_limit_state());

    tracing::info!(
        bind_addr = %config.bind_addr,
        env = %config.env,
        source_origin = %config.source_origin,
        "starting admin API"
    );
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
