use std::process::ExitCode;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use trip_server::catalog::SharedCatalog;
use trip_server::config::AppConfig;
use trip_server::quote::{QuoteConfig, SuggestionConfig};
use trip_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    // Fail fast if the catalog is unavailable at start-up
    let catalog = match config.catalog_source() {
        Ok(source) => SharedCatalog::load(source).await,
        Err(e) => Err(e),
    };
    let catalog = match catalog {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("Failed to load catalog: {e}");
            return ExitCode::FAILURE;
        }
    };

    let state = AppState::new(
        catalog.clone(),
        QuoteConfig::default(),
        SuggestionConfig::default(),
        &config.quote_cache(),
    );

    if catalog.source().is_refreshable() {
        let quotes = state.quotes.clone();
        let every = config.catalog_refresh;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.tick().await; // First tick is immediate, skip it
            loop {
                interval.tick().await;
                match catalog.refresh().await {
                    Ok(count) => {
                        quotes.invalidate_all();
                        info!("Refreshed catalog: {count} destinations");
                    }
                    Err(e) => warn!("Keeping previous catalog: {e}"),
                }
            }
        });
    }

    let app = create_router(state);

    let listener = match TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {e}", config.bind_addr);
            return ExitCode::FAILURE;
        }
    };
    info!("Trip quote engine listening on http://{}", config.bind_addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {e}");
        return ExitCode::FAILURE;
    }

    info!("Server shut down");
    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install terminate handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
