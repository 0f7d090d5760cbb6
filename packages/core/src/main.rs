use clap::Parser;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::signal;

use disaster_predict::api::{create_router, AppState};
use disaster_predict::classifier::Classifier;
use disaster_predict::cli::Cli;
use disaster_predict::config::Config;
use disaster_predict::desk::AlertDesk;
use disaster_predict::error::AppError;
use disaster_predict::logging::init_logging;
use disaster_predict::metrics::AppMetrics;

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logging();

    if let Err(err) = run(Cli::parse()).await {
        tracing::error!("{}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = Config::from_env()
        .map_err(AppError::Config)?
        .with_overrides(&cli);

    tracing::info!("Service started with config: {:?}", config);

    let state = AppState::new(AlertDesk::new(Classifier::default()), AppMetrics::new()?);
    let app = create_router(state);

    let listener = TcpListener::bind(config.bind_address()).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
