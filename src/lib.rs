pub mod config;
pub use config::{Config, ConfigError, ConfigResult};

pub mod api;
pub mod cache;
pub mod error;
pub mod model;
pub mod tracking;
pub mod utils;

mod state;
pub use state::AppState;

use crate::{error::AppResult, utils::signal::shutdown_signal};

static APPLICATION_NAME: &str = "wrenchprep";

/// Mounts the streak evaluator and keeps it running until Ctrl+C.
#[tracing::instrument]
pub async fn setup_workers() -> AppResult<()> {
    let use_local = cfg!(debug_assertions);
    let config = Config::get_or_init(use_local).await;
    let state = AppState::with_log_notifier(config)?;

    let evaluator = state.streak_evaluator();
    let watch = evaluator.start();
    tracing::info!("streak watch is running against: {}", config.api().base_url());

    shutdown_signal().await;
    watch.stop();
    Ok(())
}

pub fn setup_trace() {
    use tracing_error::ErrorLayer;
    use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

    // load .env file for RUST_LOG etc.
    let _ = dotenvy::dotenv();

    // a second call keeps the subscriber that is already installed
    if tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .with(ErrorLayer::default())
        .try_init()
        .is_ok()
    {
        tracing::debug!("tracing initialized.");
    }
}

#[tracing::instrument]
pub async fn run() -> AppResult<()> {
    setup_trace();
    setup_workers().await?;
    Ok(())
}
