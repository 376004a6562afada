use tokio::signal;

/// Resolves once Ctrl+C is received.
pub async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        crate::error::log_error(&e);
        return;
    }

    #[cfg(not(windows))]
    println!();
    tracing::info!("Ctrl+C recieved. Stopping timers.");
}
