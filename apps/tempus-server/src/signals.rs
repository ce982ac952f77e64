//! Termination signal handling.

use anyhow::Result;
use tokio::signal;

/// Waits for Ctrl+C or, on unix, SIGTERM.
///
/// # Errors
///
/// Returns an error if a signal handler cannot be installed.
pub async fn wait_for_shutdown() -> Result<()> {
    tokio::select! {
        result = ctrl_c() => result?,
        result = sigterm() => result?,
    }
    tracing::info!("Shutdown signal received, initiating graceful shutdown");
    Ok(())
}

async fn ctrl_c() -> Result<()> {
    signal::ctrl_c().await?;
    Ok(())
}

#[cfg(unix)]
async fn sigterm() -> Result<()> {
    let mut handler = signal::unix::signal(signal::unix::SignalKind::terminate())?;
    handler.recv().await;
    Ok(())
}

#[cfg(not(unix))]
async fn sigterm() -> Result<()> {
    std::future::pending().await
}
