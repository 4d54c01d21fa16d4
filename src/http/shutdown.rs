//! Graceful shutdown on SIGTERM/SIGINT.

use axum_server::Handle;

use crate::config::SHUTDOWN_DRAIN_SECS;

/// On the first Ctrl+C or SIGTERM, stop accepting connections and give the
/// open ones a bounded window to finish. Both listeners share the handle,
/// so one signal drains the whole process.
pub fn setup_shutdown_handler(handle: Handle) {
    tokio::spawn(async move {
        let ctrl_c = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install Ctrl+C handler");
        };

        #[cfg(unix)]
        let terminate = async {
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("Failed to install SIGTERM handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                tracing::info!("Received Ctrl+C, initiating graceful shutdown");
            }
            _ = terminate => {
                tracing::info!("Received SIGTERM, initiating graceful shutdown");
            }
        }

        handle.graceful_shutdown(Some(std::time::Duration::from_secs(SHUTDOWN_DRAIN_SECS)));
        tracing::info!(
            drain_secs = SHUTDOWN_DRAIN_SECS,
            "Waiting for open connections to close"
        );
    });
}
