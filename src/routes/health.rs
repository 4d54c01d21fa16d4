//! Health check endpoint for container orchestration.

/// Liveness probe; answers as long as the process can serve HTTP.
pub async fn health() -> &'static str {
    "ok"
}
