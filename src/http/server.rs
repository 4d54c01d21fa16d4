//! HTTP/HTTPS server startup logic.

use std::net::SocketAddr;

use axum::Router;
use axum_server::Handle;
use futures::StreamExt;
use rustls_acme::caches::DirCache;
use rustls_acme::AcmeConfig;

use crate::config::{AppConfig, TlsConfig};

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address: {0}")]
    Addr(String),

    #[error("Failed to prepare TLS: {0}")]
    Tls(String),

    #[error("Server error: {0}")]
    Server(String),
}

/// Start the configured listeners. Blocks until shutdown.
///
/// The certificate side of the HTTPS listener is entirely rustls-acme's
/// concern: `AcmeConfig` holds the domain allow-list and answers both "may
/// a certificate be issued for this host" and "get the certificate" — the
/// request path never sees any of it.
pub async fn start_server(app: Router, config: &AppConfig) -> Result<(), ServerError> {
    let http_addr = listen_addr(&config.http.host, config.http.port)?;

    let handle = Handle::new();
    shutdown::setup_shutdown_handler(handle.clone());

    if config.tls.enabled {
        let tls_addr = listen_addr(&config.http.host, config.tls.port)?;
        tokio::try_join!(
            start_plain_server(app.clone(), http_addr, handle.clone()),
            start_acme_server(app, tls_addr, &config.tls, handle),
        )?;
        Ok(())
    } else {
        start_plain_server(app, http_addr, handle).await
    }
}

fn listen_addr(host: &str, port: u16) -> Result<SocketAddr, ServerError> {
    format!("{host}:{port}")
        .parse()
        .map_err(|e| ServerError::Addr(format!("{host}:{port}: {e}")))
}

/// Start the plain HTTP listener.
async fn start_plain_server(
    app: Router,
    addr: SocketAddr,
    handle: Handle,
) -> Result<(), ServerError> {
    tracing::info!(%addr, "Starting HTTP server");

    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .map_err(|e| ServerError::Server(e.to_string()))
}

/// Start the HTTPS listener with automatic ACME certificates.
async fn start_acme_server(
    app: Router,
    addr: SocketAddr,
    tls: &TlsConfig,
    handle: Handle,
) -> Result<(), ServerError> {
    let env_name = if tls.production { "production" } else { "staging" };
    tracing::info!(
        %addr,
        domains = ?tls.domains,
        cache = %tls.cache_dir,
        environment = %env_name,
        "Starting HTTPS server (ACME)"
    );

    if !tls.production {
        tracing::warn!(
            "Using the ACME staging environment - certificates will NOT be trusted by \
             browsers. Set tls.production = true for production use."
        );
    }

    std::fs::create_dir_all(&tls.cache_dir).map_err(|e| {
        ServerError::Tls(format!(
            "Failed to create ACME cache directory '{}': {}",
            tls.cache_dir, e
        ))
    })?;

    let mut acme = AcmeConfig::new(tls.domains.clone())
        .cache(DirCache::new(tls.cache_dir.clone()))
        .directory_lets_encrypt(tls.production);
    if let Some(email) = &tls.email {
        acme = acme.contact_push(format!("mailto:{email}"));
    }
    let mut acme_state = acme.state();

    let acceptor = acme_state.axum_acceptor(acme_state.default_rustls_config());

    // Event loop driving certificate issuance and renewal.
    tokio::spawn(async move {
        loop {
            match acme_state.next().await {
                Some(Ok(event)) => {
                    tracing::info!(event = ?event, "ACME event");
                }
                Some(Err(err)) => {
                    tracing::error!(error = %err, "ACME error");
                }
                None => {
                    tracing::debug!("ACME state stream ended");
                    break;
                }
            }
        }
    });

    axum_server::bind(addr)
        .handle(handle)
        .acceptor(acceptor)
        .serve(app.into_make_service())
        .await
        .map_err(|e| ServerError::Server(e.to_string()))
}
