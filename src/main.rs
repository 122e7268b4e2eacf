// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::net::SocketAddr;
use std::process::ExitCode;
use std::time::Duration;

use axum::Router;
use axum_server::{tls_rustls::RustlsConfig, Handle};
use tracing::{error, info, warn};

use grace_gallery::{
    api::router, config::GalleryConfig, error::StartupError, logging, state::AppState,
};

/// How long in-flight requests get to finish after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Gallery server failed");
            eprintln!("grace-gallery: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let env_file = dotenvy::dotenv().ok();
    let config = GalleryConfig::from_env()?;
    logging::init_tracing(config.log_format);

    if let Some(path) = env_file {
        info!(path = %path.display(), "Loaded environment file");
    }

    let state = AppState::from_config(&config)?;
    if !state.verifier.is_configured() {
        warn!("PASSWORD_HASH is not set, every passphrase submission will fail");
    }
    info!(
        photographers = state.catalog.len(),
        assets_dir = %state.assets_dir.display(),
        environment = ?config.environment,
        "Gallery configured"
    );

    let addr = config.bind_addr()?;
    let app = router(state);

    let handle: Handle<SocketAddr> = Handle::new();
    tokio::spawn(shutdown_on_signal(handle.clone()));

    let tls_config = match &config.tls {
        Some(tls) => {
            // Install the ring crypto provider for rustls (must be done before any TLS operations)
            if rustls::crypto::ring::default_provider()
                .install_default()
                .is_err()
            {
                warn!("rustls crypto provider was already installed");
            }

            let tls_config = RustlsConfig::from_pem_file(&tls.cert, &tls.key)
                .await
                .map_err(StartupError::Tls)?;
            Some(tls_config)
        }
        None => None,
    };

    serve(app, addr, tls_config, handle).await?;

    info!("Server stopped");
    Ok(())
}

/// Serve `app` on `addr` until `handle` is shut down. HTTPS when a TLS
/// config is given, plain HTTP otherwise.
async fn serve(
    app: Router,
    addr: SocketAddr,
    tls: Option<RustlsConfig>,
    handle: Handle<SocketAddr>,
) -> Result<(), StartupError> {
    match tls {
        Some(tls_config) => {
            info!(%addr, "Grace Gallery listening on https (docs at /docs)");
            axum_server::bind_rustls(addr, tls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .map_err(StartupError::Server)
        }
        None => {
            info!(%addr, "Grace Gallery listening on http (docs at /docs)");
            axum_server::bind(addr)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .map_err(StartupError::Server)
        }
    }
}

async fn shutdown_on_signal(handle: Handle<SocketAddr>) {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received, draining connections");
    handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
}
