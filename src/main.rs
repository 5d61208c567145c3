// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::process::ExitCode;
use std::sync::Arc;

use oidc_bearer_auth::{
    api::router,
    auth::{JwksManager, JwtVerifier, KeySource, VerificationError},
    config::{Config, LogFormat, DEFAULT_LOG_FILTER},
    state::AppState,
};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("JWKS discovery failed: {0}")]
    Discovery(#[from] VerificationError),
    #[error("no issuer configured for OIDC discovery")]
    NoIssuer,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(config.log_format);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Server failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.init(),
    }
}

async fn run(config: Config) -> Result<(), StartupError> {
    let jwks = match &config.jwks_url {
        Some(url) => JwksManager::new(url.as_str()),
        None => {
            let issuer = config.verifier.issuers.first().ok_or(StartupError::NoIssuer)?;
            JwksManager::discover(issuer).await?
        }
    }
    .with_cache_ttl(config.jwks_cache_ttl);

    tracing::info!(
        issuers = ?config.verifier.issuers,
        audiences = ?config.verifier.audiences,
        algorithms = ?config.verifier.algorithms,
        clock_skew_secs = config.verifier.clock_skew.as_secs(),
        jwks_url = %jwks.jwks_url(),
        "Bearer authentication configured"
    );

    let verifier = JwtVerifier::new(config.verifier.clone(), KeySource::Remote(jwks.clone()));
    let state = AppState::new(Arc::new(verifier)).with_jwks(jwks);
    let app = router(state);

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Shutdown signal received");
            }
            shutdown.cancel();
        }
    });

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "OIDC bearer auth server listening (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;
    Ok(())
}
