// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment (and a `.env` file, if
//! present) once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `OIDC_ISSUERS` | Trusted issuers, comma-separated | Required |
//! | `OIDC_AUDIENCES` | Accepted audiences, comma-separated | Unchecked |
//! | `OIDC_ALGORITHMS` | Signing algorithm allow-list | `RS256,ES256` |
//! | `OIDC_CLOCK_SKEW_SECS` | Clock skew tolerance | `60` |
//! | `OIDC_JWKS_URL` | JWKS endpoint (HTTPS) | OIDC discovery on first issuer |
//! | `OIDC_JWKS_CACHE_TTL_SECS` | JWKS cache TTL | `300` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use jsonwebtoken::Algorithm;
use url::Url;

use crate::auth::jwks::DEFAULT_CACHE_TTL;
use crate::auth::verifier::{VerifierConfig, DEFAULT_CLOCK_SKEW};

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const ISSUERS_ENV: &str = "OIDC_ISSUERS";
pub const AUDIENCES_ENV: &str = "OIDC_AUDIENCES";
pub const ALGORITHMS_ENV: &str = "OIDC_ALGORITHMS";
pub const CLOCK_SKEW_ENV: &str = "OIDC_CLOCK_SKEW_SECS";
pub const JWKS_URL_ENV: &str = "OIDC_JWKS_URL";
pub const JWKS_CACHE_TTL_ENV: &str = "OIDC_JWKS_CACHE_TTL_SECS";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Default tracing filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub verifier: VerifierConfig,
    /// Explicit JWKS endpoint; discovered from the first issuer when unset.
    pub jwks_url: Option<String>,
    pub jwks_cache_ttl: Duration,
    pub log_format: LogFormat,
}

impl Config {
    /// Load from the process environment, honoring `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to read variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = var(HOST_ENV).unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = parse_or(var(PORT_ENV), PORT_ENV, 8080)?;
        let addr = SocketAddr::from_str(&format!("{host}:{port}")).map_err(|e| {
            ConfigError::Invalid {
                key: HOST_ENV,
                reason: e.to_string(),
            }
        })?;

        let issuers = var(ISSUERS_ENV)
            .map(|v| split_list(&v))
            .filter(|list| !list.is_empty())
            .ok_or(ConfigError::Missing(ISSUERS_ENV))?;
        let audiences = var(AUDIENCES_ENV).map(|v| split_list(&v)).unwrap_or_default();

        let mut verifier = VerifierConfig::new(issuers).with_audiences(audiences);
        if let Some(raw) = var(ALGORITHMS_ENV) {
            let algorithms = split_list(&raw)
                .iter()
                .map(|name| {
                    Algorithm::from_str(name).map_err(|_| ConfigError::Invalid {
                        key: ALGORITHMS_ENV,
                        reason: format!("unknown algorithm {name}"),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            verifier = verifier.with_algorithms(algorithms)?;
        }
        let skew_secs = parse_or(var(CLOCK_SKEW_ENV), CLOCK_SKEW_ENV, DEFAULT_CLOCK_SKEW.as_secs())?;
        let verifier = verifier.with_clock_skew(Duration::from_secs(skew_secs));

        let jwks_url = var(JWKS_URL_ENV).map(|v| require_https(&v)).transpose()?;
        let ttl_secs = parse_or(
            var(JWKS_CACHE_TTL_ENV),
            JWKS_CACHE_TTL_ENV,
            DEFAULT_CACHE_TTL.as_secs(),
        )?;

        let log_format = match var(LOG_FORMAT_ENV).map(|v| v.to_ascii_lowercase()) {
            None => LogFormat::default(),
            Some(v) if v == "json" => LogFormat::Json,
            Some(v) if v == "pretty" => LogFormat::Pretty,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: LOG_FORMAT_ENV,
                    reason: format!("expected json or pretty, got {other}"),
                })
            }
        };

        Ok(Self {
            addr,
            verifier,
            jwks_url,
            jwks_cache_ttl: Duration::from_secs(ttl_secs),
            log_format,
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_or<T>(raw: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(v) => v.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
    }
}

fn require_https(raw: &str) -> Result<String, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::Invalid {
        key: JWKS_URL_ENV,
        reason: e.to_string(),
    })?;
    if url.scheme() != "https" {
        return Err(ConfigError::Invalid {
            key: JWKS_URL_ENV,
            reason: "JWKS must be fetched over HTTPS".to_string(),
        });
    }
    Ok(url.into())
}
