// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWKS (JSON Web Key Set) fetching and caching.
//!
//! ## Security
//!
//! - Keys are cached with a configurable TTL
//! - The endpoint can be given directly or resolved through OIDC discovery
//!   (`{issuer}/.well-known/openid-configuration` → `jwks_uri`)
//! - HTTPS is enforced when the URL is loaded from configuration

use std::sync::Arc;
use std::time::{Duration, Instant};

use jsonwebtoken::jwk::JwkSet;
use serde::Deserialize;
use tokio::sync::RwLock;

use super::verifier::VerificationError;

/// Default JWKS cache TTL (5 minutes).
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// HTTP timeout for JWKS and discovery requests.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// JWKS cache entry.
struct CacheEntry {
    jwks: JwkSet,
    fetched_at: Instant,
}

/// Subset of the OIDC discovery document.
#[derive(Debug, Deserialize)]
struct DiscoveryDocument {
    jwks_uri: String,
}

/// JWKS manager with caching.
#[derive(Clone)]
pub struct JwksManager {
    /// JWKS URL
    jwks_url: String,
    /// Cache TTL
    cache_ttl: Duration,
    /// Cached JWKS
    cache: Arc<RwLock<Option<CacheEntry>>>,
    /// HTTP client
    client: reqwest::Client,
}

fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .unwrap_or_default()
}

impl JwksManager {
    /// Create a new JWKS manager.
    ///
    /// # Arguments
    /// - `jwks_url`: The JWKS endpoint URL (e.g., `https://issuer.example.com/.well-known/jwks.json`)
    pub fn new(jwks_url: impl Into<String>) -> Self {
        Self {
            jwks_url: jwks_url.into(),
            cache_ttl: DEFAULT_CACHE_TTL,
            cache: Arc::new(RwLock::new(None)),
            client: http_client(),
        }
    }

    /// Resolve the issuer's `jwks_uri` through OIDC discovery.
    pub async fn discover(issuer: &str) -> Result<Self, VerificationError> {
        let client = http_client();
        let url = format!(
            "{}/.well-known/openid-configuration",
            issuer.trim_end_matches('/')
        );

        let doc: DiscoveryDocument = fetch_json(&client, &url).await?;
        tracing::info!(issuer, jwks_url = %doc.jwks_uri, "Resolved JWKS endpoint via OIDC discovery");

        Ok(Self {
            client,
            ..Self::new(doc.jwks_uri)
        })
    }

    /// Create with custom cache TTL.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Get the JWKS URL.
    pub fn jwks_url(&self) -> &str {
        &self.jwks_url
    }

    /// Current key set, fetched when the cache is empty or stale.
    pub async fn key_set(&self) -> Result<JwkSet, VerificationError> {
        {
            let cache = self.cache.read().await;
            if let Some(entry) = &*cache {
                if entry.fetched_at.elapsed() < self.cache_ttl {
                    return Ok(entry.jwks.clone());
                }
            }
        }

        let jwks = self.fetch_jwks().await?;

        {
            let mut cache = self.cache.write().await;
            *cache = Some(CacheEntry {
                jwks: jwks.clone(),
                fetched_at: Instant::now(),
            });
        }

        Ok(jwks)
    }

    async fn fetch_jwks(&self) -> Result<JwkSet, VerificationError> {
        let jwks: JwkSet = fetch_json(&self.client, &self.jwks_url).await?;
        tracing::debug!(url = %self.jwks_url, keys = jwks.keys.len(), "Fetched JWKS");
        Ok(jwks)
    }

    /// Force refresh the JWKS cache.
    pub async fn refresh(&self) -> Result<(), VerificationError> {
        let jwks = self.fetch_jwks().await?;
        let mut cache = self.cache.write().await;
        *cache = Some(CacheEntry {
            jwks,
            fetched_at: Instant::now(),
        });
        Ok(())
    }

    /// Check if JWKS is currently cached and valid.
    pub async fn is_cached(&self) -> bool {
        let cache = self.cache.read().await;
        if let Some(entry) = &*cache {
            entry.fetched_at.elapsed() < self.cache_ttl
        } else {
            false
        }
    }
}

async fn fetch_json<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, VerificationError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| VerificationError::KeySource(e.to_string()))?;

    if !response.status().is_success() {
        return Err(VerificationError::KeySource(format!(
            "HTTP {} from {url}",
            response.status()
        )));
    }

    response
        .json()
        .await
        .map_err(|e| VerificationError::KeySource(e.to_string()))
}
