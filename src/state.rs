// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::{Authenticator, JwksManager, Verifier};

#[derive(Clone)]
pub struct AppState {
    pub authenticator: Authenticator,
    /// Remote key source, when keys come from a JWKS endpoint.
    pub jwks: Option<JwksManager>,
}

impl AppState {
    pub fn new(verifier: Arc<dyn Verifier>) -> Self {
        Self {
            authenticator: Authenticator::new(verifier),
            jwks: None,
        }
    }

    pub fn with_jwks(mut self, jwks: JwksManager) -> Self {
        self.jwks = Some(jwks);
        self
    }
}

impl FromRef<AppState> for Authenticator {
    fn from_ref(state: &AppState) -> Self {
        state.authenticator.clone()
    }
}
