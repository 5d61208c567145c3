// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication middleware for Axum.
//!
//! Authenticates every request of a router subtree and stores the
//! [`AuthenticatedUser`](super::AuthenticatedUser) in request extensions,
//! where the [`Auth`](super::Auth) extractor picks it up.
//!
//! ```rust,ignore
//! let app = Router::new()
//!     .route("/protected", get(protected_handler))
//!     .route_layer(axum::middleware::from_fn_with_state(
//!         authenticator.clone(),
//!         require_auth,
//!     ));
//! ```

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::Authenticator;

/// The `Authorization` header as text.
///
/// Only the first header is read. A value that is not visible ASCII counts
/// as present but empty, so it is denied as a missing bearer token.
pub fn authorization_header(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .map(|value| value.to_str().unwrap_or_default())
}

/// Reject unauthenticated requests with 401, otherwise attach the user.
pub async fn require_auth(
    State(authenticator): State<Authenticator>,
    mut request: Request,
    next: Next,
) -> Response {
    let result = authenticator
        .authenticate(authorization_header(request.headers()))
        .await;

    match result {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}
