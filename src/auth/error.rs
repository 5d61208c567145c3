// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.
//!
//! The `Display` text of every variant is part of the public contract:
//! clients and tests match on it verbatim.

use axum::{
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::claims::PayloadError;
use super::verifier::VerificationError;

/// Reason a request was denied authentication.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No authorization header present
    #[error("Authorization header missing")]
    MissingAuthHeader,
    /// Header present but not `Bearer <token>`
    #[error("Bearer token missing")]
    MissingBearerToken,
    /// Payload segment missing or not base64url
    #[error("Error validating token: payload decoding failed")]
    PayloadDecoding,
    /// Payload decoded but is not a JSON claims object
    #[error("Error validating token: converting payload to JSON failed")]
    PayloadNotJson,
    /// `sub` or `email` missing or blank
    #[error("Error validating token: 'sub' and 'email' claims are required")]
    MissingRequiredClaims,
    /// Verifier rejected the token; holds the verifier's message only
    #[error("Error validating token: {0}")]
    Verification(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingAuthHeader => "missing_auth_header",
            AuthError::MissingBearerToken => "missing_bearer_token",
            AuthError::PayloadDecoding => "payload_decoding_failed",
            AuthError::PayloadNotJson => "payload_not_json",
            AuthError::MissingRequiredClaims => "missing_required_claims",
            AuthError::Verification(_) => "token_verification_failed",
        }
    }

    /// Every denial is an authentication failure.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }
}

impl From<PayloadError> for AuthError {
    fn from(err: PayloadError) -> Self {
        match err {
            PayloadError::Decoding => AuthError::PayloadDecoding,
            PayloadError::NotJson => AuthError::PayloadNotJson,
        }
    }
}

impl From<VerificationError> for AuthError {
    fn from(err: VerificationError) -> Self {
        AuthError::Verification(err.to_string())
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        let mut response = (status, body).into_response();
        response
            .headers_mut()
            .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        response
    }
}
