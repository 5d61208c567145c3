// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! OpenID-Connect bearer token authentication.
//!
//! ## Auth Flow
//!
//! 1. Client obtains an ID token from the OIDC provider
//! 2. Client sends `Authorization: Bearer <JWT>`
//! 3. Server:
//!    - Extracts the token from the header
//!    - Decodes the payload and requires `sub` and `email`
//!    - Verifies signature, algorithm, expiry, issuer, audience (JWKS)
//!    - Exposes `sub` / `email` as [`AuthenticatedUser`]
//!
//! Every failure maps to one [`AuthError`] with a fixed message, answered
//! with HTTP 401.
//!
//! ## Security
//!
//! - Only asymmetric signing algorithms are accepted (RS256 / ES256 by default)
//! - JWKS is cached with TTL for performance
//! - Clock skew tolerance is 60 seconds unless configured

pub mod authenticator;
pub mod claims;
pub mod error;
pub mod extractor;
pub mod jwks;
pub mod middleware;
pub mod token;
pub mod verifier;

pub use authenticator::{authenticate, AuthResult, Authenticator};
pub use claims::{claim_types, AuthenticatedUser, TokenClaims};
pub use error::AuthError;
pub use extractor::Auth;
pub use jwks::JwksManager;
pub use middleware::require_auth;
pub use token::{extract_bearer, Absence, ExtractedToken};
pub use verifier::{JwtVerifier, KeySource, VerificationError, Verifier, VerifierConfig};
