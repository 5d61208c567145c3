// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token payload decoding and the authenticated identity.

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Claim type URIs used when the identity is exposed as a claim list.
pub mod claim_types {
    /// Claim carrying the token subject (`sub`).
    pub const NAME_IDENTIFIER: &str =
        "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier";
    /// Claim carrying the token `email`.
    pub const EMAIL: &str = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/emailaddress";
}

/// Base64url with optional padding. Trailing bits are tolerated.
const BASE64_URL_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Why the payload segment of a token could not be turned into claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// Segment missing, empty, or not valid base64url.
    Decoding,
    /// Decoded bytes are not a JSON object of the expected shape.
    NotJson,
}

/// Claims read from the token payload before verification.
///
/// Both fields are optional at decode time; [`TokenClaims::into_user`]
/// enforces that they are present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl TokenClaims {
    /// Decode the claims from the middle segment of a `header.payload.signature` token.
    pub fn from_token(token: &str) -> Result<Self, PayloadError> {
        let payload = token
            .split('.')
            .nth(1)
            .filter(|segment| !segment.is_empty())
            .ok_or(PayloadError::Decoding)?;

        let bytes = BASE64_URL_LENIENT
            .decode(payload)
            .map_err(|_| PayloadError::Decoding)?;

        // Only a JSON object is a claims set; serde would also accept an array.
        let object: Map<String, Value> =
            serde_json::from_slice(&bytes).map_err(|_| PayloadError::NotJson)?;
        serde_json::from_value(Value::Object(object)).map_err(|_| PayloadError::NotJson)
    }

    /// Build the identity, requiring non-blank `sub` and `email`.
    pub fn into_user(self) -> Option<AuthenticatedUser> {
        let subject = self.sub.filter(|s| !s.trim().is_empty())?;
        let email = self.email.filter(|e| !e.trim().is_empty())?;
        Some(AuthenticatedUser { subject, email })
    }
}

/// Authenticated caller established from a bearer token.
///
/// Inserted into request extensions by the auth middleware.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Token subject (`sub` claim)
    pub subject: String,
    /// Token `email` claim
    pub email: String,
}

impl AuthenticatedUser {
    /// The identity as `(claim type, value)` pairs.
    pub fn claims(&self) -> [(&'static str, &str); 2] {
        [
            (claim_types::NAME_IDENTIFIER, self.subject.as_str()),
            (claim_types::EMAIL, self.email.as_str()),
        ]
    }

    /// Look up a claim value by claim type URI.
    pub fn claim(&self, claim_type: &str) -> Option<&str> {
        self.claims()
            .into_iter()
            .find(|(ty, _)| *ty == claim_type)
            .map(|(_, value)| value)
    }
}
