// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer token extraction from a raw `Authorization` header value.

/// Why no token could be extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Absence {
    /// Header absent, empty, or whitespace only.
    Empty,
    /// Header present but not of the form `Bearer <token>`.
    Malformed,
}

/// Result of running [`extract_bearer`] on a header value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractedToken<'a> {
    Absent(Absence),
    Token(&'a str),
}

impl<'a> ExtractedToken<'a> {
    /// The raw token, if one was extracted.
    pub fn token(self) -> Option<&'a str> {
        match self {
            ExtractedToken::Token(token) => Some(token),
            ExtractedToken::Absent(_) => None,
        }
    }
}

/// Extract the raw token from an `Authorization` header value.
///
/// The value must split on a single ASCII space into exactly two parts: a
/// scheme equal to `bearer` (ASCII case-insensitive) and a non-blank token.
/// The token is returned as-is; its shape is validated later.
pub fn extract_bearer(header: Option<&str>) -> ExtractedToken<'_> {
    let header = match header {
        Some(h) if !h.trim().is_empty() => h,
        _ => return ExtractedToken::Absent(Absence::Empty),
    };

    let mut parts = header.split(' ');
    let (scheme, token) = match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) => (scheme, token),
        _ => return ExtractedToken::Absent(Absence::Malformed),
    };

    if token.trim().is_empty() || !scheme.eq_ignore_ascii_case("bearer") {
        return ExtractedToken::Absent(Absence::Malformed);
    }

    ExtractedToken::Token(token)
}
