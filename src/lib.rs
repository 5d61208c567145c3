// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! OIDC Bearer Auth - OpenID-Connect bearer token authentication for Axum
//!
//! Validates `Authorization: Bearer <JWT>` headers and produces the caller's
//! subject and email, or one of a fixed set of denial messages.
//!
//! ## Modules
//!
//! - `auth` - Token extraction, claim checks, JWT/JWKS verification, Axum adapters
//! - `api` - HTTP API handlers (Axum) for the demo service
//! - `config` - Environment configuration
//! - `state` - Shared application state

pub mod api;
pub mod auth;
pub mod config;
pub mod state;
