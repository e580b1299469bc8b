// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Library Manager: identity service for the library-management web app.
//!
//! Resolves session tokens into sanitized user profiles for the staff and
//! student frontends.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::IdentityResolver;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub identity: IdentityResolver,
}
