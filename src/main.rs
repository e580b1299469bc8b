// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Library Manager API Server
//!
//! Serves the session identity endpoint used by the library staff and
//! student frontends.

use library_manager::{
    config::{Config, UserStoreKind},
    db::{FirestoreDb, MemoryUserStore, UserStore},
    services::{IdentityResolver, SessionTokens},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = Config::from_env()?;
    tracing::info!(port = config.port, store = ?config.user_store, "Starting Library Manager API");

    let users: Arc<dyn UserStore> = match config.user_store {
        UserStoreKind::Firestore => Arc::new(FirestoreDb::new(&config.gcp_project_id).await?),
        UserStoreKind::Memory => {
            let store = match &config.users_seed_path {
                Some(path) => MemoryUserStore::from_seed_file(path)?,
                None => MemoryUserStore::new(),
            };
            if store.is_empty() {
                tracing::warn!("In-memory user store is empty; every session will be rejected");
            }
            Arc::new(store)
        }
    };

    let tokens = SessionTokens::new(&config.jwt_signing_key, config.session_ttl);
    let identity = IdentityResolver::new(tokens, users);

    let state = Arc::new(AppState {
        config: config.clone(),
        identity,
    });

    let app = library_manager::routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("library_manager=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
