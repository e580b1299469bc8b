// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use library_manager::config::Config;
use library_manager::db::{MemoryUserStore, UserStore};
use library_manager::error::AppError;
use library_manager::models::{User, UserRole};
use library_manager::routes::create_router;
use library_manager::services::{IdentityResolver, SessionTokens};
use library_manager::AppState;
use std::sync::Arc;

pub const ACTIVE_USER_ID: &str = "user-active";
pub const INACTIVE_USER_ID: &str = "user-inactive";

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Store whose every lookup fails, for exercising the 500 path.
#[allow(dead_code)]
pub struct UnavailableStore;

#[async_trait]
impl UserStore for UnavailableStore {
    async fn find_user(&self, _user_id: &str) -> Result<Option<User>, AppError> {
        Err(AppError::Database(
            "connection refused: users-db.internal:5432".to_string(),
        ))
    }
}

/// Store that answers with a client-class error instead of a lookup result.
#[allow(dead_code)]
pub struct MisbehavingStore;

#[async_trait]
impl UserStore for MisbehavingStore {
    async fn find_user(&self, _user_id: &str) -> Result<Option<User>, AppError> {
        Err(AppError::AuthRequired("Authentication required"))
    }
}

#[allow(dead_code)]
pub fn make_user(id: &str, is_active: bool) -> User {
    User {
        id: id.to_string(),
        email: format!("{id}@library.example"),
        name: "Test Patron".to_string(),
        role: UserRole::Student,
        student_id: Some("S-000123".to_string()),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        is_active,
        created_at: "2025-08-25T09:00:00Z".to_string(),
        last_login_at: Some("2026-10-01T12:30:00Z".to_string()),
    }
}

/// Create a test app over the given store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app_with_store(users: Arc<dyn UserStore>) -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let tokens = SessionTokens::new(&config.jwt_signing_key, config.session_ttl);
    let identity = IdentityResolver::new(tokens, users);

    let state = Arc::new(AppState { config, identity });

    (create_router(state.clone()), state)
}

/// Create a test app seeded with one active and one inactive user.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let store = MemoryUserStore::new();
    store.insert(make_user(ACTIVE_USER_ID, true));
    store.insert(make_user(INACTIVE_USER_ID, false));
    create_test_app_with_store(Arc::new(store))
}

/// Issue a session token signed with the test app's key.
#[allow(dead_code)]
pub fn issue_token(state: &AppState, user_id: &str) -> String {
    state
        .identity
        .tokens()
        .issue(user_id)
        .expect("Failed to issue session token")
}
