// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session routes for the signed-in user.

use crate::error::ApiResponse;
use crate::models::SanitizedUserProfile;
use crate::AppState;
use axum::{routing::get, Extension, Json, Router};
use serde::Serialize;
use std::sync::Arc;

/// Routes that require authentication.
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/auth/me", get(get_me))
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: SanitizedUserProfile,
}

/// Get current user profile.
async fn get_me(
    Extension(user): Extension<SanitizedUserProfile>,
) -> Json<ApiResponse<MeResponse>> {
    ApiResponse::ok(MeResponse { user })
}
