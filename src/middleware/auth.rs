// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session authentication middleware.

use crate::error::AppError;
use crate::services::AuthError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Middleware that requires an authenticated, active user.
///
/// On success the [`crate::models::SanitizedUserProfile`] is stored in request
/// extensions for handlers to pick up with `Extension`.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let profile = match state.identity.resolve(request.headers()).await {
        Ok(profile) => profile,
        Err(err) => {
            match &err {
                AuthError::MissingToken | AuthError::InvalidToken => {
                    tracing::debug!(reason = %err, "Rejected unauthenticated request");
                }
                AuthError::UserNotFound | AuthError::InactiveAccount => {
                    tracing::warn!(reason = %err, "Rejected session for unusable account");
                }
                AuthError::Store(_) | AuthError::Internal(_) => {}
            }
            return Err(err.into());
        }
    };

    tracing::debug!(user_id = %profile.id, "Authenticated request");
    request.extensions_mut().insert(profile);

    Ok(next.run(request).await)
}
