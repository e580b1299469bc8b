// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Resolve the caller's identity from request credentials.
//!
//! Order of checks is fixed: token present, token valid, user exists, user
//! active. The first failing check decides the outcome.

use crate::config::SESSION_COOKIE;
use crate::db::UserStore;
use crate::error::AppError;
use crate::models::SanitizedUserProfile;
use crate::services::session::{SessionTokens, TokenError};
use axum::http::{header, HeaderMap};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

/// Classified identity failure.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("No authentication token provided")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("User not found")]
    UserNotFound,

    #[error("User account is not active")]
    InactiveAccount,

    #[error("User store failure: {0}")]
    Store(AppError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Pull the session token out of the request, cookie first.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        let value = cookie.value().trim();
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.split_once(' '))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Turns request credentials into a sanitized profile.
#[derive(Clone)]
pub struct IdentityResolver {
    tokens: SessionTokens,
    users: Arc<dyn UserStore>,
}

impl IdentityResolver {
    pub fn new(tokens: SessionTokens, users: Arc<dyn UserStore>) -> Self {
        Self { tokens, users }
    }

    pub fn tokens(&self) -> &SessionTokens {
        &self.tokens
    }

    pub async fn resolve(&self, headers: &HeaderMap) -> Result<SanitizedUserProfile, AuthError> {
        let token = extract_token(headers).ok_or(AuthError::MissingToken)?;
        self.resolve_token(&token).await
    }

    /// Steps 2-5 of resolution, for callers that already hold a token.
    pub async fn resolve_token(&self, token: &str) -> Result<SanitizedUserProfile, AuthError> {
        let claims = self.tokens.verify(token).map_err(|err| match err {
            TokenError::Invalid => AuthError::InvalidToken,
            TokenError::Internal(reason) => {
                AuthError::Internal(anyhow::anyhow!("Session token decode failed: {}", reason))
            }
        })?;

        let user = self
            .users
            .find_user(&claims.sub)
            .await
            .map_err(AuthError::Store)?
            .ok_or(AuthError::UserNotFound)?;

        if !user.is_active {
            return Err(AuthError::InactiveAccount);
        }

        Ok(SanitizedUserProfile::from(&user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryUserStore;
    use crate::models::{User, UserRole};
    use async_trait::async_trait;
    use axum::http::HeaderValue;
    use std::time::Duration;

    const KEY: &[u8] = b"test_signing_key_32_bytes_long!!";

    struct BrokenStore;

    #[async_trait]
    impl UserStore for BrokenStore {
        async fn find_user(&self, _user_id: &str) -> Result<Option<User>, AppError> {
            Err(AppError::Database("connection reset".to_string()))
        }
    }

    fn make_user(id: &str, is_active: bool) -> User {
        User {
            id: id.to_string(),
            email: format!("{id}@school.edu"),
            name: "Grace".to_string(),
            role: UserRole::Student,
            student_id: Some("S-1".to_string()),
            password_hash: "hash".to_string(),
            is_active,
            created_at: "2025-01-01T00:00:00Z".to_string(),
            last_login_at: None,
        }
    }

    fn resolver_with(users: Arc<dyn UserStore>) -> IdentityResolver {
        IdentityResolver::new(SessionTokens::new(KEY, Duration::from_secs(3600)), users)
    }

    fn seeded_resolver() -> IdentityResolver {
        let store = MemoryUserStore::new();
        store.insert(make_user("active", true));
        store.insert(make_user("disabled", false));
        resolver_with(Arc::new(store))
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        headers
    }

    #[test]
    fn test_extract_token_prefers_cookie() {
        let mut headers = bearer("from-header");
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; library_token=from-cookie"),
        );
        assert_eq!(extract_token(&headers), Some("from-cookie".to_string()));
    }

    #[test]
    fn test_extract_token_ignores_empty_values() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("library_token="));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(extract_token(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(extract_token(&headers), None);
    }

    #[test]
    fn test_extract_token_scheme_is_case_insensitive() {
        for scheme in ["bearer", "BEARER", "BeArEr"] {
            let mut headers = HeaderMap::new();
            headers.insert(
                header::AUTHORIZATION,
                HeaderValue::from_str(&format!("{scheme} abc.def.ghi")).unwrap(),
            );
            assert_eq!(extract_token(&headers), Some("abc.def.ghi".to_string()));
        }
    }

    #[tokio::test]
    async fn test_resolve_missing_token() {
        let resolver = seeded_resolver();
        let err = resolver.resolve(&HeaderMap::new()).await.unwrap_err();
        assert!(matches!(err, AuthError::MissingToken));
    }

    #[tokio::test]
    async fn test_resolve_invalid_token() {
        let resolver = seeded_resolver();
        let err = resolver.resolve(&bearer("not.a.jwt")).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn test_resolve_unknown_user() {
        let resolver = seeded_resolver();
        let token = resolver.tokens().issue("ghost").unwrap();
        let err = resolver.resolve(&bearer(&token)).await.unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }

    #[tokio::test]
    async fn test_resolve_inactive_user() {
        let resolver = seeded_resolver();
        let token = resolver.tokens().issue("disabled").unwrap();
        let err = resolver.resolve(&bearer(&token)).await.unwrap_err();
        assert!(matches!(err, AuthError::InactiveAccount));
    }

    #[tokio::test]
    async fn test_resolve_active_user() {
        let resolver = seeded_resolver();
        let token = resolver.tokens().issue("active").unwrap();

        let first = resolver.resolve(&bearer(&token)).await.unwrap();
        let second = resolver.resolve(&bearer(&token)).await.unwrap();

        assert_eq!(first.id, "active");
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_store_failure_is_not_a_lookup_miss() {
        let resolver = resolver_with(Arc::new(BrokenStore));
        let token = resolver.tokens().issue("active").unwrap();

        let err = resolver.resolve(&bearer(&token)).await.unwrap_err();
        assert!(matches!(err, AuthError::Store(AppError::Database(_))));
    }

    #[tokio::test]
    async fn test_invalid_token_short_circuits_before_lookup() {
        // BrokenStore would turn any lookup into a store error
        let resolver = resolver_with(Arc::new(BrokenStore));
        let err = resolver.resolve(&bearer("garbage")).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }
}
