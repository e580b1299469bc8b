// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session token signing and verification (HS256 JWT).

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Bad signature, malformed, expired, or otherwise not acceptable.
    #[error("invalid or expired token")]
    Invalid,

    /// Verification could not run, or a correctly signed token carried
    /// claims we cannot interpret.
    #[error("token verification failed: {0}")]
    Internal(String),
}

/// Signs and verifies session tokens with a shared secret.
#[derive(Clone)]
pub struct SessionTokens {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl SessionTokens {
    pub fn new(signing_key: &[u8], ttl: Duration) -> Self {
        // A token is dead the second `exp` passes; no clock-skew grace.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(signing_key),
            decoding_key: DecodingKey::from_secret(signing_key),
            validation,
            ttl,
        }
    }

    /// Create a session token for a user.
    pub fn issue(&self, user_id: &str) -> anyhow::Result<String> {
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;

        let exp = usize::try_from(self.ttl.as_secs())
            .ok()
            .and_then(|ttl| now.checked_add(ttl))
            .ok_or_else(|| anyhow::anyhow!("Session TTL overflows token expiry"))?;

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp,
        };

        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    /// Verify signature and expiry, then decode the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        // Decode loosely first so a shape problem in a genuinely signed token
        // is told apart from a forged or corrupted one.
        let token_data =
            decode::<serde_json::Value>(token, &self.decoding_key, &self.validation).map_err(
                |err| match err.kind() {
                    ErrorKind::InvalidEcdsaKey
                    | ErrorKind::InvalidRsaKey(_)
                    | ErrorKind::RsaFailedSigning
                    | ErrorKind::InvalidKeyFormat
                    | ErrorKind::Crypto(_) => TokenError::Internal(err.to_string()),
                    _ => TokenError::Invalid,
                },
            )?;

        serde_json::from_value(token_data.claims)
            .map_err(|e| TokenError::Internal(format!("unexpected claims shape: {}", e)))
    }
}
