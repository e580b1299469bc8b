// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Account role within the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Librarian,
    Student,
}

/// User record stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// User ID (also used as document ID)
    pub id: String,
    pub email: String,
    /// Display name
    pub name: String,
    pub role: UserRole,
    /// Student card number, only set for students
    #[serde(default)]
    pub student_id: Option<String>,
    /// Password hash, written by the login service. Never leaves the server.
    pub password_hash: String,
    /// Deactivated accounts keep their record but cannot sign in
    pub is_active: bool,
    /// When the account was created (RFC 3339)
    pub created_at: String,
    /// Last successful login (RFC 3339)
    #[serde(default)]
    pub last_login_at: Option<String>,
}

/// Client-safe projection of a [`User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SanitizedUserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub student_id: Option<String>,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

impl From<&User> for SanitizedUserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            student_id: user.student_id.clone(),
            created_at: user.created_at.clone(),
            last_login_at: user.last_login_at.clone(),
        }
    }
}
