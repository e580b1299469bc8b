// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod identity;
pub mod session;

pub use identity::{AuthError, IdentityResolver};
pub use session::{Claims, SessionTokens, TokenError};
