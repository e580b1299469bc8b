//! Database layer (Firestore, with an in-memory store for dev and tests).

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryUserStore;

use crate::error::AppError;
use crate::models::User;
use async_trait::async_trait;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
}

/// Read access to user records.
///
/// `Ok(None)` means the user does not exist; `Err` is reserved for the store
/// itself failing.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user(&self, user_id: &str) -> Result<Option<User>, AppError>;
}
