use async_trait::async_trait;

use crate::types::UserRecord;
use crate::Result;

/// Keyed user storage for the API layer.
///
/// Keys are lowercased email addresses. Implementations own their lifecycle:
/// the in-memory backend is created at process start and emptied at restart.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Store a new user. Returns `false` without touching the store when the
    /// email is already registered.
    async fn insert_user(&self, user: UserRecord) -> Result<bool>;

    /// Look up a user by lowercased email.
    async fn get_user(&self, email: &str) -> Result<Option<UserRecord>>;
}
