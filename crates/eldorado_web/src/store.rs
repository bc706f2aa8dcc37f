use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use eldorado_core::{Result, UserRecord, UserStore};

/// In-memory user store keyed by lowercased email. Contents live exactly as
/// long as the process.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert_user(&self, user: UserRecord) -> Result<bool> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Ok(false);
        }
        users.insert(user.email.clone(), user);
        Ok(true)
    }

    async fn get_user(&self, email: &str) -> Result<Option<UserRecord>> {
        Ok(self.users.read().await.get(email).cloned())
    }
}
