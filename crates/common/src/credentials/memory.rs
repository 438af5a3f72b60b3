use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{CredentialError, CredentialStore, Credentials};

#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    inner: Arc<RwLock<Credentials>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> Result<Credentials, CredentialError> {
        Ok(self.inner.read().clone())
    }

    async fn append(&self, username: &str, password_hash: &str) -> Result<(), CredentialError> {
        self.inner
            .write()
            .insert(username.to_string(), password_hash.to_string());
        Ok(())
    }
}
