use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::store::{DocumentError, DocumentStore};

/// In-memory document store, mostly useful for tests
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    inner: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn names(&self) -> Result<Vec<String>, DocumentError> {
        Ok(self.inner.read().keys().cloned().collect())
    }

    async fn exists(&self, name: &str) -> Result<bool, DocumentError> {
        Ok(self.inner.read().contains_key(name))
    }

    async fn create(&self, name: &str, content: &[u8]) -> Result<(), DocumentError> {
        let mut inner = self.inner.write();
        if inner.contains_key(name) {
            return Err(DocumentError::AlreadyExists(name.to_string()));
        }
        inner.insert(name.to_string(), content.to_vec());
        Ok(())
    }

    async fn read(&self, name: &str) -> Result<Vec<u8>, DocumentError> {
        self.inner
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| DocumentError::NotFound(name.to_string()))
    }

    async fn write(&self, name: &str, content: &[u8]) -> Result<(), DocumentError> {
        self.inner.write().insert(name.to_string(), content.to_vec());
        Ok(())
    }

    async fn remove(&self, name: &str) -> Result<(), DocumentError> {
        self.inner.write().remove(name);
        Ok(())
    }
}
