use std::fmt::Debug;

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The document is absent or the requested name is not a flat name
    #[error("{0} does not exist")]
    NotFound(String),
    #[error("{0} exists already")]
    AlreadyExists(String),
    /// Every copy number for the base name is taken
    #[error("{0} cannot be duplicated any further")]
    CopiesExhausted(String),
    #[error("document store i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Storage backend for a single flat namespace of documents.
///
/// Implementations receive names that already passed
///  [`is_flat_name`](super::is_flat_name); the repository
///  never forwards anything else.
#[async_trait]
pub trait DocumentStore: Send + Sync + Debug + Clone + 'static {
    /// Every entry currently in the namespace, in no particular order
    async fn names(&self) -> Result<Vec<String>, DocumentError>;

    async fn exists(&self, name: &str) -> Result<bool, DocumentError>;

    /// Create a new entry, failing with
    ///  [`DocumentError::AlreadyExists`] if the name is taken
    async fn create(&self, name: &str, content: &[u8]) -> Result<(), DocumentError>;

    async fn read(&self, name: &str) -> Result<Vec<u8>, DocumentError>;

    /// Replace the full content of an entry, creating it if needed
    async fn write(&self, name: &str, content: &[u8]) -> Result<(), DocumentError>;

    /// Remove an entry. Removing a missing entry is not an error.
    async fn remove(&self, name: &str) -> Result<(), DocumentError>;
}
