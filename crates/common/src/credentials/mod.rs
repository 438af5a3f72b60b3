//! Username to password-hash mapping
//!
//! The store is append-only during normal operation: users are added by
//! sign-up (or the CLI) and never updated or removed by the service.
//! Passwords are only ever kept as salted argon2 hashes, see [`hash`].

use std::collections::BTreeMap;
use std::fmt::Debug;

use async_trait::async_trait;

pub mod hash;
mod memory;
mod yaml;

pub use memory::MemoryCredentialStore;
pub use yaml::YamlCredentialStore;

/// username -> password hash (PHC string)
pub type Credentials = BTreeMap<String, String>;

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("credential store i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed credential file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("password hashing failed: {0}")]
    Hash(String),
}

#[async_trait]
pub trait CredentialStore: Send + Sync + Debug + Clone + 'static {
    /// Read the full mapping. No caching: every call reads through.
    async fn load(&self) -> Result<Credentials, CredentialError>;

    /// Persist a new username / hash pair
    async fn append(&self, username: &str, password_hash: &str) -> Result<(), CredentialError>;

    async fn contains(&self, username: &str) -> Result<bool, CredentialError> {
        Ok(self.load().await?.contains_key(username))
    }

    /// Check a password against the stored hash.
    ///
    /// Unknown users short-circuit to `false` without hashing anything.
    async fn verify(&self, username: &str, password: &str) -> Result<bool, CredentialError> {
        let credentials = self.load().await?;
        let Some(stored) = credentials.get(username) else {
            return Ok(false);
        };
        Ok(hash::verify_password(password, stored))
    }

    /// Hash `password` and append the user. Validation happens upstream.
    async fn register(&self, username: &str, password: &str) -> Result<(), CredentialError> {
        let password_hash = hash::hash_password(password)?;
        self.append(username, &password_hash).await?;
        tracing::info!(username, "user registered");
        Ok(())
    }
}
