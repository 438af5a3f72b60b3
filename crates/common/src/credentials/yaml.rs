use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::{CredentialError, CredentialStore, Credentials};

/// Credentials kept as a flat `username: hash` YAML mapping
#[derive(Debug, Clone)]
pub struct YamlCredentialStore {
    path: PathBuf,
}

impl YamlCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_raw(&self) -> Result<String, CredentialError> {
        match fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(raw),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl CredentialStore for YamlCredentialStore {
    async fn load(&self) -> Result<Credentials, CredentialError> {
        let raw = self.read_raw().await?;
        // serde_yaml refuses an empty document
        if raw.trim().is_empty() {
            return Ok(Credentials::new());
        }
        let credentials: Option<Credentials> = serde_yaml::from_str(&raw)?;
        Ok(credentials.unwrap_or_default())
    }

    async fn append(&self, username: &str, password_hash: &str) -> Result<(), CredentialError> {
        let raw = self.read_raw().await?;

        let mut entry = Credentials::new();
        entry.insert(username.to_string(), password_hash.to_string());
        let mut chunk = serde_yaml::to_string(&entry)?;
        if !raw.is_empty() && !raw.ends_with('\n') {
            chunk.insert(0, '\n');
        }

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(chunk.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}
