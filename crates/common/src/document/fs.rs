use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::store::{DocumentError, DocumentStore};
use super::is_flat_name;

/// One file per document inside a single directory
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Open a store rooted at `root`, creating the directory if needed
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, DocumentError> {
        let store = Self::new(root);
        fs::create_dir_all(&store.root).await?;
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, DocumentError> {
        if !is_flat_name(name) {
            return Err(DocumentError::NotFound(name.to_string()));
        }
        Ok(self.root.join(name))
    }
}

fn not_found_as(name: &str) -> impl FnOnce(std::io::Error) -> DocumentError + '_ {
    move |e| match e.kind() {
        ErrorKind::NotFound => DocumentError::NotFound(name.to_string()),
        _ => DocumentError::Io(e),
    }
}

#[async_trait]
impl DocumentStore for FsDocumentStore {
    async fn names(&self) -> Result<Vec<String>, DocumentError> {
        let mut entries = fs::read_dir(&self.root).await?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            // Non UTF-8 names can't be addressed over HTTP anyway
            let Ok(name) = entry.file_name().into_string() else {
                tracing::warn!(path = ?entry.path(), "skipping non utf-8 document name");
                continue;
            };
            if is_flat_name(&name) {
                names.push(name);
            }
        }

        Ok(names)
    }

    async fn exists(&self, name: &str) -> Result<bool, DocumentError> {
        let path = self.path_for(name)?;
        match fs::metadata(&path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn create(&self, name: &str, content: &[u8]) -> Result<(), DocumentError> {
        let path = self.path_for(name)?;
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => DocumentError::AlreadyExists(name.to_string()),
                _ => DocumentError::Io(e),
            })?;
        file.write_all(content).await?;
        file.flush().await?;
        Ok(())
    }

    async fn read(&self, name: &str) -> Result<Vec<u8>, DocumentError> {
        let path = self.path_for(name)?;
        fs::read(&path).await.map_err(not_found_as(name))
    }

    async fn write(&self, name: &str, content: &[u8]) -> Result<(), DocumentError> {
        let path = self.path_for(name)?;
        fs::write(&path, content).await?;
        Ok(())
    }

    async fn remove(&self, name: &str) -> Result<(), DocumentError> {
        let path = self.path_for(name)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
