//! Shared test utilities for repository and credential integration tests
#![allow(dead_code)]

use ::common::prelude::{DocumentRepository, FsDocumentStore, YamlCredentialStore};
use tempfile::TempDir;

/// Set up a repository over an empty data directory
pub async fn setup_repository() -> (DocumentRepository<FsDocumentStore>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let store = FsDocumentStore::open(temp_dir.path().join("data"))
        .await
        .unwrap();
    (DocumentRepository::new(store), temp_dir)
}

/// Write a document straight to disk, bypassing the repository
pub fn create_document(repo: &DocumentRepository<FsDocumentStore>, name: &str, content: &str) {
    std::fs::write(repo.store().root().join(name), content).unwrap();
}

/// Credential store backed by a `users.yml` inside a temp dir
pub fn setup_credentials() -> (YamlCredentialStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let store = YamlCredentialStore::new(temp_dir.path().join("users.yml"));
    (store, temp_dir)
}
