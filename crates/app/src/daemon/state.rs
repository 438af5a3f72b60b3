use common::prelude::{
    markdown_to_html, DocumentError, DocumentRepository, FsDocumentStore, MarkdownFn,
    PublicAssets, YamlCredentialStore,
};

use super::config::Config;
use super::session::SessionStore;

/// Main service state, shared by every request handler
#[derive(Clone)]
pub struct State {
    documents: DocumentRepository<FsDocumentStore>,
    credentials: YamlCredentialStore,
    assets: PublicAssets,
    sessions: SessionStore,
    markdown: MarkdownFn,
}

impl State {
    pub async fn from_config(config: &Config) -> Result<Self, StateSetupError> {
        // 1. Setup the document namespace
        let store = FsDocumentStore::open(&config.data_path).await?;
        tracing::info!(path = %config.data_path.display(), "Using document directory");

        // 2. Setup the credential file
        if !config.credentials_path.exists() {
            return Err(StateSetupError::CredentialsPathDoesNotExist);
        }
        let credentials = YamlCredentialStore::new(&config.credentials_path);

        // 3. Setup public assets
        if !config.public_path.is_dir() {
            tracing::warn!(
                path = %config.public_path.display(),
                "public directory does not exist, image references cannot be created"
            );
        }
        let assets = PublicAssets::new(&config.public_path);

        Ok(Self::new(
            DocumentRepository::new(store),
            credentials,
            assets,
            markdown_to_html,
        ))
    }

    pub fn new(
        documents: DocumentRepository<FsDocumentStore>,
        credentials: YamlCredentialStore,
        assets: PublicAssets,
        markdown: MarkdownFn,
    ) -> Self {
        Self {
            documents,
            credentials,
            assets,
            sessions: SessionStore::default(),
            markdown,
        }
    }

    pub fn documents(&self) -> &DocumentRepository<FsDocumentStore> {
        &self.documents
    }

    pub fn credentials(&self) -> &YamlCredentialStore {
        &self.credentials
    }

    pub fn assets(&self) -> &PublicAssets {
        &self.assets
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn markdown(&self) -> MarkdownFn {
        self.markdown
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateSetupError {
    #[error("Credentials file does not exist")]
    CredentialsPathDoesNotExist,
    #[error("Document store error: {0}")]
    DocumentStore(#[from] DocumentError),
}
