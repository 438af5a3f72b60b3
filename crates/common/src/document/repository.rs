use super::naming::{self, duplicate_name};
use super::store::{DocumentError, DocumentStore};
use super::{is_flat_name, Document, DocumentKind};

/// Operations over the document namespace.
///
/// Callers are expected to [`resolve`](Self::resolve) a requested name
///  before reading, writing or deleting it, and to validate new names
///  (see [`crate::validation`]) before creating them.
#[derive(Debug, Clone)]
pub struct DocumentRepository<S: DocumentStore> {
    store: S,
}

impl<S: DocumentStore> DocumentRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// All document names, sorted lexicographically
    pub async fn list(&self) -> Result<Vec<String>, DocumentError> {
        let mut names = self.store.names().await?;
        names.sort();
        Ok(names)
    }

    /// Look up a document by its exact name
    pub async fn resolve(&self, name: &str) -> Result<Document, DocumentError> {
        if !is_flat_name(name) {
            tracing::debug!(name, "rejecting non-flat document name");
            return Err(DocumentError::NotFound(name.to_string()));
        }
        if !self.store.exists(name).await? {
            return Err(DocumentError::NotFound(name.to_string()));
        }
        Ok(Document::new(name))
    }

    pub async fn create(&self, name: &str, content: &[u8]) -> Result<Document, DocumentError> {
        if !is_flat_name(name) {
            return Err(DocumentError::NotFound(name.to_string()));
        }
        self.store.create(name, content).await?;
        tracing::info!(name, "document created");
        Ok(Document::new(name))
    }

    pub async fn read(&self, document: &Document) -> Result<Vec<u8>, DocumentError> {
        self.store.read(document.name()).await
    }

    /// Replace the content of a document wholesale
    pub async fn write(&self, document: &Document, content: &[u8]) -> Result<(), DocumentError> {
        self.store.write(document.name(), content).await?;
        tracing::info!(name = document.name(), bytes = content.len(), "document updated");
        Ok(())
    }

    pub async fn delete(&self, document: &Document) -> Result<(), DocumentError> {
        self.store.remove(document.name()).await?;
        tracing::info!(name = document.name(), "document deleted");
        Ok(())
    }

    /// Copy a document under the next free copy name and return that name
    pub async fn duplicate(&self, name: &str) -> Result<String, DocumentError> {
        let source = self.resolve(name).await?;
        let content = self.read(&source).await?;
        let existing = self.store.names().await?;

        let copy = duplicate_name(source.name(), existing.as_slice())
            .ok_or_else(|| DocumentError::CopiesExhausted(source.name().to_string()))?;
        self.store.create(&copy, &content).await?;

        tracing::info!(source = source.name(), copy = %copy, "document duplicated");
        Ok(copy)
    }

    /// Write a markdown document embedding a static image.
    ///
    /// The document is named after the image's base name, e.g. `1.jpg`
    ///  becomes `1.md`, and is overwritten if it already exists.
    pub async fn create_image_reference(
        &self,
        image_name: &str,
        description: &str,
    ) -> Result<Document, DocumentError> {
        let name = format!(
            "{}.{}",
            naming::base_name(image_name),
            DocumentKind::Markdown.extension()
        );
        if !is_flat_name(&name) {
            return Err(DocumentError::NotFound(name));
        }

        let content = format!("![{}]({})", description, image_name);
        self.store.write(&name, content.as_bytes()).await?;

        tracing::info!(name = %name, image = image_name, "image reference written");
        Ok(Document::new(name))
    }
}
