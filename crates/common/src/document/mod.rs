//! The flat document namespace
//!
//! Every document is a single entry in one directory-like namespace, keyed
//! by its file name (extension included). There are no subdirectories.
//!
//! - **[`DocumentStore`]**: backend trait; [`FsDocumentStore`] keeps one file
//!   per document, [`MemoryDocumentStore`] keeps everything in a map
//! - **[`DocumentRepository`]**: the operations the transport calls into,
//!   including name resolution and duplication
//! - **[`naming`]**: base names, copy numbers and duplicate name derivation
//!
//! # Name safety
//!
//! A requested name is only ever looked up if it is a plain flat name.
//! Anything that could address a path outside the namespace root (separators,
//! `..`, a leading dot, NUL) resolves to [`DocumentError::NotFound`].

mod fs;
mod memory;
pub mod naming;
mod repository;
mod store;

pub use fs::FsDocumentStore;
pub use memory::MemoryDocumentStore;
pub use repository::DocumentRepository;
pub use store::{DocumentError, DocumentStore};

/// Extensions a document may be created with, in display order
pub const DOCUMENT_EXTENSIONS: [&str; 2] = [".txt", ".md"];

/// The closed set of document types the service knows how to display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    PlainText,
    Markdown,
}

impl DocumentKind {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "txt" => Some(Self::PlainText),
            "md" => Some(Self::Markdown),
            _ => None,
        }
    }

    /// Resolve the kind from the last extension of a document name
    pub fn from_name(name: &str) -> Option<Self> {
        naming::extension(name).and_then(Self::from_extension)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::PlainText => "txt",
            Self::Markdown => "md",
        }
    }
}

/// A handle to a document known to exist at resolution time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    name: String,
    kind: Option<DocumentKind>,
}

impl Document {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let kind = DocumentKind::from_name(&name);
        Self { name, kind }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `None` for entries whose extension is outside the allow-list,
    ///  e.g. files dropped into the data directory by hand
    pub fn kind(&self) -> Option<DocumentKind> {
        self.kind
    }
}

/// Whether `name` is a plain entry name within a flat namespace
pub fn is_flat_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains("..")
        && !name.contains(['/', '\\', '\0'])
}
