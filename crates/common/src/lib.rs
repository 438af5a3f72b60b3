/**
 * Session-derived access control.
 *  - Signed-in / signed-out guards
 *  - One-shot flash messages
 */
pub mod access;
/**
 * Existence lookups against the static
 *  asset directory images are served from.
 */
pub mod assets;
/**
 * Username to password-hash mapping,
 *  persisted as a flat YAML file.
 */
pub mod credentials;
/**
 * The flat document namespace: storage
 *  backends, the repository on top of them
 *  and the duplicate naming scheme.
 */
pub mod document;
/**
 * Turns a stored document into something
 *  displayable based on its kind.
 */
pub mod render;
/**
 * Input checks that produce the
 *  user-facing rejection reasons.
 */
pub mod validation;
/**
 * Helper for setting build version information
 *  at compile time.
 */
pub mod version;

pub mod prelude {
    pub use crate::access::{authenticate, AccessError, SessionContext};
    pub use crate::assets::{AssetLookup, PublicAssets};
    pub use crate::credentials::{
        CredentialError, CredentialStore, Credentials, MemoryCredentialStore, YamlCredentialStore,
    };
    pub use crate::document::{
        Document, DocumentError, DocumentKind, DocumentRepository, DocumentStore, FsDocumentStore,
        MemoryDocumentStore,
    };
    pub use crate::render::{markdown_to_html, render, MarkdownFn, Rendered};
    pub use crate::validation::ValidationError;
    pub use crate::version::{build_info, BuildInfo};
}
