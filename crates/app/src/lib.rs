//! folio serves a flat directory of text and markdown documents as a small
//! website, with signed-in users allowed to create, edit, duplicate and
//! delete them.

pub mod daemon;
pub mod state;

pub use daemon::http_server;
pub use daemon::{spawn_service, ServiceConfig, ServiceState};
pub use state::{AppConfig, AppState, StateError};
