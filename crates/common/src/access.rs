//! Access gate
//!
//! Authentication state lives in a [`SessionContext`] owned by the transport
//! and passed explicitly into every check. The guards leave a flash message
//! behind on failure so the next rendered view can explain the redirect.

use serde::{Deserialize, Serialize};

use crate::credentials::{CredentialError, CredentialStore};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("You must be signed in to do that.")]
    Unauthorized,
    #[error("You are signed in already!")]
    AlreadySignedIn,
    /// Deliberately the same for unknown users and wrong passwords
    #[error("Invalid Credentials")]
    InvalidCredentials,
}

/// Per-session state the core reads and writes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub signed_in_as: Option<String>,
    pub pending_message: Option<String>,
}

impl SessionContext {
    pub fn is_signed_in(&self) -> bool {
        self.signed_in_as.is_some()
    }

    /// Set the one-shot message shown by the next rendered view
    pub fn flash(&mut self, message: impl Into<String>) {
        self.pending_message = Some(message.into());
    }

    /// Consume the pending message; a second call returns `None`
    pub fn take_message(&mut self) -> Option<String> {
        self.pending_message.take()
    }

    pub fn sign_in(&mut self, username: impl Into<String>) {
        self.signed_in_as = Some(username.into());
    }

    pub fn sign_out(&mut self) -> Option<String> {
        self.signed_in_as.take()
    }

    pub fn require_signed_in(&mut self) -> Result<(), AccessError> {
        if self.is_signed_in() {
            return Ok(());
        }
        self.fail(AccessError::Unauthorized)
    }

    pub fn require_signed_out(&mut self) -> Result<(), AccessError> {
        if !self.is_signed_in() {
            return Ok(());
        }
        self.fail(AccessError::AlreadySignedIn)
    }

    fn fail(&mut self, err: AccessError) -> Result<(), AccessError> {
        self.flash(err.to_string());
        Err(err)
    }
}

/// True iff `username` is known and `password` verifies against its hash
pub async fn authenticate<S: CredentialStore>(
    store: &S,
    username: &str,
    password: &str,
) -> Result<bool, CredentialError> {
    let ok = store.verify(username, password).await?;
    if !ok {
        tracing::debug!(username, "authentication failed");
    }
    Ok(ok)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::MemoryCredentialStore;

    #[test]
    fn test_require_signed_in_without_user() {
        let mut ctx = SessionContext::default();
        assert_eq!(ctx.require_signed_in(), Err(AccessError::Unauthorized));
        assert_eq!(
            ctx.take_message().as_deref(),
            Some("You must be signed in to do that.")
        );
    }

    #[test]
    fn test_require_signed_in_with_user_has_no_side_effect() {
        let mut ctx = SessionContext::default();
        ctx.sign_in("admin");
        let before = ctx.clone();

        assert_eq!(ctx.require_signed_in(), Ok(()));
        assert_eq!(ctx, before);
    }

    #[test]
    fn test_require_signed_out() {
        let mut ctx = SessionContext::default();
        assert_eq!(ctx.require_signed_out(), Ok(()));
        assert_eq!(ctx.pending_message, None);

        ctx.sign_in("admin");
        assert_eq!(ctx.require_signed_out(), Err(AccessError::AlreadySignedIn));
        assert_eq!(ctx.take_message().as_deref(), Some("You are signed in already!"));
    }

    #[test]
    fn test_flash_is_consumed_once() {
        let mut ctx = SessionContext::default();
        ctx.flash("helpful message");
        assert_eq!(ctx.take_message().as_deref(), Some("helpful message"));
        assert_eq!(ctx.take_message(), None);
    }

    #[test]
    fn test_sign_out() {
        let mut ctx = SessionContext::default();
        ctx.sign_in("admin");
        assert_eq!(ctx.sign_out().as_deref(), Some("admin"));
        assert!(!ctx.is_signed_in());
    }

    #[test]
    fn test_session_context_serde() {
        let mut ctx = SessionContext::default();
        ctx.sign_in("admin");
        let json = serde_json::to_string(&ctx).unwrap();
        assert_eq!(json, r#"{"signed_in_as":"admin","pending_message":null}"#);
        let back: SessionContext = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ctx);
    }

    #[tokio::test]
    async fn test_authenticate() {
        let store = MemoryCredentialStore::new();
        store.register("admin", "secret").await.unwrap();

        assert!(authenticate(&store, "admin", "secret").await.unwrap());
        assert!(!authenticate(&store, "admin", "wrong").await.unwrap());
        assert!(!authenticate(&store, "nosuch", "secret").await.unwrap());
    }
}
