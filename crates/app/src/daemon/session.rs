//! Cookie-keyed session state
//!
//! The cookie only carries an opaque id; the [`SessionContext`] itself stays
//! in process. Sessions do not survive a restart, which just signs everyone
//! out.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::async_trait;
use axum::extract::FromRequestParts;
use http::request::Parts;
use http::StatusCode;
use parking_lot::{Mutex, RwLock};
use tower_cookies::cookie::SameSite;
use tower_cookies::{Cookie, Cookies};
use uuid::Uuid;

use common::prelude::{AccessError, SessionContext};

use super::ServiceState;

pub const SESSION_COOKIE: &str = "folio_session";

/// Sessions untouched for this long are dropped
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug)]
struct Entry {
    context: SessionContext,
    last_seen: Instant,
}

/// In-process session table.
///
/// Only contexts that hold something (a user or a pending message) are
///  stored, so requests that never write to their session cost nothing.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Entry>>>,
    idle_timeout: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_TIMEOUT)
    }
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            idle_timeout,
        }
    }

    /// `id` if it names a live session. Refreshes its idle clock.
    pub fn touch(&self, id: Option<Uuid>) -> Option<Uuid> {
        let id = id?;
        let now = Instant::now();
        let mut inner = self.inner.write();
        let entry = inner.get_mut(&id)?;
        if now.duration_since(entry.last_seen) >= self.idle_timeout {
            inner.remove(&id);
            tracing::debug!(session = %id, "session expired");
            return None;
        }
        entry.last_seen = now;
        Some(id)
    }

    pub fn get(&self, id: &Uuid) -> Option<SessionContext> {
        self.inner.read().get(id).map(|entry| entry.context.clone())
    }

    /// Apply `f` to the context stored under `id`, or to a blank one.
    ///
    /// Returns the id the result is stored under. A context left blank is
    ///  removed, and a non-blank one without a live id gets a fresh id.
    pub fn update<R>(
        &self,
        id: Option<Uuid>,
        f: impl FnOnce(&mut SessionContext) -> R,
    ) -> (Option<Uuid>, R) {
        let mut inner = self.inner.write();
        let known = id.filter(|id| inner.contains_key(id));

        let mut context = known
            .and_then(|id| inner.get(&id))
            .map(|entry| entry.context.clone())
            .unwrap_or_default();
        let out = f(&mut context);

        if context == SessionContext::default() {
            if let Some(id) = known {
                inner.remove(&id);
            }
            return (None, out);
        }

        let now = Instant::now();
        let id = match known {
            Some(id) => id,
            None => {
                let timeout = self.idle_timeout;
                inner.retain(|_, entry| now.duration_since(entry.last_seen) < timeout);
                let id = Uuid::new_v4();
                tracing::debug!(session = %id, "session started");
                id
            }
        };
        inner.insert(
            id,
            Entry {
                context,
                last_seen: now,
            },
        );
        (Some(id), out)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What every rendered page needs from the session
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub message: Option<String>,
    pub signed_in_as: Option<String>,
}

/// Extractor handing a handler its session.
///
/// The cookie is only issued once the session first holds something.
pub struct Session {
    id: Mutex<Option<Uuid>>,
    cookies: Cookies,
    store: SessionStore,
}

impl Session {
    pub fn id(&self) -> Option<Uuid> {
        *self.id.lock()
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut SessionContext) -> R) -> R {
        let mut id = self.id.lock();
        let (stored, out) = self.store.update(*id, f);
        if let Some(new_id) = stored.filter(|stored| Some(*stored) != *id) {
            self.cookies.add(session_cookie(new_id));
        }
        *id = stored;
        out
    }

    pub fn flash(&self, message: impl Into<String>) {
        let message = message.into();
        self.update(|ctx| ctx.flash(message));
    }

    pub fn signed_in_as(&self) -> Option<String> {
        let id = self.id()?;
        self.store.get(&id)?.signed_in_as
    }

    /// Snapshot for a render. Consumes the flash message so that
    ///  it shows up on exactly one page.
    pub fn page(&self) -> PageContext {
        self.update(|ctx| PageContext {
            message: ctx.take_message(),
            signed_in_as: ctx.signed_in_as.clone(),
        })
    }

    pub fn require_signed_in(&self) -> Result<(), AccessError> {
        self.update(SessionContext::require_signed_in)
    }

    pub fn require_signed_out(&self) -> Result<(), AccessError> {
        self.update(SessionContext::require_signed_out)
    }
}

fn session_cookie(id: Uuid) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, id.to_string());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

#[async_trait]
impl FromRequestParts<ServiceState> for Session {
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServiceState,
    ) -> Result<Self, Self::Rejection> {
        let cookies = Cookies::from_request_parts(parts, state).await?;
        let presented = cookies
            .get(SESSION_COOKIE)
            .and_then(|cookie| Uuid::parse_str(cookie.value()).ok());

        let store = state.sessions().clone();
        let id = store.touch(presented);

        Ok(Self {
            id: Mutex::new(id),
            cookies,
            store,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_sessions_are_not_stored() {
        let store = SessionStore::default();
        let (id, message) = store.update(None, |ctx| ctx.take_message());
        assert_eq!(id, None);
        assert_eq!(message, None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_keeps_known_ids() {
        let store = SessionStore::default();
        let (id, _) = store.update(None, |ctx| ctx.sign_in("admin"));
        let id = id.unwrap();
        assert_eq!(store.touch(Some(id)), Some(id));

        let (again, _) = store.update(Some(id), |ctx| ctx.flash("hello"));
        assert_eq!(again, Some(id));
        assert_eq!(store.len(), 1);

        // unknown ids are not trusted
        let forged = Uuid::new_v4();
        assert_eq!(store.touch(Some(forged)), None);
        let (fresh, _) = store.update(Some(forged), |ctx| ctx.sign_in("eve"));
        assert_ne!(fresh, Some(forged));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_flash_is_consumed_once() {
        let store = SessionStore::default();
        let (id, _) = store.update(None, |ctx| ctx.flash("helpful message"));
        assert!(id.is_some());

        let (id, message) = store.update(id, |ctx| ctx.take_message());
        assert_eq!(message.as_deref(), Some("helpful message"));
        // nothing left to keep
        assert_eq!(id, None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_guards_flash_on_failure() {
        let store = SessionStore::default();
        let (id, result) = store.update(None, SessionContext::require_signed_in);
        assert_eq!(result, Err(AccessError::Unauthorized));
        assert_eq!(
            store.get(&id.unwrap()).unwrap().pending_message.as_deref(),
            Some("You must be signed in to do that.")
        );

        let (id, _) = store.update(id, |ctx| ctx.sign_in("admin"));
        let (_, result) = store.update(id, SessionContext::require_signed_out);
        assert_eq!(result, Err(AccessError::AlreadySignedIn));
    }

    #[test]
    fn test_idle_sessions_are_evicted() {
        let store = SessionStore::new(Duration::ZERO);
        let (first, _) = store.update(None, |ctx| ctx.sign_in("alice"));
        let (second, _) = store.update(None, |ctx| ctx.sign_in("bob"));

        assert_ne!(first, second);
        assert!(store.get(&first.unwrap()).is_none());
        assert_eq!(store.len(), 1);
        assert_eq!(store.touch(second), None);
        assert!(store.is_empty());
    }
}
