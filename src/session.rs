//! Session token store.

/// Single source of truth for "are we logged in, and with what token".
///
/// The portal issues a `JSESSIONID` on the signin page; every subsequent
/// request rides on it. No internal locking: [`PortalClient`] serializes all
/// access behind its own mutex.
///
/// [`PortalClient`]: crate::PortalClient
#[derive(Debug, Default)]
pub struct SessionStore {
    session_id: Option<String>,
    authenticated: bool,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a session token and mark the session authenticated.
    pub fn set(&mut self, session_id: impl Into<String>) {
        self.session_id = Some(session_id.into());
        self.authenticated = true;
    }

    /// Drop the token and mark unauthenticated. Idempotent.
    pub fn clear(&mut self) {
        self.session_id = None;
        self.authenticated = false;
    }

    pub fn is_active(&self) -> bool {
        self.authenticated
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }
}
