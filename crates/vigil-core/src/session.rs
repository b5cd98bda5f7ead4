// ── Session state machine ──
//
// Anonymous → Authenticating → Authenticated → Anonymous, observable
// through a `watch` channel. The `Monitor` drives the transitions and
// couples them to the poll scheduler; this module only owns the state.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use vigil_api::types::Role;

/// The authenticated identity currently driving all backend calls.
///
/// The credential token itself lives inside the `ApiClient`; the
/// session carries the display-facing identity.
#[derive(Debug, Clone)]
pub struct Session {
    pub identity: String,
    pub full_name: Option<String>,
    pub role: Role,
}

impl Session {
    /// Name suitable for display: the full name when the backend
    /// provided one, otherwise the login identity.
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.identity)
    }
}

/// Session lifecycle state, observable by consumers.
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated(Arc<Session>),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The live session, if any. Pure read, no side effects.
    pub fn session(&self) -> Option<&Arc<Session>> {
        match self {
            Self::Authenticated(s) => Some(s),
            _ => None,
        }
    }
}

/// Owner of the session state. Exactly one live session at a time.
pub(crate) struct SessionManager {
    state: watch::Sender<SessionState>,
}

impl SessionManager {
    pub(crate) fn new() -> Self {
        let (state, _) = watch::channel(SessionState::Anonymous);
        Self { state }
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Current state; pure read.
    pub(crate) fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub(crate) fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    // Transitions use `send_replace`: `send` drops the update when no
    // receiver exists, and subscribers here are created on demand.

    pub(crate) fn set_authenticating(&self) {
        debug!("session: authenticating");
        self.state.send_replace(SessionState::Authenticating);
    }

    /// Install a new live session. Replaces any previous one atomically.
    pub(crate) fn set_authenticated(&self, session: Session) {
        debug!(identity = %session.identity, "session: authenticated");
        self.state
            .send_replace(SessionState::Authenticated(Arc::new(session)));
    }

    pub(crate) fn set_anonymous(&self) {
        debug!("session: anonymous");
        self.state.send_replace(SessionState::Anonymous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            identity: "t.stark".into(),
            full_name: Some("Tony Stark".into()),
            role: Role::Admin,
        }
    }

    #[test]
    fn starts_anonymous() {
        let mgr = SessionManager::new();
        assert!(!mgr.is_authenticated());
        assert!(mgr.current().session().is_none());
    }

    #[test]
    fn full_lifecycle() {
        let mgr = SessionManager::new();

        mgr.set_authenticating();
        assert!(!mgr.is_authenticated());

        mgr.set_authenticated(session());
        let state = mgr.current();
        assert!(state.is_authenticated());
        assert_eq!(state.session().map(|s| s.display_name()), Some("Tony Stark"));

        mgr.set_anonymous();
        assert!(!mgr.is_authenticated());
    }

    #[test]
    fn transitions_apply_without_subscribers() {
        // `subscribe` is never called; `current()` must still observe
        // every transition.
        let mgr = SessionManager::new();
        mgr.set_authenticated(session());
        assert!(mgr.current().is_authenticated());

        mgr.set_anonymous();
        assert!(!mgr.current().is_authenticated());
    }

    #[test]
    fn display_name_falls_back_to_identity() {
        let s = Session {
            full_name: None,
            ..session()
        };
        assert_eq!(s.display_name(), "t.stark");
    }
}
