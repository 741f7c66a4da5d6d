//! Session tokens and their registry.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Opaque session token handed to the caller at login.
///
/// Callers pass the token into every service call; there is no process-wide
/// "current user". Tokens are unguessable UUIDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(Uuid);

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionToken {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

/// In-process registry mapping live tokens to usernames.
#[derive(Default)]
pub struct SessionManager {
    sessions: RwLock<HashMap<SessionToken, String>>,
}

impl SessionManager {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh token for a verified user.
    pub fn issue(&self, username: &str) -> SessionToken {
        let token = SessionToken(Uuid::new_v4());
        self.sessions.write().insert(token, username.to_owned());
        debug!(username, "session issued");
        token
    }

    /// Resolve a token to its username, if the session is live.
    #[must_use]
    pub fn current_user(&self, token: &SessionToken) -> Option<String> {
        self.sessions.read().get(token).cloned()
    }

    /// Drop a session. Idempotent; returns whether a session was live.
    pub fn revoke(&self, token: &SessionToken) -> bool {
        let removed = self.sessions.write().remove(token).is_some();
        if removed {
            debug!("session revoked");
        }
        removed
    }
}
