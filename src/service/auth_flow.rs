//! Registration, login, and logout.

use std::sync::Arc;

use tracing::{info, warn};

use crate::core::accounts::{AccountStore, AuthService};
use crate::core::model::Account;
use crate::core::BookingError;
use crate::service::session::{SessionManager, SessionToken};

/// A registration request as submitted at the boundary.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Full display name.
    pub fullname: String,
    /// Desired username.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Raw password; hashed before anything is stored.
    pub password: String,
    /// Confirmation of the raw password.
    pub confirm_password: String,
}

/// Account lifecycle operations: register, login, logout.
pub struct AuthFlow {
    accounts: Arc<AccountStore>,
    sessions: Arc<SessionManager>,
    auth: Arc<dyn AuthService>,
}

impl AuthFlow {
    /// Wire the flow over its collaborators.
    pub fn new(
        accounts: Arc<AccountStore>,
        sessions: Arc<SessionManager>,
        auth: Arc<dyn AuthService>,
    ) -> Self {
        Self {
            accounts,
            sessions,
            auth,
        }
    }

    /// Register a new account.
    ///
    /// The password is checked against its confirmation, hashed through the
    /// installed `AuthService`, and only the resulting handle is persisted.
    ///
    /// # Errors
    /// `PasswordMismatch` when confirmation differs; `DuplicateUsername` when
    /// the name is taken; `Store` on backend failure.
    pub fn register(&self, req: &Registration) -> Result<Account, BookingError> {
        if req.password != req.confirm_password {
            warn!(username = %req.username, "registration rejected: password mismatch");
            return Err(BookingError::PasswordMismatch);
        }
        let credential = self
            .auth
            .hash(&req.password)
            .map_err(|e| BookingError::Store(e.to_string()))?;
        self.accounts.create(
            &req.fullname,
            &req.username,
            &req.email,
            &req.phone,
            credential,
        )
    }

    /// Verify credentials and open a session.
    ///
    /// # Errors
    /// `InvalidCredentials` on unknown username or wrong password (the two
    /// are indistinguishable); `Store` on backend failure.
    pub fn login(&self, username: &str, password: &str) -> Result<SessionToken, BookingError> {
        let account = self.accounts.verify(username, password)?;
        let token = self.sessions.issue(&account.username);
        info!(username, "login succeeded");
        Ok(token)
    }

    /// Close a session. Idempotent.
    pub fn logout(&self, token: &SessionToken) {
        self.sessions.revoke(token);
    }

    /// Resolve the user behind a token, if the session is live.
    #[must_use]
    pub fn current_user(&self, token: &SessionToken) -> Option<String> {
        self.sessions.current_user(token)
    }
}
