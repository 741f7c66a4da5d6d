//! Account store and the credential capability it delegates to.

use std::sync::Arc;

use tracing::{info, warn};

use crate::core::model::{Account, CredentialHandle};
use crate::core::store::{RecordStore, StoreError};
use crate::core::BookingError;

/// Credential capability consumed by the engine.
///
/// The engine never stores or compares raw secrets; it hands them to this
/// capability and keeps only the opaque handle. The shipped implementation is
/// [`crate::infra::Argon2AuthService`]; tests may install a plain fake.
pub trait AuthService: Send + Sync {
    /// Derive an opaque handle from a raw secret.
    ///
    /// # Errors
    /// Adapter-specific failure (e.g. salt generation).
    fn hash(&self, secret: &str) -> anyhow::Result<CredentialHandle>;

    /// Check a presented secret against a stored handle.
    fn verify(&self, handle: &CredentialHandle, secret: &str) -> bool;
}

/// User identity records, keyed by unique username.
pub struct AccountStore {
    store: Arc<dyn RecordStore<Account>>,
    auth: Arc<dyn AuthService>,
}

impl AccountStore {
    /// Build an account store over a record store and a credential capability.
    pub fn new(store: Arc<dyn RecordStore<Account>>, auth: Arc<dyn AuthService>) -> Self {
        Self { store, auth }
    }

    /// Create and persist a new account.
    ///
    /// The username check and the insert are one atomic step in the store, so
    /// two racing registrations of the same username admit exactly one.
    /// Matching is case-sensitive and exact.
    ///
    /// # Errors
    /// `BookingError::DuplicateUsername` when the username is taken;
    /// `BookingError::Store` on backend failure.
    pub fn create(
        &self,
        fullname: &str,
        username: &str,
        email: &str,
        phone: &str,
        credential: CredentialHandle,
    ) -> Result<Account, BookingError> {
        let account = Account {
            username: username.to_owned(),
            fullname: fullname.to_owned(),
            email: email.to_owned(),
            phone: phone.to_owned(),
            credential,
        };
        match self.store.insert_if_absent(account.clone()) {
            Ok(()) => {
                info!(username, "account created");
                Ok(account)
            }
            Err(StoreError::Occupied) => {
                warn!(username, "registration rejected: username exists");
                Err(BookingError::DuplicateUsername(username.to_owned()))
            }
            Err(e) => Err(BookingError::Store(e.to_string())),
        }
    }

    /// Look up an account by username.
    ///
    /// # Errors
    /// `BookingError::Store` on backend failure.
    pub fn find(&self, username: &str) -> Result<Option<Account>, BookingError> {
        self.store
            .get(&username.to_owned())
            .map_err(|e| BookingError::Store(e.to_string()))
    }

    /// Verify a presented secret and return the account on success.
    ///
    /// Unknown usernames and wrong secrets are indistinguishable to the
    /// caller; both come back as `InvalidCredentials`.
    ///
    /// # Errors
    /// `BookingError::InvalidCredentials` on mismatch or unknown user;
    /// `BookingError::Store` on backend failure.
    pub fn verify(&self, username: &str, presented: &str) -> Result<Account, BookingError> {
        let Some(account) = self.find(username)? else {
            warn!(username, "login rejected: unknown username");
            return Err(BookingError::InvalidCredentials);
        };
        if self.auth.verify(&account.credential, presented) {
            Ok(account)
        } else {
            warn!(username, "login rejected: credential mismatch");
            Err(BookingError::InvalidCredentials)
        }
    }
}
