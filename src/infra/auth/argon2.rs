//! Argon2 credential adapter.

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use tracing::error;

use crate::core::accounts::AuthService;
use crate::core::model::CredentialHandle;

/// `AuthService` backed by Argon2 password hashing with per-credential salts.
///
/// Handles are PHC strings, so parameters and salt travel inside the handle
/// and verification needs no extra state.
#[derive(Debug, Clone, Default)]
pub struct Argon2AuthService;

impl AuthService for Argon2AuthService {
    fn hash(&self, secret: &str) -> anyhow::Result<CredentialHandle> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| {
                error!(error = %e, "argon2 hash failure");
                anyhow::anyhow!(e.to_string())
            })?
            .to_string();
        Ok(CredentialHandle::new(hash))
    }

    fn verify(&self, handle: &CredentialHandle, secret: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(handle.expose()) else {
            error!("malformed credential handle");
            return false;
        };
        Argon2::default()
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok()
    }
}
