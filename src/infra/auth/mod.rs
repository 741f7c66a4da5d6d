//! Credential adapters.

pub mod argon2;

pub use self::argon2::Argon2AuthService;
