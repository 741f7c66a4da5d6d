//! Infrastructure adapters for record stores and credentials.

pub mod auth;
pub mod store;

pub use auth::Argon2AuthService;
pub use store::{InMemoryStore, JsonFileStore};
