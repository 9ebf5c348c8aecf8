//! # chathub-auth
//!
//! Authentication for ChatHub: password hashing, token issuance and
//! validation, and the session lifecycle.
//!
//! ## Modules
//!
//! - `jwt` — JWT token creation and validation
//! - `password` — Argon2id password hashing
//! - `session` — Session lifecycle (register, login, refresh, logout)

pub mod jwt;
pub mod password;
pub mod session;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
pub use session::{SessionManager, SessionStore};
