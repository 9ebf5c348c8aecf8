//! # chathub-entity
//!
//! Domain entity models for ChatHub. Every struct in this crate represents
//! a database table row or a domain value object. All entities derive
//! `Debug`, `Clone`, `Serialize`, `Deserialize`, and database entities
//! additionally derive `sqlx::FromRow`.

pub mod message;
pub mod session;
pub mod user;

pub use message::ChatMessage;
pub use session::{CreateSession, Session};
pub use user::{CreateUser, User};
