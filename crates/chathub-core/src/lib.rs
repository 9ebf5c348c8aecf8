//! # chathub-core
//!
//! Core crate for ChatHub. Contains configuration schemas, cross-crate
//! traits, and the unified error system.
//!
//! This crate has **no** internal dependencies on other ChatHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
