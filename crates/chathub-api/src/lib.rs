//! # chathub-api
//!
//! HTTP and WebSocket API surface for ChatHub: the Axum router, request
//! and response DTOs, extractors, and handlers. Business logic lives in
//! the lower crates; handlers stay thin.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
