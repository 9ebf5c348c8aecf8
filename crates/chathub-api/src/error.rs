//! Maps domain `AppError` to HTTP responses.
//!
//! The `IntoResponse` impl for `AppError` lives in `chathub-core` (next to
//! the type, as required by the orphan rule); this module re-exports the
//! response body type for API consumers.

pub use chathub_core::error::ApiErrorResponse;
