//! Convenience result alias used across all ChatHub crates.

use crate::error::AppError;

/// Application-wide result type.
pub type AppResult<T> = Result<T, AppError>;
