//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use chathub_core::error::AppError;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username.
    #[validate(length(min = 3, max = 100, message = "Username must be 3-100 characters"))]
    pub username: String,
    /// Password. Minimum length is enforced by the session manager.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Full name.
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Run validator rules and fold failures into a single validation error.
pub fn validate_request<T: Validate>(req: &T) -> Result<(), AppError> {
    req.validate()
        .map_err(|e| AppError::validation(format!("Invalid request: {e}")))
}
