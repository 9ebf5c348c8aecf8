//! Session lifecycle manager — register, login, refresh, and logout flows.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use chathub_core::config::auth::AuthConfig;
use chathub_core::error::{AppError, ErrorKind};
use chathub_core::result::AppResult;
use chathub_database::repositories::UserRepository;
use chathub_entity::session::Session;
use chathub_entity::user::{CreateUser, User};

use crate::jwt::{JwtDecoder, JwtEncoder, TokenPair, TokenType};
use crate::password::PasswordHasher;

use super::store::SessionStore;

/// Login failures use one message for unknown usernames and wrong
/// passwords, so responses do not reveal which one was at fault.
const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Result of a successful login.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LoginResult {
    /// Generated token pair.
    pub tokens: TokenPair,
    /// Created session.
    pub session: Session,
    /// The authenticated user.
    pub user: User,
}

/// Result of a successful token refresh.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RefreshResult {
    /// Newly issued access token.
    pub access_token: String,
    /// Its expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
}

/// Manages the complete session lifecycle.
#[derive(Clone)]
pub struct SessionManager {
    /// JWT encoder for token generation.
    jwt_encoder: Arc<JwtEncoder>,
    /// JWT decoder for token validation.
    jwt_decoder: Arc<JwtDecoder>,
    /// Session persistence.
    session_store: Arc<SessionStore>,
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    password_hasher: Arc<PasswordHasher>,
    /// Auth configuration.
    auth_config: AuthConfig,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("auth_config", &self.auth_config)
            .finish()
    }
}

impl SessionManager {
    /// Creates a new session manager with all required dependencies.
    pub fn new(
        jwt_encoder: Arc<JwtEncoder>,
        jwt_decoder: Arc<JwtDecoder>,
        session_store: Arc<SessionStore>,
        user_repo: Arc<UserRepository>,
        password_hasher: Arc<PasswordHasher>,
        auth_config: AuthConfig,
    ) -> Self {
        Self {
            jwt_encoder,
            jwt_decoder,
            session_store,
            user_repo,
            password_hasher,
            auth_config,
        }
    }

    /// Registers a new user.
    ///
    /// Hashes the password and inserts the user row. Duplicate usernames
    /// surface as `Conflict` from the repository.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        full_name: &str,
    ) -> AppResult<User> {
        if password.len() < self.auth_config.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.auth_config.password_min_length
            )));
        }

        let password_hash = self.password_hasher.hash_password(password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                username: username.to_string(),
                password_hash,
                full_name: full_name.to_string(),
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Performs the complete login flow:
    ///
    /// 1. Look up the user by username
    /// 2. Verify the password against the stored hash
    /// 3. Issue an access + refresh token pair
    /// 4. Persist a new session row
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginResult> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::authentication(INVALID_CREDENTIALS))?;

        let password_valid = self
            .password_hasher
            .verify_password(password, &user.password_hash)?;

        if !password_valid {
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        let tokens = self.jwt_encoder.issue_pair(&user.username, &user.full_name)?;
        let session = self.session_store.create_for_login(user.id, &tokens).await?;

        info!(
            user_id = %user.id,
            session_id = %session.id,
            "Login successful"
        );

        Ok(LoginResult {
            tokens,
            session,
            user,
        })
    }

    /// Refreshes an access token using a valid refresh token.
    ///
    /// The refresh token is validated, a new access token is minted for the
    /// same claims, and the session row matching the refresh token is
    /// updated in place. An unknown refresh token is an authentication
    /// failure, never a server error.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<RefreshResult> {
        let claims = self.jwt_decoder.decode_refresh_token(refresh_token)?;

        let (access_token, access_expires_at) =
            self.jwt_encoder
                .issue(&claims.username, &claims.full_name, TokenType::Access)?;

        self.session_store
            .update_access_token(&access_token, refresh_token, access_expires_at)
            .await
            .map_err(|e| {
                if e.kind == ErrorKind::NotFound {
                    AppError::authentication("Session not found")
                } else {
                    e
                }
            })?;

        info!(username = %claims.username, "Access token refreshed");

        Ok(RefreshResult {
            access_token,
            access_expires_at,
        })
    }

    /// Logs out by deleting the session holding the presented access token.
    ///
    /// Idempotent: logging out an already-removed token succeeds.
    pub async fn logout(&self, token: &str) -> AppResult<()> {
        let removed = self.session_store.delete_by_token(token).await?;
        info!(removed_sessions = removed, "Logout processed");
        Ok(())
    }
}
