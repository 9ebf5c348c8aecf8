//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One login session. A new row is created for every successful login;
/// the same user may hold any number of concurrent sessions.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// Unique session identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Current access token.
    pub token: String,
    /// Refresh token issued at login. Identifies the row on refresh.
    pub refresh_token: String,
    /// Access token expiry.
    pub token_expired: DateTime<Utc>,
    /// Refresh token expiry. Always at or beyond `token_expired`.
    pub refresh_token_expired: DateTime<Utc>,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Whether the access token has expired.
    pub fn is_token_expired(&self) -> bool {
        Utc::now() >= self.token_expired
    }

    /// Whether the refresh token has expired.
    pub fn is_refresh_expired(&self) -> bool {
        Utc::now() >= self.refresh_token_expired
    }
}

/// Data required to create a new session row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSession {
    /// Owning user.
    pub user_id: Uuid,
    /// Access token.
    pub token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Access token expiry.
    pub token_expired: DateTime<Utc>,
    /// Refresh token expiry.
    pub refresh_token_expired: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session(token_exp: DateTime<Utc>, refresh_exp: DateTime<Utc>) -> Session {
        Session {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            token: "t".to_string(),
            refresh_token: "r".to_string(),
            token_expired: token_exp,
            refresh_token_expired: refresh_exp,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn live_session_is_not_expired() {
        let s = session(
            Utc::now() + Duration::hours(3),
            Utc::now() + Duration::hours(72),
        );
        assert!(!s.is_token_expired());
        assert!(!s.is_refresh_expired());
    }

    #[test]
    fn stale_access_token_reports_expired() {
        let s = session(
            Utc::now() - Duration::minutes(1),
            Utc::now() + Duration::hours(69),
        );
        assert!(s.is_token_expired());
        assert!(!s.is_refresh_expired());
    }
}
