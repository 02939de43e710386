use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claim set carried by an issued access token.
///
/// `exp` is always `iat + ttl`; receivers are expected to check it
/// together with the signature, since issued tokens are never tracked
/// server-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Identifier of the authenticated user
    pub uid: i64,

    /// Email the user authenticated with
    pub email: String,

    /// Application the token was issued for
    pub app_id: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    /// Build claims for a freshly authenticated user.
    ///
    /// # Arguments
    /// * `uid` - User identifier
    /// * `email` - Authenticated email address
    /// * `app_id` - Application the token is scoped to
    /// * `ttl` - Time until the token expires
    pub fn new(uid: i64, email: impl Into<String>, app_id: i64, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            uid,
            email: email.into(),
            app_id,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Check whether the token is expired at the given timestamp.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
