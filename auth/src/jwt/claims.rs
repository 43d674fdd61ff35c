use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Lifetime of every issued token, in seconds.
pub const TOKEN_TTL_SECONDS: i64 = 60 * 60;

/// Payload carried inside a signed session token.
///
/// `user_id` and `username` are a snapshot of the user taken at issuance;
/// they are not refreshed if the stored user changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub user_id: String,

    pub username: String,

    /// Expiration time (Unix timestamp, seconds)
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl Claims {
    /// Create claims for a user, expiring one hour after `now`.
    ///
    /// `exp` has whole-second resolution, so a fractional `now` is rounded up
    /// first. The token then lives for at least the full hour.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `username` - Username at issuance time
    /// * `now` - Issuance instant
    pub fn for_user(
        user_id: impl ToString,
        username: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.to_string(),
            username: username.into(),
            expires_at: issued_at_ceil(now) + TOKEN_TTL_SECONDS,
        }
    }

    /// Check whether the claims have lapsed at `now`.
    ///
    /// Claims are live strictly before `expires_at`; the expiry second itself
    /// already counts as expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.expires_at
    }
}

fn issued_at_ceil(now: DateTime<Utc>) -> i64 {
    now.timestamp() + i64::from(now.timestamp_subsec_nanos() > 0)
}
