//! Auth Session Entity
//!
//! Tokens and profile held by the client after a successful sign-in.

use chrono::{DateTime, Duration, Utc};
use std::fmt;

use crate::domain::entity::user::UserProfile;

/// Authenticated client session
#[derive(Clone)]
pub struct AuthSession {
    /// Bearer token for API calls
    pub access_token: String,
    /// Token used to obtain a new access token
    pub refresh_token: String,
    /// When the access token stops being valid
    pub expires_at: DateTime<Utc>,
    /// Signed-in user
    pub user: UserProfile,
}

impl AuthSession {
    /// Create a session from a sign-in response
    ///
    /// `expires_in_secs` is relative to `now`; negative values are clamped
    /// to an already-expired session.
    pub fn new(
        access_token: String,
        refresh_token: String,
        expires_in_secs: i64,
        user: UserProfile,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_at: now + Duration::seconds(expires_in_secs.max(0)),
            user,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at - now).max(Duration::zero())
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .field("user", &self.user)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_role::UserRole;
    use chrono::TimeZone;

    fn profile() -> UserProfile {
        UserProfile {
            id: "u1".to_string(),
            full_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            username: "jane".to_string(),
            role: UserRole::User,
        }
    }

    #[test]
    fn test_session_expiry() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let session = AuthSession::new("a".into(), "r".into(), 900, profile(), now);

        assert_eq!(session.remaining(now), Duration::minutes(15));
        assert!(!session.is_expired(now + Duration::seconds(899)));
        assert!(session.is_expired(now + Duration::seconds(900)));
        assert_eq!(session.remaining(now + Duration::hours(1)), Duration::zero());
    }

    #[test]
    fn test_negative_lifetime_is_expired() {
        let now = Utc::now();
        let session = AuthSession::new("a".into(), "r".into(), -5, profile(), now);
        assert!(session.is_expired(now));
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let session = AuthSession::new(
            "secret-access".into(),
            "secret-refresh".into(),
            60,
            profile(),
            Utc::now(),
        );
        let debug = format!("{session:?}");
        assert!(!debug.contains("secret-access"));
        assert!(!debug.contains("secret-refresh"));
    }
}
