//! Application Configuration
//!
//! Configuration for the Auth client.

use std::env;
use std::time::Duration;

use kernel::error::app_error::{AppError, AppResult};

use crate::domain::entity::lockout::{LockoutPolicy, MAX_LOCK_MINUTES};

/// Default backend base URL for local development
pub const DEVELOPMENT_API_BASE_URL: &str = "http://localhost:5000/api";

/// Auth client configuration
#[derive(Debug, Clone)]
pub struct AuthClientConfig {
    /// Backend base URL, without trailing slash (e.g. `https://host/api`)
    pub api_base_url: String,
    /// Per-request timeout (15 seconds)
    pub request_timeout: Duration,
    /// Site key of the reCAPTCHA widget, if the deployment uses one
    pub recaptcha_site_key: Option<String>,
    /// Sign-in lockout thresholds
    pub lockout: LockoutPolicy,
    /// Countdown refresh period while locked (1 second)
    pub countdown_tick: Duration,
}

impl AuthClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(15),
            recaptcha_site_key: None,
            lockout: LockoutPolicy::default(),
            countdown_tick: Duration::from_secs(1),
        }
    }

    /// Create config for development (local backend)
    pub fn development() -> Self {
        Self::new(DEVELOPMENT_API_BASE_URL)
    }

    /// Load from environment variables
    ///
    /// | Variable | Required | Meaning |
    /// |---|---|---|
    /// | `AUTH_API_BASE_URL` | yes | backend base URL |
    /// | `AUTH_API_TIMEOUT_SECS` | no | request timeout in seconds |
    /// | `RECAPTCHA_SITE_KEY` | no | reCAPTCHA site key |
    /// | `AUTH_LOCKOUT_THRESHOLD` | no | failures before locking |
    /// | `AUTH_LOCKOUT_MINUTES` | no | lock duration in minutes |
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("AUTH_API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                AppError::bad_request("AUTH_API_BASE_URL is not set")
                    .with_action("Set AUTH_API_BASE_URL, e.g. http://localhost:5000/api")
            })?;

        let mut config = Self::new(base_url.trim());

        if let Some(secs) = parse_var::<u64>(&lookup, "AUTH_API_TIMEOUT_SECS")? {
            config.request_timeout = Duration::from_secs(secs);
        }
        config.recaptcha_site_key = lookup("RECAPTCHA_SITE_KEY").filter(|v| !v.is_empty());
        if let Some(threshold) = parse_var::<u32>(&lookup, "AUTH_LOCKOUT_THRESHOLD")? {
            if threshold == 0 {
                return Err(AppError::bad_request(
                    "AUTH_LOCKOUT_THRESHOLD must be at least 1",
                ));
            }
            config.lockout.threshold = threshold;
        }
        if let Some(minutes) = parse_var::<i64>(&lookup, "AUTH_LOCKOUT_MINUTES")? {
            config.lockout.lock_duration = (1..=MAX_LOCK_MINUTES)
                .contains(&minutes)
                .then(|| chrono::Duration::try_minutes(minutes))
                .flatten()
                .ok_or_else(|| {
                    AppError::bad_request(format!(
                        "AUTH_LOCKOUT_MINUTES must be between 1 and {MAX_LOCK_MINUTES}"
                    ))
                })?;
        }

        Ok(config)
    }

    /// Full URL of a backend endpoint
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> AppResult<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|e| {
            AppError::bad_request(format!("Invalid {key}: {e}"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_development_defaults() {
        let config = AuthClientConfig::development();
        assert_eq!(config.api_base_url, "http://localhost:5000/api");
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.countdown_tick, Duration::from_secs(1));
        assert_eq!(config.lockout, LockoutPolicy::default());
    }

    #[test]
    fn test_from_lookup_requires_base_url() {
        let err = AuthClientConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.message().contains("AUTH_API_BASE_URL"));
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = AuthClientConfig::from_lookup(lookup(&[
            ("AUTH_API_BASE_URL", "https://auth.example.com/api/"),
            ("AUTH_API_TIMEOUT_SECS", "5"),
            ("RECAPTCHA_SITE_KEY", "site-key"),
            ("AUTH_LOCKOUT_THRESHOLD", "3"),
            ("AUTH_LOCKOUT_MINUTES", "30"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url, "https://auth.example.com/api");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.recaptcha_site_key.as_deref(), Some("site-key"));
        assert_eq!(config.lockout.threshold, 3);
        assert_eq!(config.lockout.lock_duration, chrono::Duration::minutes(30));
    }

    #[test]
    fn test_from_lookup_rejects_malformed_numbers() {
        let err = AuthClientConfig::from_lookup(lookup(&[
            ("AUTH_API_BASE_URL", "http://x"),
            ("AUTH_LOCKOUT_THRESHOLD", "five"),
        ]))
        .unwrap_err();
        assert!(err.message().starts_with("Invalid AUTH_LOCKOUT_THRESHOLD"));

        let err = AuthClientConfig::from_lookup(lookup(&[
            ("AUTH_API_BASE_URL", "http://x"),
            ("AUTH_LOCKOUT_MINUTES", "0"),
        ]))
        .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_from_lookup_bounds_lock_minutes() {
        for minutes in ["9223372036854775807", "1000000000000", "10081", "-5"] {
            let err = AuthClientConfig::from_lookup(lookup(&[
                ("AUTH_API_BASE_URL", "http://x"),
                ("AUTH_LOCKOUT_MINUTES", minutes),
            ]))
            .unwrap_err();
            assert_eq!(err.message(), "AUTH_LOCKOUT_MINUTES must be between 1 and 10080");
        }

        let config = AuthClientConfig::from_lookup(lookup(&[
            ("AUTH_API_BASE_URL", "http://x"),
            ("AUTH_LOCKOUT_MINUTES", "10080"),
        ]))
        .unwrap();
        assert_eq!(config.lockout.lock_duration, chrono::Duration::weeks(1));
    }

    #[test]
    fn test_endpoint_joins_paths() {
        let config = AuthClientConfig::new("http://localhost:5000/api/");
        assert_eq!(config.endpoint("/auth/login"), "http://localhost:5000/api/auth/login");
        assert_eq!(config.endpoint("auth/signup"), "http://localhost:5000/api/auth/signup");
    }
}
