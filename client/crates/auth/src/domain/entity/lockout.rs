//! Lockout Entity
//!
//! Consecutive sign-in failure tracking for one login form session.
//!
//! ## Lifecycle
//! - Starts at zero failures, unlocked
//! - Each failed submission increments the count
//! - Reaching the policy threshold locks the form for the policy duration
//! - Success, or the lock lapsing, resets the count to zero
//!
//! Locking is level-triggered: failures recorded while already locked do
//! not extend the lock.
//!
//! ## Limitations
//! This throttle is advisory. It lives in the client, is not persisted,
//! and any client that talks to the backend directly bypasses it. Real
//! protection requires rate limiting on the authentication backend.

use chrono::{DateTime, Duration, Utc};

/// Failures that engage the lock
pub const DEFAULT_THRESHOLD: u32 = 5;

/// How long the lock lasts, in minutes
pub const DEFAULT_LOCK_MINUTES: i64 = 15;

/// Longest configurable lock, one week
pub const MAX_LOCK_MINUTES: i64 = 7 * 24 * 60;

/// Lockout thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockoutPolicy {
    /// Consecutive failures that engage the lock
    pub threshold: u32,
    /// Lock duration, measured from the failure that reached the threshold
    pub lock_duration: Duration,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            lock_duration: Duration::minutes(DEFAULT_LOCK_MINUTES),
        }
    }
}

/// Lockout state of one login form session
///
/// ## Invariant
/// `locked_until` is `Some` only while `failed_attempts >= threshold`;
/// once the instant passes, [`LockoutState::expire`] clears both fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockoutState {
    failed_attempts: u32,
    locked_until: Option<DateTime<Utc>>,
}

impl LockoutState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consecutive failures since the last success or reset
    #[inline]
    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    /// Instant after which the lock clears, while locked
    #[inline]
    pub fn locked_until(&self) -> Option<DateTime<Utc>> {
        self.locked_until
    }

    /// Record a failed submission
    ///
    /// A lapsed lock is cleared first, so the failure starts a new count.
    /// Engages the lock when the count reaches the threshold and no lock is
    /// active; an active lock is left untouched.
    pub fn record_failure(&mut self, policy: &LockoutPolicy, now: DateTime<Utc>) {
        self.expire(now);

        self.failed_attempts = self.failed_attempts.saturating_add(1);

        if self.failed_attempts >= policy.threshold && self.locked_until.is_none() {
            let until = now
                .checked_add_signed(policy.lock_duration)
                .unwrap_or(DateTime::<Utc>::MAX_UTC);
            self.locked_until = Some(until);
            tracing::warn!(
                failed_attempts = self.failed_attempts,
                locked_until = %until,
                "Sign-in locked after repeated failures"
            );
        }
    }

    /// Record a successful submission
    pub fn record_success(&mut self) {
        self.failed_attempts = 0;
        self.locked_until = None;
    }

    /// Whether submissions must be rejected at `now`
    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        self.locked_until.is_some_and(|until| now < until)
    }

    /// Time left on the lock, zero when not locked
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        match self.locked_until {
            Some(until) if now < until => until - now,
            _ => Duration::zero(),
        }
    }

    /// Reset to zero if the lock has lapsed
    ///
    /// Returns `true` when a lapsed lock was cleared.
    pub fn expire(&mut self, now: DateTime<Utc>) -> bool {
        match self.locked_until {
            Some(until) if now >= until => {
                self.failed_attempts = 0;
                self.locked_until = None;
                tracing::debug!("Sign-in lock lapsed");
                true
            }
            _ => false,
        }
    }

    /// Failures left before the lock engages
    pub fn attempts_remaining(&self, policy: &LockoutPolicy) -> u32 {
        policy.threshold.saturating_sub(self.failed_attempts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap()
    }

    fn failed(times: u32, policy: &LockoutPolicy, now: DateTime<Utc>) -> LockoutState {
        let mut state = LockoutState::new();
        for _ in 0..times {
            state.record_failure(policy, now);
        }
        state
    }

    #[test]
    fn test_fresh_state_is_unlocked() {
        let state = LockoutState::new();
        assert_eq!(state.failed_attempts(), 0);
        assert!(state.locked_until().is_none());
        assert!(!state.is_locked(t0()));
        assert_eq!(state.remaining(t0()), Duration::zero());
    }

    #[test]
    fn test_below_threshold_never_locks() {
        let policy = LockoutPolicy::default();
        for n in 0..DEFAULT_THRESHOLD {
            let state = failed(n, &policy, t0());
            assert!(!state.is_locked(t0()), "locked after {n} failures");
            assert!(state.locked_until().is_none());
        }
    }

    #[test]
    fn test_four_failures_unlocked_fifth_locks() {
        let policy = LockoutPolicy::default();
        let mut state = failed(4, &policy, t0());
        assert!(!state.is_locked(t0()));
        assert_eq!(state.attempts_remaining(&policy), 1);

        state.record_failure(&policy, t0());
        assert!(state.is_locked(t0()));
        assert_eq!(state.remaining(t0()), Duration::minutes(15));
        assert_eq!(state.attempts_remaining(&policy), 0);
    }

    #[test]
    fn test_failure_while_locked_does_not_extend() {
        let policy = LockoutPolicy::default();
        let mut state = failed(5, &policy, t0());
        let until = state.locked_until().unwrap();

        state.record_failure(&policy, t0() + Duration::minutes(5));
        assert_eq!(state.locked_until(), Some(until));
        assert_eq!(state.failed_attempts(), 6);
    }

    #[test]
    fn test_unlocks_exactly_at_deadline() {
        let policy = LockoutPolicy::default();
        let state = failed(5, &policy, t0());
        let until = state.locked_until().unwrap();

        assert!(state.is_locked(until - Duration::seconds(1)));
        assert_eq!(state.remaining(until - Duration::seconds(1)), Duration::seconds(1));
        assert!(!state.is_locked(until));
        assert_eq!(state.remaining(until), Duration::zero());
        assert_eq!(state.remaining(until + Duration::hours(1)), Duration::zero());
    }

    #[test]
    fn test_success_resets_from_any_state() {
        let policy = LockoutPolicy::default();
        for n in [0, 3, 5, 9] {
            let mut state = failed(n, &policy, t0());
            state.record_success();
            assert_eq!(state.failed_attempts(), 0);
            assert!(!state.is_locked(t0()));
            assert!(state.locked_until().is_none());
        }
    }

    #[test]
    fn test_expire_resets_only_after_deadline() {
        let policy = LockoutPolicy::default();
        let mut state = failed(5, &policy, t0());
        let until = state.locked_until().unwrap();

        assert!(!state.expire(until - Duration::seconds(1)));
        assert_eq!(state.failed_attempts(), 5);

        assert!(state.expire(until));
        assert_eq!(state, LockoutState::new());
    }

    #[test]
    fn test_failure_after_lapse_starts_new_count() {
        let policy = LockoutPolicy::default();
        let mut state = failed(5, &policy, t0());
        let later = t0() + Duration::minutes(16);

        state.record_failure(&policy, later);
        assert_eq!(state.failed_attempts(), 1);
        assert!(!state.is_locked(later));
    }

    #[test]
    fn test_oversized_lock_saturates() {
        let policy = LockoutPolicy {
            threshold: 1,
            lock_duration: Duration::MAX,
        };
        let state = failed(1, &policy, t0());
        assert_eq!(state.locked_until(), Some(DateTime::<Utc>::MAX_UTC));
        assert!(state.is_locked(t0()));
        assert!(state.remaining(t0()) > Duration::days(365));
    }

    #[test]
    fn test_custom_policy() {
        let policy = LockoutPolicy {
            threshold: 2,
            lock_duration: Duration::seconds(30),
        };
        let state = failed(2, &policy, t0());
        assert!(state.is_locked(t0()));
        assert_eq!(state.remaining(t0()), Duration::seconds(30));
    }
}
