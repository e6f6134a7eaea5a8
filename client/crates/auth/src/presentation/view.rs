//! View Text
//!
//! Pure helpers producing the text the forms display.

use std::time::Duration;

use platform::password_strength::PasswordAssessment;

use crate::domain::entity::lockout::LockoutPolicy;

/// `m:ss`, with seconds rounded up
pub fn format_lock_time(remaining: Duration) -> String {
    let mut secs = remaining.as_secs();
    if remaining.subsec_nanos() > 0 {
        secs += 1;
    }
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Banner shown while the form is locked
pub fn lock_banner(remaining: Duration) -> String {
    format!(
        "Too many failed attempts. Account locked for {} minutes.",
        format_lock_time(remaining)
    )
}

/// Warning shown after a failure, before the lock engages
///
/// `None` with no failures, or once the threshold is reached.
pub fn attempts_banner(failed_attempts: u32, policy: &LockoutPolicy) -> Option<String> {
    if failed_attempts == 0 || failed_attempts >= policy.threshold {
        return None;
    }
    let left = policy.threshold - failed_attempts;
    let noun = if left == 1 { "attempt" } else { "attempts" };
    Some(format!("{left} {noun} remaining before account is locked."))
}

/// Heading of the strength meter
pub fn strength_label(assessment: &PasswordAssessment) -> String {
    format!("Strength: {}", assessment.strength())
}
