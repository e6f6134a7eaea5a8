//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use chrono::Duration;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordPolicyError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// A form field failed validation
    #[error("{}", .0.message())]
    Validation(AppError),

    /// New password does not meet the requirements
    #[error("{0}")]
    PasswordPolicy(#[from] PasswordPolicyError),

    /// Confirmation password differs from the new password
    #[error("Passwords don't match")]
    PasswordMismatch,

    /// Too many consecutive sign-in failures
    #[error("Account locked. Try again in {} minutes.", ceil_minutes(.remaining))]
    AccountLocked { remaining: Duration },

    /// The backend refused the request
    #[error("{message}")]
    Rejected { kind: ErrorKind, message: String },

    /// The backend could not be reached or answered garbage
    #[error("{}", .0.message())]
    Transport(AppError),

    /// Email verification was opened without a pending sign-up
    #[error("Your verification link is invalid or expired. Please start the signup process again.")]
    VerificationExpired,

    /// A reset step was opened without a pending reset request
    #[error("Your password reset request is invalid or expired. Please try again.")]
    ResetRequestExpired,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Whole minutes, rounded up
fn ceil_minutes(remaining: &Duration) -> i64 {
    let millis = remaining.num_milliseconds().max(0);
    (millis + 59_999) / 60_000
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(err) | AuthError::Transport(err) => err.kind(),
            AuthError::PasswordPolicy(_) | AuthError::PasswordMismatch => ErrorKind::BadRequest,
            AuthError::AccountLocked { .. } => ErrorKind::Locked,
            AuthError::Rejected { kind, .. } => *kind,
            AuthError::VerificationExpired | AuthError::ResetRequestExpired => ErrorKind::Gone,
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.user_message());
        match self {
            AuthError::Validation(inner) => match inner.action() {
                Some(action) => err.with_action(action.to_string()),
                None => err,
            },
            AuthError::VerificationExpired => err.with_action("Sign up again"),
            AuthError::ResetRequestExpired => err.with_action("Request a new reset code"),
            _ => err,
        }
    }

    /// Text shown to the user as an error notice
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Internal(_) => "Something went wrong. Please try again.".to_string(),
            _ => self.to_string(),
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::Transport(err) => {
                tracing::error!(error = %err, "Auth backend unreachable");
            }
            AuthError::Rejected { kind, message } => {
                tracing::warn!(status = kind.status_code(), message = %message, "Auth request rejected");
            }
            AuthError::AccountLocked { remaining } => {
                tracing::warn!(remaining_secs = remaining.num_seconds(), "Submission while locked");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.kind() == ErrorKind::BadRequest {
            AuthError::Validation(err)
        } else {
            AuthError::Transport(err)
        }
    }
}
