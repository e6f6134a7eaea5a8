//! Auth (Authentication) Client Module
//!
//! Clean Architecture structure:
//! - `domain/` - Lockout state, form value objects, gateway trait
//! - `application/` - Use cases and configuration
//! - `infra/` - HTTP gateway to the authentication backend
//! - `presentation/` - Wire DTOs, display text, login form controller
//!
//! ## Features
//! - Sign-in with email or user name, reCAPTCHA token and lockout
//! - Sign-up with live password strength feedback
//! - Email verification by one-time code
//! - Password reset by one-time code
//!
//! ## Security Model
//! - Passwords are zeroized on drop and never logged
//! - The sign-in lockout is advisory and client-side only; the backend
//!   must rate limit on its own

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthClientConfig;
pub use error::{AuthError, AuthResult};
pub use infra::http::HttpAuthGateway;
pub use presentation::login_form::{LockStatus, LoginForm};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod models {
    pub use crate::domain::entity::{
        auth_session::AuthSession,
        lockout::{LockoutPolicy, LockoutState},
        user::UserProfile,
    };
    pub use crate::domain::value_object::{
        email::Email, full_name::FullName, identifier::Identifier, otp_code::OtpCode,
        recaptcha_token::RecaptchaToken, user_name::UserName, user_role::UserRole,
    };
    pub use crate::presentation::dto::*;
}
