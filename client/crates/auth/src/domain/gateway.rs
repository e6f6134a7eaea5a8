//! Gateway Traits
//!
//! Interface to the external authentication backend. Implementation is in
//! infrastructure layer.

use platform::password::ClearTextPassword;

use crate::domain::entity::user::UserProfile;
use crate::domain::value_object::{
    email::Email, full_name::FullName, identifier::Identifier, otp_code::OtpCode,
    recaptcha_token::RecaptchaToken, user_name::UserName,
};
use crate::error::AuthResult;

/// Sign-in submission
#[derive(Debug)]
pub struct LoginRequest {
    pub identifier: Identifier,
    pub password: ClearTextPassword,
    pub recaptcha_token: RecaptchaToken,
}

/// Tokens and profile issued on sign-in
#[derive(Debug, Clone)]
pub struct LoginGrant {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
    pub user: UserProfile,
    pub message: String,
}

/// Sign-up submission
#[derive(Debug)]
pub struct SignupRequest {
    pub full_name: FullName,
    pub email: Email,
    pub username: UserName,
    pub password: ClearTextPassword,
    pub recaptcha_token: RecaptchaToken,
}

/// Account created, awaiting email verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupReceipt {
    pub user_id: String,
    pub email: String,
    pub message: String,
}

/// Email ownership proof for a pending account
#[derive(Debug)]
pub struct VerifyOtpRequest {
    pub user_id: String,
    pub email: Email,
    pub otp: OtpCode,
}

/// Success notice from the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acknowledgement {
    pub message: String,
}

/// Authentication backend
#[trait_variant::make(AuthGateway: Send)]
pub trait LocalAuthGateway {
    /// Exchange credentials for tokens
    async fn login(&self, request: &LoginRequest) -> AuthResult<LoginGrant>;

    /// Create an unverified account
    async fn signup(&self, request: &SignupRequest) -> AuthResult<SignupReceipt>;

    /// Confirm the sign-up email with its one-time code
    async fn verify_email_otp(&self, request: &VerifyOtpRequest) -> AuthResult<Acknowledgement>;

    /// Send a password reset code to the email
    async fn request_password_reset(&self, email: &Email) -> AuthResult<Acknowledgement>;

    /// Check a password reset code
    async fn verify_reset_otp(&self, email: &Email, otp: &OtpCode) -> AuthResult<Acknowledgement>;

    /// Set a new password after a verified reset code
    async fn reset_password(
        &self,
        email: &Email,
        new_password: &ClearTextPassword,
    ) -> AuthResult<Acknowledgement>;
}
