//! Password Reset Use Case
//!
//! Three steps, each its own page: request a code for an email, prove the
//! code, then choose a new password. The email is carried between steps by
//! the caller; a step opened without it is an expired request.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::domain::gateway::AuthGateway;
use crate::domain::value_object::{email::Email, otp_code::OtpCode};
use crate::error::{AuthError, AuthResult};

/// Reset code dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetOtpSent {
    /// Normalized address to carry into the next step
    pub email: String,
    pub message: String,
}

/// Password reset use case
pub struct PasswordResetUseCase<G>
where
    G: AuthGateway,
{
    gateway: Arc<G>,
}

impl<G> PasswordResetUseCase<G>
where
    G: AuthGateway,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Ask the backend to mail a reset code
    pub async fn request_otp(&self, email: &str) -> AuthResult<ResetOtpSent> {
        let email = Email::new(email)?;

        let ack = self
            .gateway
            .request_password_reset(&email)
            .await
            .inspect_err(AuthError::log)?;

        tracing::info!(email_domain = email.domain(), "Password reset code requested");
        Ok(ResetOtpSent {
            email: email.into_inner(),
            message: ack.message,
        })
    }

    /// Check the reset code
    pub async fn verify_otp(&self, email: Option<&str>, otp: &str) -> AuthResult<String> {
        let email = Self::pending_email(email)?;
        let otp = OtpCode::new(otp)?;

        let ack = self
            .gateway
            .verify_reset_otp(&email, &otp)
            .await
            .inspect_err(AuthError::log)?;

        tracing::info!(email_domain = email.domain(), "Password reset code verified");
        Ok(ack.message)
    }

    /// Set the new password
    pub async fn complete(
        &self,
        email: Option<&str>,
        new_password: String,
        confirm_password: String,
    ) -> AuthResult<String> {
        let email = Self::pending_email(email)?;
        let new_password = ClearTextPassword::new(new_password)?;
        let confirm_password = ClearTextPassword::new_unchecked(confirm_password)
            .map_err(|_| AuthError::PasswordMismatch)?;
        if !new_password.matches(&confirm_password) {
            return Err(AuthError::PasswordMismatch);
        }

        let ack = self
            .gateway
            .reset_password(&email, &new_password)
            .await
            .inspect_err(AuthError::log)?;

        tracing::info!(email_domain = email.domain(), "Password reset completed");
        Ok(ack.message)
    }

    fn pending_email(email: Option<&str>) -> AuthResult<Email> {
        match email.map(str::trim).filter(|e| !e.is_empty()) {
            Some(email) => Ok(Email::new(email)?),
            None => {
                AuthError::ResetRequestExpired.log();
                Err(AuthError::ResetRequestExpired)
            }
        }
    }
}
