//! Verify Email Use Case
//!
//! Confirms the sign-up email with the one-time code sent by the backend.

use std::sync::Arc;

use crate::domain::gateway::{AuthGateway, VerifyOtpRequest};
use crate::domain::value_object::{email::Email, otp_code::OtpCode};
use crate::error::{AuthError, AuthResult};

/// Page to open once the email is verified
pub const NEXT_PATH: &str = "/login";

/// Verify email input
///
/// `user_id` and `email` come from the sign-up step; either may be missing
/// when the verification page is opened directly.
#[derive(Debug, Default)]
pub struct VerifyEmailInput {
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub otp: String,
}

/// Verify email use case
pub struct VerifyEmailUseCase<G>
where
    G: AuthGateway,
{
    gateway: Arc<G>,
}

impl<G> VerifyEmailUseCase<G>
where
    G: AuthGateway,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Returns the backend's confirmation message
    pub async fn execute(&self, input: VerifyEmailInput) -> AuthResult<String> {
        let (Some(user_id), Some(email)) = (
            input.user_id.filter(|id| !id.trim().is_empty()),
            input.email.filter(|e| !e.trim().is_empty()),
        ) else {
            AuthError::VerificationExpired.log();
            return Err(AuthError::VerificationExpired);
        };

        let request = VerifyOtpRequest {
            user_id,
            email: Email::new(email)?,
            otp: OtpCode::new(&input.otp)?,
        };

        let ack = self
            .gateway
            .verify_email_otp(&request)
            .await
            .inspect_err(AuthError::log)?;

        tracing::info!(user_id = %request.user_id, "Email verified");
        Ok(ack.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::FakeGateway;

    fn input(otp: &str) -> VerifyEmailInput {
        VerifyEmailInput {
            user_id: Some(FakeGateway::PENDING_USER_ID.to_string()),
            email: Some("jane@example.com".to_string()),
            otp: otp.to_string(),
        }
    }

    #[tokio::test]
    async fn test_verify_with_correct_code() {
        let verify = VerifyEmailUseCase::new(Arc::new(FakeGateway::new()));
        let message = verify.execute(input(FakeGateway::OTP)).await.unwrap();
        assert_eq!(message, "Email verified successfully");
    }

    #[tokio::test]
    async fn test_missing_pending_user_is_expired() {
        let verify = VerifyEmailUseCase::new(Arc::new(FakeGateway::new()));

        let mut no_user = input(FakeGateway::OTP);
        no_user.user_id = None;
        let err = verify.execute(no_user).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Your verification link is invalid or expired. Please start the signup process again."
        );

        let mut no_email = input(FakeGateway::OTP);
        no_email.email = Some("  ".to_string());
        assert!(matches!(
            verify.execute(no_email).await,
            Err(AuthError::VerificationExpired)
        ));
    }

    #[tokio::test]
    async fn test_malformed_code_is_rejected_locally() {
        let gateway = Arc::new(FakeGateway::new());
        let verify = VerifyEmailUseCase::new(Arc::clone(&gateway));
        assert!(matches!(
            verify.execute(input("12ab56")).await,
            Err(AuthError::Validation(_))
        ));
        assert_eq!(gateway.otp_calls(), 0);
    }

    #[tokio::test]
    async fn test_wrong_code_message_from_backend() {
        let verify = VerifyEmailUseCase::new(Arc::new(FakeGateway::new()));
        let err = verify.execute(input("000000")).await.unwrap_err();
        assert_eq!(err.user_message(), "Invalid or expired OTP");
    }
}
