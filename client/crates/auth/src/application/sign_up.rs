//! Sign Up Use Case
//!
//! Creates an unverified account. The backend mails a one-time code that
//! [`crate::application::verify_email::VerifyEmailUseCase`] consumes.

use std::sync::Arc;

use platform::password::ClearTextPassword;
use platform::password_strength::{self, PasswordAssessment};

use crate::domain::gateway::{AuthGateway, SignupRequest};
use crate::domain::value_object::{
    email::Email, full_name::FullName, recaptcha_token::RecaptchaToken, user_name::UserName,
};
use crate::error::{AuthError, AuthResult};

/// Sign up input
#[derive(Default)]
pub struct SignUpInput {
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub recaptcha_token: Option<String>,
}

/// Account created; the email still has to be verified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingVerification {
    /// Backend id of the pending user
    pub user_id: String,
    /// Address the code was sent to
    pub email: String,
    /// Success notice from the backend
    pub message: String,
}

/// Sign up use case
pub struct SignUpUseCase<G>
where
    G: AuthGateway,
{
    gateway: Arc<G>,
}

impl<G> SignUpUseCase<G>
where
    G: AuthGateway,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Live strength feedback for the form as the user types
    pub fn assess(&self, password: &str, username: &str, full_name: &str) -> PasswordAssessment {
        password_strength::assess(password, username, full_name)
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<PendingVerification> {
        let request = Self::validate(input).inspect_err(AuthError::log)?;

        let receipt = self
            .gateway
            .signup(&request)
            .await
            .inspect_err(AuthError::log)?;

        tracing::info!(
            user_id = %receipt.user_id,
            email_domain = request.email.domain(),
            "Account created, awaiting email verification"
        );

        Ok(PendingVerification {
            user_id: receipt.user_id,
            email: receipt.email,
            message: receipt.message,
        })
    }

    fn validate(input: SignUpInput) -> AuthResult<SignupRequest> {
        let password = ClearTextPassword::new(input.password)?;
        Ok(SignupRequest {
            full_name: FullName::new(&input.full_name)?,
            email: Email::new(&input.email)?,
            username: UserName::new(&input.username)?,
            password,
            recaptcha_token: RecaptchaToken::new(input.recaptcha_token)?,
        })
    }
}
