//! HTTP Gateway Implementation
//!
//! Talks to the authentication backend over JSON/HTTPS with `reqwest`.
//! Every response body is an [`Envelope`]; non-2xx statuses carry the
//! reason in its `message`.

use std::sync::Arc;

use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::ClearTextPassword;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;

use crate::application::config::AuthClientConfig;
use crate::domain::gateway::{
    Acknowledgement, AuthGateway, LoginGrant, LoginRequest, SignupReceipt, SignupRequest,
    VerifyOtpRequest,
};
use crate::domain::value_object::{email::Email, otp_code::OtpCode};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    Envelope, GenerateOtpBody, LoginBody, LoginData, ResetPasswordBody, SignupBody,
    SignupData, VerifyOtpBody, VerifyResetOtpBody,
};

const LOGIN_PATH: &str = "auth/login";
const SIGNUP_PATH: &str = "auth/signup";
const VERIFY_OTP_PATH: &str = "auth/verify-otp";
const GENERATE_OTP_PATH: &str = "auth/generate-otp";
const VERIFY_RESET_OTP_PATH: &str = "auth/verify-reset-otp";
const RESET_PASSWORD_PATH: &str = "auth/reset-password";

const LOGIN_FAILED: &str = "Login failed";
const SIGNUP_FAILED: &str = "Signup failed";
const OTP_FAILED: &str = "OTP verification failed";
const SEND_OTP_FAILED: &str = "Failed to send OTP";
const RESET_FAILED: &str = "Password reset failed";

/// reqwest-backed authentication gateway
#[derive(Clone)]
pub struct HttpAuthGateway {
    client: reqwest::Client,
    config: Arc<AuthClientConfig>,
}

impl HttpAuthGateway {
    pub fn new(config: Arc<AuthClientConfig>) -> AuthResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AuthError::Internal(format!("HTTP client setup failed: {e}")))?;
        Ok(Self { client, config })
    }

    /// POST `body` to `path` and decode the envelope
    ///
    /// Returns the envelope's `data` (if any) and its `message`.
    async fn post<B, T>(
        &self,
        path: &str,
        body: &B,
        fallback: &'static str,
    ) -> AuthResult<(Option<T>, String)>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        tracing::debug!(%url, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::Transport(AppError::from(e)))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| AuthError::Transport(AppError::from(e)))?;

        interpret(status, &text, fallback)
    }
}

/// Map a status code and body to data or an error
fn interpret<T>(
    status: u16,
    body: &str,
    fallback: &'static str,
) -> AuthResult<(Option<T>, String)>
where
    T: DeserializeOwned,
{
    if !(200..300).contains(&status) {
        // Error bodies may be HTML from a proxy; only the message matters
        let message = serde_json::from_str::<Envelope<IgnoredAny>>(body)
            .ok()
            .and_then(|envelope| envelope.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());
        return Err(AuthError::Rejected {
            kind: ErrorKind::from_status_code(status),
            message,
        });
    }

    let envelope: Envelope<T> =
        serde_json::from_str(body).map_err(|e| AuthError::Transport(AppError::from(e)))?;

    let message = envelope.message.unwrap_or_default();
    if !envelope.success {
        return Err(AuthError::Rejected {
            kind: ErrorKind::BadRequest,
            message: if message.trim().is_empty() {
                fallback.to_string()
            } else {
                message
            },
        });
    }

    Ok((envelope.data, message))
}

fn require<T>(data: Option<T>, operation: &str) -> AuthResult<T> {
    data.ok_or_else(|| AuthError::Internal(format!("{operation} response is missing data")))
}

impl AuthGateway for HttpAuthGateway {
    async fn login(&self, request: &LoginRequest) -> AuthResult<LoginGrant> {
        let body = LoginBody {
            identifier: request.identifier.as_str(),
            password: request.password.expose(),
            recaptcha_token: request.recaptcha_token.as_str(),
        };
        let (data, message) = self.post::<_, LoginData>(LOGIN_PATH, &body, LOGIN_FAILED).await?;
        let data = require(data, "Login")?;

        Ok(LoginGrant {
            access_token: data.access_token,
            refresh_token: data.refresh_token,
            expires_in: data.expires_in,
            user: data.user,
            message,
        })
    }

    async fn signup(&self, request: &SignupRequest) -> AuthResult<SignupReceipt> {
        let body = SignupBody {
            full_name: request.full_name.as_str(),
            email: request.email.as_str(),
            username: request.username.as_str(),
            password: request.password.expose(),
            recaptcha_token: request.recaptcha_token.as_str(),
        };
        let (data, message) = self
            .post::<_, SignupData>(SIGNUP_PATH, &body, SIGNUP_FAILED)
            .await?;
        let data = require(data, "Signup")?;

        Ok(SignupReceipt {
            user_id: data.user_id,
            email: data.email,
            message,
        })
    }

    async fn verify_email_otp(&self, request: &VerifyOtpRequest) -> AuthResult<Acknowledgement> {
        let body = VerifyOtpBody {
            user_id: &request.user_id,
            email: request.email.as_str(),
            otp_code: request.otp.as_str(),
        };
        let (_, message) = self
            .post::<_, IgnoredAny>(VERIFY_OTP_PATH, &body, OTP_FAILED)
            .await?;
        Ok(Acknowledgement { message })
    }

    async fn request_password_reset(&self, email: &Email) -> AuthResult<Acknowledgement> {
        let body = GenerateOtpBody {
            email: email.as_str(),
        };
        let (_, message) = self
            .post::<_, IgnoredAny>(GENERATE_OTP_PATH, &body, SEND_OTP_FAILED)
            .await?;
        Ok(Acknowledgement { message })
    }

    async fn verify_reset_otp(&self, email: &Email, otp: &OtpCode) -> AuthResult<Acknowledgement> {
        let body = VerifyResetOtpBody {
            email: email.as_str(),
            otp: otp.as_str(),
        };
        let (_, message) = self
            .post::<_, IgnoredAny>(VERIFY_RESET_OTP_PATH, &body, OTP_FAILED)
            .await?;
        Ok(Acknowledgement { message })
    }

    async fn reset_password(
        &self,
        email: &Email,
        new_password: &ClearTextPassword,
    ) -> AuthResult<Acknowledgement> {
        let body = ResetPasswordBody {
            email: email.as_str(),
            new_password: new_password.expose(),
        };
        let (_, message) = self
            .post::<_, IgnoredAny>(RESET_PASSWORD_PATH, &body, RESET_FAILED)
            .await?;
        Ok(Acknowledgement { message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_uses_envelope_message() {
        let body = r#"{"success":false,"message":"Invalid credentials"}"#;
        let err = interpret::<IgnoredAny>(401, body, LOGIN_FAILED).unwrap_err();
        match err {
            AuthError::Rejected { kind, message } => {
                assert_eq!(kind, ErrorKind::Unauthorized);
                assert_eq!(message, "Invalid credentials");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_error_status_falls_back_per_operation() {
        let err = interpret::<IgnoredAny>(502, "<html>Bad Gateway</html>", SIGNUP_FAILED).unwrap_err();
        assert_eq!(err.user_message(), "Signup failed");
        assert_eq!(err.kind(), ErrorKind::BadGateway);

        let body = r#"{"success":false,"message":"  "}"#;
        let err = interpret::<IgnoredAny>(400, body, SEND_OTP_FAILED).unwrap_err();
        assert_eq!(err.user_message(), "Failed to send OTP");
    }

    #[test]
    fn test_success_returns_data_and_message() {
        let body = r#"{"success":true,"message":"Signup successful","data":{"userId":"u1","email":"jane@example.com"}}"#;
        let (data, message) = interpret::<SignupData>(201, body, SIGNUP_FAILED).unwrap();
        assert_eq!(data.unwrap().user_id, "u1");
        assert_eq!(message, "Signup successful");
    }

    #[test]
    fn test_success_without_data_is_internal_when_required() {
        let body = r#"{"success":true,"message":"ok"}"#;
        let (data, _) = interpret::<LoginData>(200, body, LOGIN_FAILED).unwrap();
        assert!(matches!(require(data, "Login"), Err(AuthError::Internal(_))));
    }

    #[test]
    fn test_malformed_success_body_is_transport() {
        let err = interpret::<IgnoredAny>(200, "not json", OTP_FAILED).unwrap_err();
        assert!(matches!(err, AuthError::Transport(_)));
        assert_eq!(err.kind(), ErrorKind::BadGateway);
    }

    #[test]
    fn test_unsuccessful_envelope_on_2xx_is_rejected() {
        let body = r#"{"success":false,"message":"OTP expired"}"#;
        let err = interpret::<IgnoredAny>(200, body, OTP_FAILED).unwrap_err();
        assert_eq!(err.user_message(), "OTP expired");
    }

    #[test]
    fn test_gateway_builds_from_config() {
        let config = Arc::new(AuthClientConfig::development());
        assert!(HttpAuthGateway::new(config).is_ok());
    }
}
