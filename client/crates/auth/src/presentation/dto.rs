//! API DTOs (Data Transfer Objects)
//!
//! JSON bodies exchanged with the authentication backend. Field names are
//! camelCase on the wire.

use serde::{Deserialize, Serialize};

use crate::domain::entity::user::UserProfile;

// ============================================================================
// Envelope
// ============================================================================

/// Every backend response, success or failure
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

// ============================================================================
// Sign In
// ============================================================================

/// Sign in request
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginBody<'a> {
    /// User name or email
    pub identifier: &'a str,
    pub password: &'a str,
    pub recaptcha_token: &'a str,
}

/// Sign in response data
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
    pub user: UserProfile,
}

// ============================================================================
// Sign Up
// ============================================================================

/// Sign up request
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupBody<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub username: &'a str,
    pub password: &'a str,
    pub recaptcha_token: &'a str,
}

/// Sign up response data
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupData {
    pub user_id: String,
    pub email: String,
}

// ============================================================================
// OTP
// ============================================================================

/// Email verification request
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpBody<'a> {
    pub user_id: &'a str,
    pub email: &'a str,
    pub otp_code: &'a str,
}

/// Password reset code request
#[derive(Serialize)]
pub struct GenerateOtpBody<'a> {
    pub email: &'a str,
}

/// Password reset code check
#[derive(Serialize)]
pub struct VerifyResetOtpBody<'a> {
    pub email: &'a str,
    pub otp: &'a str,
}

// ============================================================================
// Password Reset
// ============================================================================

/// New password submission
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordBody<'a> {
    pub email: &'a str,
    pub new_password: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_role::UserRole;
    use serde_json::json;

    #[test]
    fn test_login_body_is_camel_case() {
        let body = LoginBody {
            identifier: "jane",
            password: "secret",
            recaptcha_token: "token",
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"identifier": "jane", "password": "secret", "recaptchaToken": "token"})
        );
    }

    #[test]
    fn test_login_envelope() {
        let raw = json!({
            "success": true,
            "message": "Login successful",
            "data": {
                "accessToken": "a",
                "refreshToken": "r",
                "expiresIn": 900,
                "user": {
                    "id": "1",
                    "fullName": "Jane Doe",
                    "email": "jane@example.com",
                    "username": "jane",
                    "role": "admin"
                }
            }
        });
        let envelope: Envelope<LoginData> = serde_json::from_value(raw).unwrap();
        assert!(envelope.success);
        let data = envelope.data.unwrap();
        assert_eq!(data.expires_in, 900);
        assert_eq!(data.user.role, UserRole::Admin);
    }

    #[test]
    fn test_error_envelope_without_data() {
        let envelope: Envelope<SignupData> =
            serde_json::from_str(r#"{"success": false, "message": "Email already registered"}"#)
                .unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.message.as_deref(), Some("Email already registered"));
    }

    #[test]
    fn test_null_data_is_absent() {
        let envelope: Envelope<LoginData> =
            serde_json::from_str(r#"{"success": false, "message": "Invalid credentials", "data": null}"#)
                .unwrap();
        assert!(envelope.data.is_none());
        assert_eq!(envelope.message.as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn test_verify_otp_body_fields() {
        let body = VerifyOtpBody {
            user_id: "u1",
            email: "jane@example.com",
            otp_code: "123456",
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["userId"], "u1");
        assert_eq!(value["otpCode"], "123456");
    }
}
