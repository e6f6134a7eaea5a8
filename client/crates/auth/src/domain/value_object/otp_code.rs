//! One-Time Code Value Object
//!
//! Six-digit numeric code sent by email, used both to verify a new
//! account and to authorize a password reset.

use kernel::error::app_error::{AppError, AppResult};
use serde::Serialize;

pub const OTP_LENGTH: usize = 6;

#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OtpCode(String);

impl OtpCode {
    pub fn new(input: impl AsRef<str>) -> AppResult<Self> {
        let code = input.as_ref().trim();

        if code.is_empty() {
            return Err(AppError::bad_request("Verification code is required"));
        }
        if code.len() != OTP_LENGTH || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AppError::bad_request(format!(
                "Verification code must be {OTP_LENGTH} digits"
            ))
            .with_action("Enter the 6-digit code from your email"));
        }

        Ok(Self(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Codes are short-lived secrets
impl std::fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("OtpCode").field(&"******").finish()
    }
}
