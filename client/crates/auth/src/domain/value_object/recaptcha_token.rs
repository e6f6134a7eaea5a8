//! Human-Verification Token Value Object
//!
//! Token produced by the reCAPTCHA widget; the backend verifies it.

use kernel::error::app_error::{AppError, AppResult};
use serde::Serialize;

#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecaptchaToken(String);

impl RecaptchaToken {
    /// Accept the widget's callback value; `None` means the token expired
    pub fn new(token: Option<String>) -> AppResult<Self> {
        match token {
            Some(token) if !token.trim().is_empty() => Ok(Self(token)),
            _ => Err(
                AppError::bad_request("Please complete the reCAPTCHA verification")
                    .with_action("Tick the \"I'm not a robot\" box and try again"),
            ),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for RecaptchaToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("RecaptchaToken").field(&"[REDACTED]").finish()
    }
}
