//! Sign-in Identifier Value Object
//!
//! The login form accepts either an email address or a user name in a
//! single field; the backend resolves which one it is.

use kernel::error::app_error::{AppError, AppResult};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(input: impl AsRef<str>) -> AppResult<Self> {
        let value = input.as_ref().trim();
        if value.is_empty() {
            return Err(AppError::bad_request("Email or username is required")
                .with_action("Please enter your email or username"));
        }
        Ok(Self(value.to_string()))
    }

    /// Whether the identifier looks like an email address
    pub fn is_email(&self) -> bool {
        self.0.contains('@')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
