//! User Name Value Object
//!
//! The public handle chosen at sign-up, also accepted as a sign-in
//! identifier.
//!
//! ## Rules
//! - NFKC normalization, trim, then lowercase
//! - Length: 3 to 30 characters
//! - Characters: `a-z`, `0-9`, `_`, `.`, `-`
//! - First and last character: letter, digit or `_`
//! - No consecutive dots (`..`)

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

pub const USER_NAME_MIN_LENGTH: usize = 3;

pub const USER_NAME_MAX_LENGTH: usize = 30;

const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '.', '-'];

/// Validated, normalized user name
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    pub fn new(input: impl AsRef<str>) -> AppResult<Self> {
        let canonical = Self::normalize(input.as_ref());
        Self::validate(&canonical)?;
        Ok(Self(canonical))
    }

    /// NFKC, trim, lowercase
    fn normalize(input: &str) -> String {
        input.nfkc().collect::<String>().trim().to_lowercase()
    }

    fn validate(name: &str) -> AppResult<()> {
        if name.is_empty() {
            return Err(AppError::bad_request("Username is required"));
        }

        let length = name.chars().count();
        if length < USER_NAME_MIN_LENGTH {
            return Err(AppError::bad_request(format!(
                "Username must be at least {USER_NAME_MIN_LENGTH} characters"
            )));
        }
        if length > USER_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Username must be at most {USER_NAME_MAX_LENGTH} characters"
            )));
        }

        if let Some(bad) = name.chars().find(|&c| !Self::is_valid_char(c)) {
            return Err(AppError::bad_request(format!(
                "Username cannot contain '{bad}'"
            ))
            .with_action("Use only letters, numbers, underscores, dots and hyphens"));
        }

        let starts_ok = name.chars().next().is_some_and(Self::is_valid_edge_char);
        let ends_ok = name.chars().next_back().is_some_and(Self::is_valid_edge_char);
        if !starts_ok || !ends_ok {
            return Err(AppError::bad_request(
                "Username must start and end with a letter, number or underscore",
            ));
        }

        if name.contains("..") {
            return Err(AppError::bad_request(
                "Username cannot contain consecutive dots",
            ));
        }

        Ok(())
    }

    #[inline]
    fn is_valid_char(c: char) -> bool {
        c.is_ascii_lowercase() || c.is_ascii_digit() || ALLOWED_SPECIAL_CHARS.contains(&c)
    }

    #[inline]
    fn is_valid_edge_char(c: char) -> bool {
        c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserName").field(&self.0).finish()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_name_valid() {
        for ok in ["abc", "john_smith", "j.smith-2", "_hidden_", "a1b"] {
            assert!(UserName::new(ok).is_ok(), "{ok:?} rejected");
        }
    }

    #[test]
    fn test_user_name_normalized() {
        assert_eq!(UserName::new("  JohnSmith ").unwrap().as_str(), "johnsmith");
        // Fullwidth letters fold to ASCII under NFKC
        assert_eq!(UserName::new("ＪＯＨＮ").unwrap().as_str(), "john");
    }

    #[test]
    fn test_user_name_length() {
        assert!(UserName::new("ab").is_err());
        assert!(UserName::new("a".repeat(USER_NAME_MAX_LENGTH)).is_ok());
        assert!(UserName::new("a".repeat(USER_NAME_MAX_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_user_name_invalid() {
        for bad in ["", "john smith", "john@home", ".john", "john-", "jo..hn", "jöhn"] {
            assert!(UserName::new(bad).is_err(), "{bad:?} accepted");
        }
    }

    #[test]
    fn test_user_name_error_message() {
        let err = UserName::new("john!").unwrap_err();
        assert_eq!(err.message(), "Username cannot contain '!'");
        assert!(err.action().is_some());
    }
}
