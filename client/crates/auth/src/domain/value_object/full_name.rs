//! Full Name Value Object

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const FULL_NAME_MIN_LENGTH: usize = 2;

pub const FULL_NAME_MAX_LENGTH: usize = 100;

/// Display name entered at sign-up, with whitespace runs collapsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FullName(String);

impl FullName {
    pub fn new(input: impl AsRef<str>) -> AppResult<Self> {
        let name = input.as_ref().split_whitespace().collect::<Vec<_>>().join(" ");

        let length = name.chars().count();
        if length == 0 {
            return Err(AppError::bad_request("Full name is required"));
        }
        if length < FULL_NAME_MIN_LENGTH {
            return Err(AppError::bad_request(format!(
                "Full name must be at least {FULL_NAME_MIN_LENGTH} characters"
            )));
        }
        if length > FULL_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Full name must be at most {FULL_NAME_MAX_LENGTH} characters"
            )));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_collapses_whitespace() {
        let name = FullName::new("  Ann \t A.   Lee ").unwrap();
        assert_eq!(name.as_str(), "Ann A. Lee");
    }

    #[test]
    fn test_full_name_bounds() {
        assert_eq!(FullName::new("   ").unwrap_err().message(), "Full name is required");
        assert!(FullName::new("J").is_err());
        assert!(FullName::new("Jo").is_ok());
        assert!(FullName::new("x".repeat(FULL_NAME_MAX_LENGTH + 1)).is_err());
    }
}
