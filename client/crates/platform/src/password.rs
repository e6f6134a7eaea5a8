//! Password Requirements and Secret Handling
//!
//! Submission-time rules shared by the sign-up and new-password forms,
//! plus a clear text wrapper that keeps the secret out of logs and wipes
//! it from memory when dropped.
//!
//! ## Rules
//! - At least [`MIN_PASSWORD_LENGTH`] characters, at most [`MAX_PASSWORD_LENGTH`]
//! - One uppercase letter, one lowercase letter, one digit
//! - One character from [`SPECIAL_CHARACTERS`]

use std::fmt;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length, in characters
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length, in characters
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// The only characters that count as "special"
///
/// Other punctuation is allowed in a password but does not satisfy the
/// special character rule.
pub const SPECIAL_CHARACTERS: &[char] = &['@', '$', '!', '%', '*', '?', '&'];

// ============================================================================
// Character classes
// ============================================================================

#[inline]
pub fn has_uppercase(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_uppercase())
}

#[inline]
pub fn has_lowercase(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_lowercase())
}

#[inline]
pub fn has_digit(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_digit())
}

#[inline]
pub fn has_special(password: &str) -> bool {
    password.chars().any(|c| SPECIAL_CHARACTERS.contains(&c))
}

/// Length in Unicode scalar values
#[inline]
pub fn char_len(password: &str) -> usize {
    password.chars().count()
}

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password is required")]
    Empty,

    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password must contain at least one uppercase letter")]
    MissingUppercase,

    #[error("Password must contain at least one lowercase letter")]
    MissingLowercase,

    #[error("Password must contain at least one number")]
    MissingDigit,

    #[error("Password must contain at least one special character (@$!%*?&)")]
    MissingSpecial,
}

/// Check a password against the submission rules
///
/// Reports the first violated rule, in the order the rules are listed
/// on [`PasswordPolicyError`].
pub fn check_requirements(password: &str) -> Result<(), PasswordPolicyError> {
    if password.is_empty() {
        return Err(PasswordPolicyError::Empty);
    }

    let actual = char_len(password);
    if actual < MIN_PASSWORD_LENGTH {
        return Err(PasswordPolicyError::TooShort {
            min: MIN_PASSWORD_LENGTH,
            actual,
        });
    }
    if actual > MAX_PASSWORD_LENGTH {
        return Err(PasswordPolicyError::TooLong {
            max: MAX_PASSWORD_LENGTH,
            actual,
        });
    }

    if !has_uppercase(password) {
        return Err(PasswordPolicyError::MissingUppercase);
    }
    if !has_lowercase(password) {
        return Err(PasswordPolicyError::MissingLowercase);
    }
    if !has_digit(password) {
        return Err(PasswordPolicyError::MissingDigit);
    }
    if !has_special(password) {
        return Err(PasswordPolicyError::MissingSpecial);
    }

    Ok(())
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password captured from a form field
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone`
/// - Debug output is redacted
///
/// ## Examples
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("Str0ng!Pass".to_string()).unwrap();
/// assert_eq!(format!("{:?}", password), "ClearTextPassword(\"[REDACTED]\")");
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a password that satisfies [`check_requirements`]
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let password = Self(raw);
        check_requirements(&password.0)?;
        Ok(password)
    }

    /// Create a password for sign-in, where only presence is checked
    ///
    /// Existing accounts may predate the current rules, so the backend is
    /// the only judge of whether the password is right.
    pub fn new_unchecked(raw: String) -> Result<Self, PasswordPolicyError> {
        if raw.is_empty() {
            return Err(PasswordPolicyError::Empty);
        }
        Ok(Self(raw))
    }

    /// Borrow the secret, e.g. to serialize it into a request body
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Compare against a confirmation entry
    pub fn matches(&self, other: &ClearTextPassword) -> bool {
        self.0 == other.0
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
