//! Password Strength Evaluation
//!
//! Scores a candidate password for the live strength meter shown while a
//! user fills in the sign-up form. The score is the number of satisfied
//! checks out of six:
//!
//! | Check | Rule |
//! |---|---|
//! | length | at least [`MIN_PASSWORD_LENGTH`] characters |
//! | uppercase | an ASCII `A-Z` |
//! | lowercase | an ASCII `a-z` |
//! | digit | an ASCII `0-9` |
//! | special | one of [`SPECIAL_CHARACTERS`] |
//! | personal info | neither the user name nor any full-name token longer than 2 characters appears in the password (case-insensitive) |
//!
//! Scores below 3 are [`Strength::Weak`], 3 and 4 are [`Strength::Medium`],
//! 5 and 6 are [`Strength::Strong`].
//!
//! Evaluation is pure and total: every input, including empty strings,
//! produces an assessment.

use std::fmt;

use crate::password::{char_len, has_digit, has_lowercase, has_special, has_uppercase};

pub use crate::password::{MIN_PASSWORD_LENGTH, SPECIAL_CHARACTERS};

/// Highest possible score
pub const MAX_SCORE: u8 = 6;

/// Lowest score bucketed as [`Strength::Medium`]
const MEDIUM_MIN_SCORE: u8 = 3;

/// Lowest score bucketed as [`Strength::Strong`]
const STRONG_MIN_SCORE: u8 = 5;

/// Full-name tokens this short are ignored (initials such as "A.")
const MIN_NAME_TOKEN_CHARS: usize = 3;

// ============================================================================
// Strength buckets
// ============================================================================

/// Strength bucket derived from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Strength {
    Weak,
    Medium,
    Strong,
}

impl Strength {
    pub const fn from_score(score: u8) -> Self {
        if score < MEDIUM_MIN_SCORE {
            Strength::Weak
        } else if score < STRONG_MIN_SCORE {
            Strength::Medium
        } else {
            Strength::Strong
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Strength::Weak => "Weak",
            Strength::Medium => "Medium",
            Strength::Strong => "Strong",
        }
    }

    /// Display color of the meter
    pub const fn color(&self) -> StrengthColor {
        match self {
            Strength::Weak => StrengthColor::Red,
            Strength::Medium => StrengthColor::Orange,
            Strength::Strong => StrengthColor::Green,
        }
    }

    /// Filled width of the meter, in percent
    pub const fn bar_percent(&self) -> u8 {
        match self {
            Strength::Weak => 33,
            Strength::Medium => 66,
            Strength::Strong => 100,
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Meter color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrengthColor {
    Red,
    Orange,
    Green,
}

impl StrengthColor {
    pub const fn as_str(&self) -> &'static str {
        match self {
            StrengthColor::Red => "red",
            StrengthColor::Orange => "orange",
            StrengthColor::Green => "green",
        }
    }
}

impl fmt::Display for StrengthColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Assessment
// ============================================================================

/// One line of the requirements checklist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement {
    pub label: &'static str,
    pub met: bool,
}

/// Result of [`assess`]
///
/// Holds the individual checks; score and strength are derived on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PasswordAssessment {
    pub has_min_length: bool,
    pub has_uppercase: bool,
    pub has_lowercase: bool,
    pub has_digit: bool,
    pub has_special: bool,
    /// The password contains the user name
    pub contains_username: bool,
    /// The password contains a token of the full name
    pub contains_full_name: bool,
}

impl PasswordAssessment {
    /// True when the password leaks neither the user name nor the full name
    pub fn is_free_of_personal_info(&self) -> bool {
        !self.contains_username && !self.contains_full_name
    }

    /// Number of satisfied checks, `0..=6`
    pub fn score(&self) -> u8 {
        [
            self.has_min_length,
            self.has_uppercase,
            self.has_lowercase,
            self.has_digit,
            self.has_special,
            self.is_free_of_personal_info(),
        ]
        .into_iter()
        .filter(|met| *met)
        .count() as u8
    }

    pub fn strength(&self) -> Strength {
        Strength::from_score(self.score())
    }

    /// Checklist in display order
    pub fn requirements(&self) -> [Requirement; 6] {
        [
            Requirement {
                label: "At least 8 characters",
                met: self.has_min_length,
            },
            Requirement {
                label: "Uppercase letter",
                met: self.has_uppercase,
            },
            Requirement {
                label: "Lowercase letter",
                met: self.has_lowercase,
            },
            Requirement {
                label: "Number",
                met: self.has_digit,
            },
            Requirement {
                label: "Special character",
                met: self.has_special,
            },
            Requirement {
                label: "Doesn't include username/full name",
                met: self.is_free_of_personal_info(),
            },
        ]
    }
}

/// Assess a password against the user's name and user name
///
/// ## Arguments
/// * `password` - Candidate password
/// * `username` - User name typed so far (may be empty)
/// * `full_name` - Full name typed so far (may be empty)
///
/// ## Examples
/// ```rust
/// use platform::password_strength::{assess, Strength};
///
/// let assessment = assess("Password1!", "", "");
/// assert_eq!(assessment.score(), 6);
/// assert_eq!(assessment.strength(), Strength::Strong);
/// ```
pub fn assess(password: &str, username: &str, full_name: &str) -> PasswordAssessment {
    let folded = password.to_lowercase();

    let contains_username = !username.is_empty() && folded.contains(&username.to_lowercase());

    let contains_full_name = full_name
        .split_whitespace()
        .filter(|token| token.chars().count() >= MIN_NAME_TOKEN_CHARS)
        .any(|token| folded.contains(&token.to_lowercase()));

    PasswordAssessment {
        has_min_length: char_len(password) >= MIN_PASSWORD_LENGTH,
        has_uppercase: has_uppercase(password),
        has_lowercase: has_lowercase(password),
        has_digit: has_digit(password),
        has_special: has_special(password),
        contains_username,
        contains_full_name,
    }
}
