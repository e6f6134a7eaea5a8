//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod password_reset;
pub mod sign_in;
pub mod sign_up;
pub mod verify_email;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports
pub use config::AuthClientConfig;
pub use password_reset::{PasswordResetUseCase, ResetOtpSent};
pub use sign_in::{Destination, SignInInput, SignInOutput, SignInUseCase};
pub use sign_up::{PendingVerification, SignUpInput, SignUpUseCase};
pub use verify_email::{VerifyEmailInput, VerifyEmailUseCase};
