//! Shared Kernel - Cross-crate minimal core
//!
//! This crate contains the smallest shared vocabulary of the workspace:
//! - The error classification ([`error::kind::ErrorKind`])
//! - The unified error type and result alias ([`error::app_error::AppError`])
//! - Conversions from common library errors
//!
//! **Design Principle**: Only include things whose meaning is identical
//! in every crate that uses them.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
