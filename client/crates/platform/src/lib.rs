//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password strength evaluation for live sign-up feedback
//! - Password requirements and zeroized password handling
//! - A cancellable countdown ticker for lockout displays

pub mod countdown;
pub mod password;
pub mod password_strength;
