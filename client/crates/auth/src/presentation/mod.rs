//! Presentation Layer
//!
//! Wire DTOs, display text and the login form controller.

pub mod dto;
pub mod login_form;
pub mod view;

pub use login_form::{LockStatus, LoginForm};
