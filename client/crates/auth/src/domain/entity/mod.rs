//! Entities

pub mod auth_session;
pub mod lockout;
pub mod user;
