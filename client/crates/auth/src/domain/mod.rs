//! Domain Layer
//!
//! Contains entities, value objects, and the gateway trait for the
//! external authentication backend.

pub mod entity;
pub mod gateway;
pub mod value_object;

// Re-exports
pub use entity::{
    auth_session::AuthSession,
    lockout::{LockoutPolicy, LockoutState},
    user::UserProfile,
};
pub use gateway::AuthGateway;
