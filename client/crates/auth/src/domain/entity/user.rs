//! User Profile Entity
//!
//! Profile returned by the backend on successful sign-in.

use serde::{Deserialize, Serialize};

use crate::domain::value_object::user_role::UserRole;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Backend identifier
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub role: UserRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_from_backend_json() {
        let json = r#"{
            "_id": "665f1c",
            "fullName": "Jane Doe",
            "email": "jane@example.com",
            "username": "jane",
            "role": "admin"
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.id, "665f1c");
        assert_eq!(profile.full_name, "Jane Doe");
        assert!(profile.role.is_admin());
    }

    #[test]
    fn test_profile_role_defaults_to_user() {
        let json = r#"{"id": "1", "email": "a@b.co", "username": "abc"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.role, UserRole::User);
        assert!(profile.full_name.is_empty());
    }
}
