//! User domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use matjar_core::{Email, Role, UserId};

/// A registered account, as stored.
///
/// The password hash never leaves the server; every response path goes
/// through [`UserProfile`].
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub password_hash: String,
    pub role: Role,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The sanitized view of this account (no password hash).
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            address: self.address.clone(),
            phone: self.phone.clone(),
            created_at: self.created_at,
        }
    }
}

/// Public view of a user, safe to return to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: Role,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Partial profile update submitted by the account owner.
///
/// Role and email are deliberately absent: neither is mutable through the
/// self-service path.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: UserId::generate(),
            name: "Demo".to_owned(),
            email: Email::parse("demo@example.com").unwrap(),
            password_hash: "$argon2id$not-a-real-hash".to_owned(),
            role: Role::User,
            address: Some("Riyadh".to_owned()),
            phone: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_profile_strips_password_hash() {
        let user = sample_user();
        let json = serde_json::to_value(user.profile()).unwrap();

        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "demo@example.com");
        assert_eq!(json["role"], "user");
    }

    #[test]
    fn test_profile_uses_camel_case_keys() {
        let user = sample_user();
        let json = serde_json::to_value(user.profile()).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
    }
}
