use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A stored account, including its password hash.
///
/// `User` is never serialized; anything leaving the process goes through
/// [`PublicUser`].
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub id: Uuid,
    /// Unique, compared exactly as stored.
    pub email: String,
    pub name: String,
    /// bcrypt hash, never the plaintext.
    pub password: String,
    pub image: Option<String>,
    /// Set once the activation link has been consumed.
    pub active: bool,
    /// Account enabled.
    pub status: bool,
    pub country: Option<String>,
    pub city: Option<String>,
    pub created_by: Option<Uuid>,
    pub last_active: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a freshly registered, inactive account around an already hashed password.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            name,
            password: password_hash,
            image: None,
            active: false,
            status: false,
            country: None,
            city: None,
            created_by: None,
            last_active: now,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The client-facing view of a [`User`]: every field except the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub image: Option<String>,
    pub active: bool,
    pub status: bool,
    pub country: Option<String>,
    pub city: Option<String>,
    pub created_by: Option<Uuid>,
    pub last_active: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            image: user.image,
            active: user.active,
            status: user.status,
            country: user.country,
            city: user.city,
            created_by: user.created_by,
            last_active: user.last_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Profile fields a signed-in user may change about themselves.
/// Absent fields are left untouched.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ProfileUpdate {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(url)]
    pub image: Option<String>,
    #[validate(length(max = 100))]
    pub country: Option<String>,
    #[validate(length(max = 100))]
    pub city: Option<String>,
}

impl ProfileUpdate {
    /// Applies the present fields to `user` and bumps its activity timestamps.
    pub fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(image) = self.image {
            user.image = Some(image);
        }
        if let Some(country) = self.country {
            user.country = Some(country);
        }
        if let Some(city) = self.city {
            user.city = Some(city);
        }
        let now = Utc::now();
        user.last_active = now;
        user.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User::new(
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "$2b$12$hash".to_string(),
        )
    }

    #[test]
    fn test_new_user_is_inactive() {
        let user = sample_user();
        assert!(!user.active);
        assert!(!user.status);
        assert_eq!(user.created_at, user.last_active);
    }

    #[test]
    fn test_public_user_has_no_password() {
        let public = PublicUser::from(sample_user());
        let json = serde_json::to_value(&public).unwrap();

        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "alice@example.com");
        assert!(json.get("lastActive").is_some());
    }

    #[test]
    fn test_profile_update_applies_only_present_fields() {
        let mut user = sample_user();
        let before = user.updated_at;

        ProfileUpdate {
            city: Some("Jakarta".to_string()),
            ..Default::default()
        }
        .apply(&mut user);

        assert_eq!(user.name, "Alice");
        assert_eq!(user.city.as_deref(), Some("Jakarta"));
        assert!(user.country.is_none());
        assert!(user.updated_at >= before);
    }

    #[test]
    fn test_profile_update_validation() {
        let empty_name = ProfileUpdate {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(empty_name.validate().is_err());

        let bad_image = ProfileUpdate {
            image: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(bad_image.validate().is_err());

        assert!(ProfileUpdate::default().validate().is_ok());
    }
}
