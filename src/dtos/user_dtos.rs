use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ids::IdValue;
use crate::models::user::User;

#[derive(Debug, Deserialize)]
pub struct CreateUserDTO {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserDTO {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub bio: Option<String>,
}

/// A user as returned to clients. Built from [`User`], which is the only
/// place the password hash exists — it never reaches this type.
#[derive(Debug, Serialize)]
pub struct UserOut {
    #[serde(rename = "_id")]
    pub id: IdValue,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl From<User> for UserOut {
    fn from(user: User) -> Self {
        UserOut {
            id: user.id.to_wire(),
            username: user.username,
            email: user.email,
            bio: user.bio,
            is_active: user.is_active,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

/// Body of `GET /api/users/pseudos`: the projected usernames plus paging
/// metadata, wrapped together inside the envelope's `data`.
#[derive(Debug, Serialize)]
pub struct PseudosPage {
    pub data: Vec<serde_json::Value>,
    pub pagination: PaginationMeta,
}

pub fn page_count(total: u64, limit: u64) -> u64 {
    total.div_ceil(limit)
}

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::DocId;
    use bson::oid::ObjectId;

    #[test]
    fn email_validation() {
        assert!(is_valid_email("alice@example.com"));
        assert!(is_valid_email("a.b+tag@sub.domain.org"));
        assert!(!is_valid_email("alice"));
        assert!(!is_valid_email("alice@"));
        assert!(!is_valid_email("alice@nodot"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn user_out_never_carries_the_password() {
        let user = User {
            id: DocId::Oid(ObjectId::new()),
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "$argon2id$hash".into(),
            bio: None,
            is_active: Some(true),
        };
        let json = serde_json::to_value(UserOut::from(user)).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("bio").is_none());
        assert_eq!(json["username"], serde_json::json!("alice"));
    }

    #[test]
    fn integer_keyed_users_keep_numeric_ids() {
        let user = User {
            id: DocId::Int(12),
            username: "seeded".into(),
            email: "seeded@example.com".into(),
            password: "hash".into(),
            bio: Some("from the migration".into()),
            is_active: None,
        };
        let json = serde_json::to_value(UserOut::from(user)).unwrap();
        assert_eq!(json["_id"], serde_json::json!(12));
        assert_eq!(json["bio"], serde_json::json!("from the migration"));
    }

    #[test]
    fn page_count_is_a_ceiling() {
        assert_eq!(page_count(0, 3), 0);
        assert_eq!(page_count(1, 3), 1);
        assert_eq!(page_count(3, 3), 1);
        assert_eq!(page_count(10, 3), 4);
    }
}
