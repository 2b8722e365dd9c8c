use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Registered account. The password hash never leaves the server.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    #[must_use]
    pub fn new(email: &str, password_hash: String) -> Self {
        Self {
            email: normalize_email(email),
            password_hash,
        }
    }
}

/// Identity stored in the session cookie for a signed-in account.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionUser {
    pub id: i32,
    pub email: String,
}

impl From<&User> for SessionUser {
    fn from(value: &User) -> Self {
        Self {
            id: value.id,
            email: value.email.clone(),
        }
    }
}

/// Emails are compared case-insensitively.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
