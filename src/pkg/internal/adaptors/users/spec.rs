use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::{FromRow, Type};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    JobSeeker,
    Employer,
}

#[derive(Debug, Clone, FromRow)]
pub struct UserEntry {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub phone_number: String,
    pub address: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
    pub website: Option<String>,
    pub contact_info: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Outward projection of a user. The password hash never leaves the store
/// layer, so it is simply not part of this struct.
#[derive(Debug, Clone, Serialize)]
pub struct UserOut {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub phone_number: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<UserEntry> for UserOut {
    fn from(user: UserEntry) -> Self {
        UserOut {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            phone_number: user.phone_number,
            address: user.address,
            first_name: user.first_name,
            last_name: user.last_name,
            company_name: user.company_name,
            website: user.website,
            contact_info: user.contact_info,
            created_at: user.created_at,
        }
    }
}
