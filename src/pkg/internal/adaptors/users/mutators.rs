use sqlx::PgConnection;

use crate::{
    pkg::internal::adaptors::users::spec::{Role, UserEntry},
    prelude::{Error, Result},
};

/// Column values for a user insert. `password_hash` is already hashed by
/// the time it reaches this layer.
pub struct CreateUserData {
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
}

pub struct UserMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> UserMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        UserMutator { pool }
    }

    pub async fn create(&mut self, user: CreateUserData) -> Result<UserEntry> {
        let row = sqlx::query_as::<_, UserEntry>(
            r#"
            INSERT INTO users (username, email, password_hash, role, phone_number, address,
                               first_name, last_name, company_name, website, contact_info)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, username, email, password_hash, role, phone_number, address,
                      first_name, last_name, company_name, website, contact_info,
                      created_at, updated_at
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(&user.phone_number)
        .bind(&user.address)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.company_name)
        .bind(&user.website)
        .bind(&user.contact_info)
        .fetch_one(&mut *self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => Error::Duplicate("email"),
            _ => Error::Database(e),
        })?;
        Ok(row)
    }
}
