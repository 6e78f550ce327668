use sqlx::PgConnection;

use crate::{
    pkg::internal::{adaptors::users::spec::UserEntry, password},
    prelude::Result,
};

const USER_COLUMNS: &str = "id, username, email, password_hash, role, phone_number, address, \
     first_name, last_name, company_name, website, contact_info, created_at, updated_at";

pub struct UserSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> UserSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        UserSelector { pool }
    }

    pub async fn get_by_id(&mut self, id: i32) -> Result<Option<UserEntry>> {
        let row = sqlx::query_as::<_, UserEntry>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get_all(&mut self) -> Result<Vec<UserEntry>> {
        let rows = sqlx::query_as::<_, UserEntry>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
        ))
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_email(&mut self, email: &str) -> Result<Vec<UserEntry>> {
        let rows = sqlx::query_as::<_, UserEntry>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    /// Looks up a user by email and checks the password. Returns `None`
    /// uniformly for an unknown email, more than one match, or a wrong
    /// password, so a caller cannot probe which accounts exist.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Option<UserEntry>> {
        let mut matches = self.get_by_email(email).await?;
        if matches.len() != 1 {
            return Ok(None);
        }
        let user = match matches.pop() {
            Some(user) => user,
            None => return Ok(None),
        };
        if password::verify(password, &user.password_hash) {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }
}
