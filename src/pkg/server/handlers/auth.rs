use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    pkg::{
        internal::{
            adaptors::users::{
                mutators::{CreateUserData, UserMutator},
                selectors::UserSelector,
                spec::Role,
            },
            password,
        },
        server::state::{AppState, GetTxn},
    },
    prelude::{Error, Result},
};

#[derive(Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub role: Role,
    #[validate(length(min = 1))]
    pub phone_number: String,
    #[validate(length(min = 1))]
    pub address: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
    pub website: Option<String>,
    pub contact_info: Option<String>,
}

impl RegisterInput {
    /// Role-specific fields must be present for the declared role and absent
    /// for the other one.
    fn validate_role_fields(&self) -> Result<()> {
        let missing = |field: &str| {
            Error::Validation(format!("{field} is required for role {:?}", self.role))
        };
        let stray = |field: &str| {
            Error::Validation(format!("{field} is not allowed for role {:?}", self.role))
        };
        match self.role {
            Role::JobSeeker => {
                if self.first_name.is_none() {
                    return Err(missing("first_name"));
                }
                if self.last_name.is_none() {
                    return Err(missing("last_name"));
                }
                if self.company_name.is_some() {
                    return Err(stray("company_name"));
                }
                if self.website.is_some() {
                    return Err(stray("website"));
                }
                if self.contact_info.is_some() {
                    return Err(stray("contact_info"));
                }
            }
            Role::Employer => {
                if self.company_name.is_none() {
                    return Err(missing("company_name"));
                }
                if self.website.is_none() {
                    return Err(missing("website"));
                }
                if self.contact_info.is_none() {
                    return Err(missing("contact_info"));
                }
                if self.first_name.is_some() {
                    return Err(stray("first_name"));
                }
                if self.last_name.is_some() {
                    return Err(stray("last_name"));
                }
            }
        }
        Ok(())
    }
}

#[derive(Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expiry: DateTime<Utc>,
    pub username: String,
    pub role: Role,
}

pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> Result<StatusCode> {
    input
        .validate()
        .map_err(|e| Error::Validation(e.to_string()))?;
    input.validate_role_fields()?;

    let password_hash = password::hash(&input.password)?;
    let mut tx = state.db_pool.begin_txn().await?;
    let user = UserMutator::new(&mut tx)
        .create(CreateUserData {
            username: input.username,
            email: input.email,
            password_hash,
            role: input.role,
            phone_number: input.phone_number,
            address: input.address,
            first_name: input.first_name,
            last_name: input.last_name,
            company_name: input.company_name,
            website: input.website,
            contact_info: input.contact_info,
        })
        .await?;
    tx.commit().await?;
    tracing::info!("registered user {}", user.id);
    Ok(StatusCode::CREATED)
}

/// All login failures collapse into the same generic 401; a caller cannot
/// tell an unknown email from a wrong password.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<LoginResponse>> {
    let mut conn = state.db_pool.acquire().await?;
    let user = UserSelector::new(&mut conn)
        .login(&input.email, &input.password)
        .await?
        .ok_or(Error::Credentials)?;

    let (token, expiry) = state.tokens.issue(user.id, &user.username, user.role)?;
    tracing::info!("user {} logged in", user.id);
    Ok(Json(LoginResponse {
        token,
        expiry,
        username: user.username,
        role: user.role,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeker_input() -> RegisterInput {
        RegisterInput {
            username: "ada".into(),
            email: "ada@example.com".into(),
            password: "longenough1".into(),
            role: Role::JobSeeker,
            phone_number: "555-0100".into(),
            address: "1 Main St".into(),
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            company_name: None,
            website: None,
            contact_info: None,
        }
    }

    #[test]
    fn test_seeker_role_fields_accepted() {
        assert!(seeker_input().validate_role_fields().is_ok());
    }

    #[test]
    fn test_seeker_missing_name_rejected() {
        let mut input = seeker_input();
        input.last_name = None;
        assert!(matches!(
            input.validate_role_fields(),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_seeker_with_employer_fields_rejected() {
        let mut input = seeker_input();
        input.company_name = Some("Acme".into());
        assert!(matches!(
            input.validate_role_fields(),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_employer_role_fields_enforced() {
        let mut input = seeker_input();
        input.role = Role::Employer;
        // still carries seeker fields, lacks employer fields
        assert!(input.validate_role_fields().is_err());

        input.first_name = None;
        input.last_name = None;
        input.company_name = Some("Acme".into());
        input.website = Some("https://acme.example".into());
        input.contact_info = Some("hr@acme.example".into());
        assert!(input.validate_role_fields().is_ok());
    }
}
