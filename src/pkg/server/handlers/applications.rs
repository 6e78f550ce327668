use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;

use crate::{
    pkg::{
        internal::{
            adaptors::{
                applications::{
                    mutators::{ApplicationMutator, CreateApplicationData},
                    selectors::ApplicationSelector,
                    spec::ApplicationEntry,
                },
                users::spec::Role,
            },
            token::Identity,
        },
        server::state::{AppState, GetTxn},
    },
    prelude::{Error, Result},
};

#[derive(Deserialize)]
pub struct CreateApplicationInput {
    pub job_id: i32,
    // trusted as submitted, not re-derived from the job record
    pub employer_id: i32,
    pub years_of_experience: Option<i32>,
    pub resume: String,
    pub cover_letter: String,
    pub status: Option<String>,
    pub name: String,
    pub school_name: String,
    pub portfolio: String,
    pub skills: String,
}

#[derive(Deserialize)]
pub struct UpdateStatusInput {
    pub status: Option<String>,
}

pub async fn create(
    State(state): State<AppState>,
    Extension(identity): Extension<Arc<Identity>>,
    Json(input): Json<CreateApplicationInput>,
) -> Result<(StatusCode, Json<ApplicationEntry>)> {
    let mut tx = state.db_pool.begin_txn().await?;
    let application = ApplicationMutator::new(&mut tx)
        .create(CreateApplicationData {
            job_id: input.job_id,
            employer_id: input.employer_id,
            user_id: identity.id,
            years_of_experience: input.years_of_experience,
            resume: input.resume,
            cover_letter: input.cover_letter,
            status: input.status.unwrap_or_else(|| "pending".to_string()),
            name: input.name,
            school_name: input.school_name,
            portfolio: input.portfolio,
            skills: input.skills,
        })
        .await?;
    tx.commit().await?;
    tracing::info!(
        "application {} submitted by user {} for job {}",
        application.id,
        identity.id,
        application.job_id
    );
    Ok((StatusCode::CREATED, Json(application)))
}

/// Employers see applications against their postings; job seekers see their
/// own submissions. Both are keyed by the caller's own token identity.
pub async fn list(
    State(state): State<AppState>,
    Extension(identity): Extension<Arc<Identity>>,
) -> Result<Json<Vec<ApplicationEntry>>> {
    let mut conn = state.db_pool.acquire().await?;
    let applications = ApplicationSelector::new(&mut conn)
        .get_for(identity.id, identity.role)
        .await?;
    Ok(Json(applications))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Extension(_identity): Extension<Arc<Identity>>,
    Path(id): Path<i32>,
) -> Result<Json<ApplicationEntry>> {
    let mut conn = state.db_pool.acquire().await?;
    let application = ApplicationSelector::new(&mut conn)
        .get_by_id(id)
        .await?
        .ok_or(Error::NotFound)?;
    Ok(Json(application))
}

/// Only the status field is mutated, and only when present in the payload;
/// without it the current record is returned unchanged. Employer-only.
pub async fn update_status(
    State(state): State<AppState>,
    Extension(identity): Extension<Arc<Identity>>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateStatusInput>,
) -> Result<Json<ApplicationEntry>> {
    if identity.role != Role::Employer {
        return Err(Error::Validation(
            "only employers can update application status".to_string(),
        ));
    }
    let application = match input.status {
        Some(status) => {
            let mut tx = state.db_pool.begin_txn().await?;
            let updated = ApplicationMutator::new(&mut tx)
                .update_status(id, &status)
                .await?;
            tx.commit().await?;
            updated
        }
        None => {
            let mut conn = state.db_pool.acquire().await?;
            ApplicationSelector::new(&mut conn).get_by_id(id).await?
        }
    };
    Ok(Json(application.ok_or(Error::NotFound)?))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(_identity): Extension<Arc<Identity>>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    let mut tx = state.db_pool.begin_txn().await?;
    if !ApplicationMutator::new(&mut tx).delete(id).await? {
        return Err(Error::NotFound);
    }
    tx.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}
