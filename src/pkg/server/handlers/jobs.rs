use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    pkg::{
        internal::{
            adaptors::{
                applications::mutators::ApplicationMutator,
                jobs::{
                    mutators::{CreateJobData, JobMutator, UpdateJobData},
                    selectors::JobSelector,
                    spec::JobEntry,
                },
            },
            token::Identity,
        },
        server::state::{AppState, GetTxn},
    },
    prelude::{Error, Result},
};

#[derive(Deserialize, Validate)]
pub struct CreateJobInput {
    pub employer_id: i32,
    #[validate(length(min = 1))]
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub salary: String,
    pub location: String,
    pub job_type: String,
    pub application_deadline: NaiveDate,
    pub skills_required: String,
    pub preferred_qualifications: String,
}

/// Full replacement payload; omitted fields are not preserved.
#[derive(Deserialize, Validate)]
pub struct UpdateJobInput {
    #[validate(length(min = 1))]
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub salary: String,
    pub location: String,
    pub job_type: String,
    pub application_deadline: NaiveDate,
    pub skills_required: String,
    pub preferred_qualifications: String,
}

#[derive(Serialize)]
pub struct CreatedJob {
    pub id: i32,
}

pub async fn create(
    State(state): State<AppState>,
    Extension(_identity): Extension<Arc<Identity>>,
    Json(input): Json<CreateJobInput>,
) -> Result<(StatusCode, Json<CreatedJob>)> {
    input
        .validate()
        .map_err(|e| Error::Validation(e.to_string()))?;
    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobMutator::new(&mut tx)
        .create(CreateJobData {
            employer_id: input.employer_id,
            title: input.title,
            description: input.description,
            requirements: input.requirements,
            salary: input.salary,
            location: input.location,
            job_type: input.job_type,
            application_deadline: input.application_deadline,
            skills_required: input.skills_required,
            preferred_qualifications: input.preferred_qualifications,
        })
        .await?;
    tx.commit().await?;
    tracing::info!("job {} created by employer {}", job.id, job.employer_id);
    Ok((StatusCode::CREATED, Json(CreatedJob { id: job.id })))
}

pub async fn list(
    State(state): State<AppState>,
    Extension(_identity): Extension<Arc<Identity>>,
) -> Result<Json<Vec<JobEntry>>> {
    let mut conn = state.db_pool.acquire().await?;
    let jobs = JobSelector::new(&mut conn).get_all().await?;
    Ok(Json(jobs))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Extension(_identity): Extension<Arc<Identity>>,
    Path(id): Path<i32>,
) -> Result<Json<JobEntry>> {
    let mut conn = state.db_pool.acquire().await?;
    let job = JobSelector::new(&mut conn)
        .get_by_id(id)
        .await?
        .ok_or(Error::NotFound)?;
    Ok(Json(job))
}

pub async fn list_by_employer(
    State(state): State<AppState>,
    Extension(_identity): Extension<Arc<Identity>>,
    Path(employer_id): Path<i32>,
) -> Result<Json<Vec<JobEntry>>> {
    let mut conn = state.db_pool.acquire().await?;
    let jobs = JobSelector::new(&mut conn)
        .get_by_employer(employer_id)
        .await?;
    Ok(Json(jobs))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(_identity): Extension<Arc<Identity>>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateJobInput>,
) -> Result<Json<JobEntry>> {
    input
        .validate()
        .map_err(|e| Error::Validation(e.to_string()))?;
    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobMutator::new(&mut tx)
        .update(
            id,
            UpdateJobData {
                title: input.title,
                description: input.description,
                requirements: input.requirements,
                salary: input.salary,
                location: input.location,
                job_type: input.job_type,
                application_deadline: input.application_deadline,
                skills_required: input.skills_required,
                preferred_qualifications: input.preferred_qualifications,
            },
        )
        .await?
        .ok_or(Error::NotFound)?;
    tx.commit().await?;
    Ok(Json(job))
}

/// Deletes a job and every application against it in one transaction; either
/// both go or neither does.
pub async fn delete(
    State(state): State<AppState>,
    Extension(_identity): Extension<Arc<Identity>>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    let mut tx = state.db_pool.begin_txn().await?;
    let removed = ApplicationMutator::new(&mut tx).delete_by_job(id).await?;
    if !JobMutator::new(&mut tx).delete(id).await? {
        // dropping the transaction rolls the application deletes back
        return Err(Error::NotFound);
    }
    tx.commit().await?;
    tracing::info!("job {} deleted along with {} applications", id, removed);
    Ok(StatusCode::NO_CONTENT)
}
