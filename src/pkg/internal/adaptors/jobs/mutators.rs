use chrono::NaiveDate;
use sqlx::PgConnection;

use crate::{pkg::internal::adaptors::jobs::spec::JobEntry, prelude::Result};

pub struct CreateJobData {
    pub employer_id: i32,
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

/// Replacement values for a job update. Every mutable field is overwritten;
/// a caller that wants to keep a field must resend it. `employer_id` never
/// changes after creation.
pub struct UpdateJobData {
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

pub struct JobMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobMutator { pool }
    }

    pub async fn create(&mut self, job: CreateJobData) -> Result<JobEntry> {
        let row = sqlx::query_as::<_, JobEntry>(
            r#"
            INSERT INTO jobs (employer_id, title, description, requirements, salary, location,
                              job_type, application_deadline, skills_required, preferred_qualifications)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, employer_id, title, description, requirements, salary, location,
                      job_type, application_deadline, skills_required, preferred_qualifications,
                      created_at, updated_at
            "#,
        )
        .bind(job.employer_id)
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.requirements)
        .bind(&job.salary)
        .bind(&job.location)
        .bind(&job.job_type)
        .bind(job.application_deadline)
        .bind(&job.skills_required)
        .bind(&job.preferred_qualifications)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&mut self, id: i32, job: UpdateJobData) -> Result<Option<JobEntry>> {
        let row = sqlx::query_as::<_, JobEntry>(
            r#"
            UPDATE jobs
            SET title = $2, description = $3, requirements = $4, salary = $5, location = $6,
                job_type = $7, application_deadline = $8, skills_required = $9,
                preferred_qualifications = $10, updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING id, employer_id, title, description, requirements, salary, location,
                      job_type, application_deadline, skills_required, preferred_qualifications,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.requirements)
        .bind(&job.salary)
        .bind(&job.location)
        .bind(&job.job_type)
        .bind(job.application_deadline)
        .bind(&job.skills_required)
        .bind(&job.preferred_qualifications)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(&mut self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&mut *self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
