use sqlx::PgConnection;

use crate::{
    pkg::internal::adaptors::{applications::spec::ApplicationEntry, users::spec::Role},
    prelude::Result,
};

const APPLICATION_COLUMNS: &str = "id, job_id, employer_id, user_id, years_of_experience, resume, \
     cover_letter, status, name, school_name, portfolio, skills, created_at, updated_at";

pub struct ApplicationSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ApplicationSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ApplicationSelector { pool }
    }

    pub async fn get_by_id(&mut self, id: i32) -> Result<Option<ApplicationEntry>> {
        let row = sqlx::query_as::<_, ApplicationEntry>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    /// Applications visible to a caller: employers see submissions against
    /// their postings, everyone else sees their own submissions.
    pub async fn get_for(&mut self, user_id: i32, role: Role) -> Result<Vec<ApplicationEntry>> {
        let column = match role {
            Role::Employer => "employer_id",
            Role::JobSeeker => "user_id",
        };
        let rows = sqlx::query_as::<_, ApplicationEntry>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE {column} = $1 \
             ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_job(&mut self, job_id: i32) -> Result<Vec<ApplicationEntry>> {
        let rows = sqlx::query_as::<_, ApplicationEntry>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE job_id = $1"
        ))
        .bind(job_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }
}
