use sqlx::PgConnection;

use crate::{
    pkg::internal::adaptors::applications::spec::ApplicationEntry,
    prelude::{Error, Result},
};

pub struct CreateApplicationData {
    pub job_id: i32,
    pub employer_id: i32,
    pub user_id: i32,
    pub years_of_experience: Option<i32>,
    pub resume: String,
    pub cover_letter: String,
    pub status: String,
    pub name: String,
    pub school_name: String,
    pub portfolio: String,
    pub skills: String,
}

pub struct ApplicationMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ApplicationMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ApplicationMutator { pool }
    }

    /// Inserts an application. One application per (user, job) pair is
    /// enforced by the store's unique constraint, so concurrent submissions
    /// cannot slip past a read-then-write check.
    pub async fn create(&mut self, data: CreateApplicationData) -> Result<ApplicationEntry> {
        let row = sqlx::query_as::<_, ApplicationEntry>(
            r#"
            INSERT INTO applications (job_id, employer_id, user_id, years_of_experience, resume,
                                      cover_letter, status, name, school_name, portfolio, skills)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, job_id, employer_id, user_id, years_of_experience, resume,
                      cover_letter, status, name, school_name, portfolio, skills,
                      created_at, updated_at
            "#,
        )
        .bind(data.job_id)
        .bind(data.employer_id)
        .bind(data.user_id)
        .bind(data.years_of_experience)
        .bind(&data.resume)
        .bind(&data.cover_letter)
        .bind(&data.status)
        .bind(&data.name)
        .bind(&data.school_name)
        .bind(&data.portfolio)
        .bind(&data.skills)
        .fetch_one(&mut *self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Error::Duplicate("application")
            }
            _ => Error::Database(e),
        })?;
        Ok(row)
    }

    pub async fn update_status(
        &mut self,
        id: i32,
        status: &str,
    ) -> Result<Option<ApplicationEntry>> {
        let row = sqlx::query_as::<_, ApplicationEntry>(
            r#"
            UPDATE applications SET status = $2, updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING id, job_id, employer_id, user_id, years_of_experience, resume,
                      cover_letter, status, name, school_name, portfolio, skills,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(&mut self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(&mut *self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_by_job(&mut self, job_id: i32) -> Result<u64> {
        let result = sqlx::query("DELETE FROM applications WHERE job_id = $1")
            .bind(job_id)
            .execute(&mut *self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
