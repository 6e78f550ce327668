use sqlx::PgConnection;

use crate::{pkg::internal::adaptors::jobs::spec::JobEntry, prelude::Result};

const JOB_COLUMNS: &str = "id, employer_id, title, description, requirements, salary, location, \
     job_type, application_deadline, skills_required, preferred_qualifications, \
     created_at, updated_at";

pub struct JobSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobSelector { pool }
    }

    pub async fn get_by_id(&mut self, id: i32) -> Result<Option<JobEntry>> {
        let row = sqlx::query_as::<_, JobEntry>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get_all(&mut self) -> Result<Vec<JobEntry>> {
        let rows = sqlx::query_as::<_, JobEntry>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs ORDER BY created_at DESC"
        ))
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_employer(&mut self, employer_id: i32) -> Result<Vec<JobEntry>> {
        let rows = sqlx::query_as::<_, JobEntry>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE employer_id = $1 ORDER BY created_at DESC"
        ))
        .bind(employer_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }
}
