use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobEntry {
    pub id: i32,
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
