use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationEntry {
    pub id: i32,
    pub job_id: i32,
    // snapshot taken at submission time, not re-derived from the job
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
