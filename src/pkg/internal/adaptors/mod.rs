pub mod applications;
pub mod jobs;
pub mod users;

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tracing_test::traced_test;

    use crate::{
        pkg::{
            internal::{
                adaptors::{
                    applications::{
                        mutators::{ApplicationMutator, CreateApplicationData},
                        selectors::ApplicationSelector,
                    },
                    jobs::{
                        mutators::{CreateJobData, JobMutator},
                        selectors::JobSelector,
                    },
                    users::{
                        mutators::{CreateUserData, UserMutator},
                        selectors::UserSelector,
                        spec::{Role, UserEntry},
                    },
                },
                password,
            },
            server::state::{AppState, GetTxn},
        },
        prelude::{Error, Result},
    };

    async fn register(state: &AppState, email: &str, role: Role) -> Result<UserEntry> {
        let mut tx = state.db_pool.begin_txn().await?;
        let (first_name, last_name, company_name, website, contact_info) = match role {
            Role::JobSeeker => (
                Some("Test".to_string()),
                Some("Seeker".to_string()),
                None,
                None,
                None,
            ),
            Role::Employer => (
                None,
                None,
                Some("Test Corp".to_string()),
                Some("https://test.example".to_string()),
                Some("hr@test.example".to_string()),
            ),
        };
        let user = UserMutator::new(&mut tx)
            .create(CreateUserData {
                username: email.split('@').next().unwrap_or("user").to_string(),
                email: email.to_string(),
                password_hash: password::hash("a-test-password1")?,
                role,
                phone_number: "555-0100".to_string(),
                address: "1 Main St".to_string(),
                first_name,
                last_name,
                company_name,
                website,
                contact_info,
            })
            .await?;
        tx.commit().await?;
        Ok(user)
    }

    fn sample_job(employer_id: i32) -> CreateJobData {
        CreateJobData {
            employer_id,
            title: "Backend Engineer".to_string(),
            description: "Build the data-access layer".to_string(),
            requirements: "Rust, Postgres".to_string(),
            salary: "90k-120k".to_string(),
            location: "Remote".to_string(),
            job_type: "full_time".to_string(),
            application_deadline: NaiveDate::from_ymd_opt(2027, 1, 31).unwrap(),
            skills_required: "sqlx, axum".to_string(),
            preferred_qualifications: "open source work".to_string(),
        }
    }

    fn sample_application(job_id: i32, employer_id: i32, user_id: i32) -> CreateApplicationData {
        CreateApplicationData {
            job_id,
            employer_id,
            user_id,
            years_of_experience: Some(3),
            resume: "resume text".to_string(),
            cover_letter: "cover letter".to_string(),
            status: "pending".to_string(),
            name: "Test Seeker".to_string(),
            school_name: "State University".to_string(),
            portfolio: "https://seeker.example".to_string(),
            skills: "rust".to_string(),
        }
    }

    #[tokio::test]
    #[traced_test]
    #[ignore = "needs a running postgres with migrations applied"]
    async fn test_duplicate_application_rejected() -> Result<()> {
        let state = AppState::new().await?;
        let employer = register(&state, "dup-employer@test.example", Role::Employer).await?;
        let seeker = register(&state, "dup-seeker@test.example", Role::JobSeeker).await?;

        let mut tx = state.db_pool.begin_txn().await?;
        let job = JobMutator::new(&mut tx).create(sample_job(employer.id)).await?;
        ApplicationMutator::new(&mut tx)
            .create(sample_application(job.id, employer.id, seeker.id))
            .await?;
        tx.commit().await?;

        let mut tx = state.db_pool.begin_txn().await?;
        let second = ApplicationMutator::new(&mut tx)
            .create(sample_application(job.id, employer.id, seeker.id))
            .await;
        assert!(matches!(second, Err(Error::Duplicate(_))));
        drop(tx);

        let mut conn = state.db_pool.acquire().await?;
        let remaining = ApplicationSelector::new(&mut conn).get_by_job(job.id).await?;
        assert_eq!(remaining.len(), 1);
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    #[ignore = "needs a running postgres with migrations applied"]
    async fn test_update_status_miss_returns_none() -> Result<()> {
        let state = AppState::new().await?;
        let mut tx = state.db_pool.begin_txn().await?;
        let updated = ApplicationMutator::new(&mut tx)
            .update_status(-1, "accepted")
            .await?;
        assert!(updated.is_none());
        Ok(())
    }

    // register employer -> post job -> register seeker -> apply -> accept ->
    // delete job cascades the application away
    #[tokio::test]
    #[traced_test]
    #[ignore = "needs a running postgres with migrations applied"]
    async fn test_full_application_lifecycle() -> Result<()> {
        let state = AppState::new().await?;
        let employer = register(&state, "e2e-employer@test.example", Role::Employer).await?;
        let seeker = register(&state, "e2e-seeker@test.example", Role::JobSeeker).await?;

        let mut tx = state.db_pool.begin_txn().await?;
        let job = JobMutator::new(&mut tx).create(sample_job(employer.id)).await?;
        let application = ApplicationMutator::new(&mut tx)
            .create(sample_application(job.id, employer.id, seeker.id))
            .await?;
        tx.commit().await?;
        assert_eq!(application.status, "pending");

        let mut tx = state.db_pool.begin_txn().await?;
        let accepted = ApplicationMutator::new(&mut tx)
            .update_status(application.id, "accepted")
            .await?
            .expect("application should exist");
        tx.commit().await?;
        assert_eq!(accepted.status, "accepted");

        // cascade: applications first, then the job, one transaction
        let mut tx = state.db_pool.begin_txn().await?;
        ApplicationMutator::new(&mut tx).delete_by_job(job.id).await?;
        assert!(JobMutator::new(&mut tx).delete(job.id).await?);
        tx.commit().await?;

        let mut conn = state.db_pool.acquire().await?;
        assert!(JobSelector::new(&mut conn).get_by_id(job.id).await?.is_none());
        let orphans = ApplicationSelector::new(&mut conn).get_by_job(job.id).await?;
        assert!(orphans.is_empty());
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    #[ignore = "needs a running postgres with migrations applied"]
    async fn test_login_is_uniform_on_failure() -> Result<()> {
        let state = AppState::new().await?;
        let user = register(&state, "login-seeker@test.example", Role::JobSeeker).await?;

        let mut conn = state.db_pool.acquire().await?;
        let mut selector = UserSelector::new(&mut conn);
        assert!(selector
            .login("login-seeker@test.example", "a-test-password1")
            .await?
            .is_some());
        assert!(selector
            .login("login-seeker@test.example", "wrong-password")
            .await?
            .is_none());
        assert!(selector
            .login("nobody@test.example", "a-test-password1")
            .await?
            .is_none());
        assert!(!user.password_hash.contains("a-test-password1"));
        Ok(())
    }
}
