use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::job::{JobDetails, JobPosting, JobRow};
use crate::models::profile::CandidateProfile;
use crate::models::resume::{ResumeData, ResumeRow, StoredResume};
use crate::models::user::UserAccount;
use crate::store::DocumentStore;

/// Postgres-backed document store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn current_version(&self, uid: &str) -> Result<Option<i32>, AppError> {
        Ok(
            sqlx::query_scalar("SELECT version FROM resumes WHERE user_uid = $1")
                .bind(uid)
                .fetch_optional(&self.pool)
                .await?,
        )
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn upsert_user(&self, user: &AuthUser) -> Result<UserAccount, AppError> {
        Ok(sqlx::query_as::<_, UserAccount>(
            r#"
            INSERT INTO users (uid, email, name)
            VALUES ($1, $2, $3)
            ON CONFLICT (uid) DO UPDATE
                SET email = COALESCE(EXCLUDED.email, users.email),
                    name = COALESCE(EXCLUDED.name, users.name),
                    last_seen_at = now()
            RETURNING *
            "#,
        )
        .bind(&user.uid)
        .bind(&user.email)
        .bind(&user.name)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn get_resume(&self, uid: &str) -> Result<Option<StoredResume>, AppError> {
        let row = sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE user_uid = $1")
            .bind(uid)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(StoredResume::from))
    }

    async fn save_resume(
        &self,
        uid: &str,
        resume: &ResumeData,
        expected_version: Option<i32>,
    ) -> Result<StoredResume, AppError> {
        let row = match expected_version {
            None => {
                sqlx::query_as::<_, ResumeRow>(
                    r#"
                    INSERT INTO resumes (id, user_uid, data, version)
                    VALUES ($1, $2, $3, 1)
                    ON CONFLICT (user_uid) DO NOTHING
                    RETURNING *
                    "#,
                )
                .bind(Uuid::new_v4())
                .bind(uid)
                .bind(Json(resume))
                .fetch_optional(&self.pool)
                .await?
            }
            Some(version) => {
                // Conditional write: the version check and bump happen in one statement.
                sqlx::query_as::<_, ResumeRow>(
                    r#"
                    UPDATE resumes
                    SET data = $1, version = version + 1, updated_at = now()
                    WHERE user_uid = $2 AND version = $3
                    RETURNING *
                    "#,
                )
                .bind(Json(resume))
                .bind(uid)
                .bind(version)
                .fetch_optional(&self.pool)
                .await?
            }
        };

        match row {
            Some(row) => {
                info!("Saved resume for user {uid} at version {}", row.version);
                Ok(row.into())
            }
            None => Err(AppError::Conflict {
                expected: expected_version,
                current: self.current_version(uid).await?,
            }),
        }
    }

    async fn list_resumes(&self, uid: &str) -> Result<Vec<StoredResume>, AppError> {
        let rows = sqlx::query_as::<_, ResumeRow>(
            "SELECT * FROM resumes WHERE user_uid = $1 ORDER BY updated_at DESC",
        )
        .bind(uid)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(StoredResume::from).collect())
    }

    async fn get_profile(&self, uid: &str) -> Result<Option<CandidateProfile>, AppError> {
        let data: Option<Json<CandidateProfile>> =
            sqlx::query_scalar("SELECT data FROM candidate_profiles WHERE user_uid = $1")
                .bind(uid)
                .fetch_optional(&self.pool)
                .await?;
        Ok(data.map(|d| d.0))
    }

    async fn put_profile(
        &self,
        uid: &str,
        profile: &CandidateProfile,
    ) -> Result<CandidateProfile, AppError> {
        sqlx::query(
            r#"
            INSERT INTO candidate_profiles (user_uid, data)
            VALUES ($1, $2)
            ON CONFLICT (user_uid) DO UPDATE
                SET data = EXCLUDED.data, updated_at = now()
            "#,
        )
        .bind(uid)
        .bind(Json(profile))
        .execute(&self.pool)
        .await?;
        Ok(profile.clone())
    }

    async fn create_job(
        &self,
        recruiter_uid: &str,
        details: &JobDetails,
    ) -> Result<JobPosting, AppError> {
        let row = sqlx::query_as::<_, JobRow>(
            r#"
            INSERT INTO jobs (id, recruiter_uid, data)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(recruiter_uid)
        .bind(Json(details))
        .fetch_one(&self.pool)
        .await?;

        info!("Created job {} for recruiter {recruiter_uid}", row.id);
        Ok(row.into())
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<JobPosting>, AppError> {
        let row = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(JobPosting::from))
    }

    async fn list_jobs(&self) -> Result<Vec<JobPosting>, AppError> {
        let rows = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(JobPosting::from).collect())
    }
}
