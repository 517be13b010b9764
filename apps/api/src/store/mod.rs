//! Resume Data Store: document persistence behind a trait.
//!
//! `PgStore` keeps one JSONB document per user and per job posting. Resume
//! writes carry an optimistic-concurrency token: a write names the version it
//! was based on and fails with `AppError::Conflict` when the stored version
//! has moved on.

use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::job::{JobDetails, JobPosting};
use crate::models::profile::CandidateProfile;
use crate::models::resume::{ResumeData, StoredResume};
use crate::models::user::UserAccount;

pub mod postgres;

#[cfg(test)]
pub mod memory;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts the account or refreshes its email, name and last-seen time.
    async fn upsert_user(&self, user: &AuthUser) -> Result<UserAccount, AppError>;

    async fn get_resume(&self, uid: &str) -> Result<Option<StoredResume>, AppError>;

    /// `expected_version = None` creates the document and conflicts if one
    /// exists. `Some(v)` replaces it only while the stored version is `v`.
    async fn save_resume(
        &self,
        uid: &str,
        resume: &ResumeData,
        expected_version: Option<i32>,
    ) -> Result<StoredResume, AppError>;

    async fn list_resumes(&self, uid: &str) -> Result<Vec<StoredResume>, AppError>;

    async fn get_profile(&self, uid: &str) -> Result<Option<CandidateProfile>, AppError>;

    async fn put_profile(
        &self,
        uid: &str,
        profile: &CandidateProfile,
    ) -> Result<CandidateProfile, AppError>;

    async fn create_job(
        &self,
        recruiter_uid: &str,
        details: &JobDetails,
    ) -> Result<JobPosting, AppError>;

    async fn get_job(&self, id: Uuid) -> Result<Option<JobPosting>, AppError>;

    async fn list_jobs(&self) -> Result<Vec<JobPosting>, AppError>;
}
