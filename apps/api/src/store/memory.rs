use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::job::{JobDetails, JobPosting};
use crate::models::profile::CandidateProfile;
use crate::models::resume::{ResumeData, StoredResume};
use crate::models::user::UserAccount;
use crate::store::DocumentStore;

/// In-process store with the same version semantics as `PgStore`.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, UserAccount>>,
    resumes: RwLock<HashMap<String, StoredResume>>,
    profiles: RwLock<HashMap<String, CandidateProfile>>,
    jobs: RwLock<Vec<JobPosting>>,
}

impl MemoryStore {
    /// Bumps a stored resume behind the caller's back, as a second tab would.
    pub async fn bump_resume(&self, uid: &str, resume: ResumeData) {
        let mut resumes = self.resumes.write().await;
        if let Some(stored) = resumes.get_mut(uid) {
            stored.resume = resume;
            stored.version += 1;
            stored.updated_at = Utc::now();
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn upsert_user(&self, user: &AuthUser) -> Result<UserAccount, AppError> {
        let now = Utc::now();
        let mut users = self.users.write().await;
        let account = users
            .entry(user.uid.clone())
            .or_insert_with(|| UserAccount {
                uid: user.uid.clone(),
                email: None,
                name: None,
                created_at: now,
                last_seen_at: now,
            });
        if user.email.is_some() {
            account.email = user.email.clone();
        }
        if user.name.is_some() {
            account.name = user.name.clone();
        }
        account.last_seen_at = now;
        Ok(account.clone())
    }

    async fn get_resume(&self, uid: &str) -> Result<Option<StoredResume>, AppError> {
        Ok(self.resumes.read().await.get(uid).cloned())
    }

    async fn save_resume(
        &self,
        uid: &str,
        resume: &ResumeData,
        expected_version: Option<i32>,
    ) -> Result<StoredResume, AppError> {
        let mut resumes = self.resumes.write().await;
        let current = resumes.get(uid).map(|r| r.version);
        let now = Utc::now();

        let stored = match (expected_version, resumes.get(uid)) {
            (None, None) => StoredResume {
                id: Uuid::new_v4(),
                resume: resume.clone(),
                version: 1,
                created_at: now,
                updated_at: now,
            },
            (Some(v), Some(existing)) if existing.version == v => StoredResume {
                resume: resume.clone(),
                version: v + 1,
                updated_at: now,
                ..existing.clone()
            },
            _ => {
                return Err(AppError::Conflict {
                    expected: expected_version,
                    current,
                })
            }
        };

        resumes.insert(uid.to_string(), stored.clone());
        Ok(stored)
    }

    async fn list_resumes(&self, uid: &str) -> Result<Vec<StoredResume>, AppError> {
        Ok(self.resumes.read().await.get(uid).cloned().into_iter().collect())
    }

    async fn get_profile(&self, uid: &str) -> Result<Option<CandidateProfile>, AppError> {
        Ok(self.profiles.read().await.get(uid).cloned())
    }

    async fn put_profile(
        &self,
        uid: &str,
        profile: &CandidateProfile,
    ) -> Result<CandidateProfile, AppError> {
        self.profiles
            .write()
            .await
            .insert(uid.to_string(), profile.clone());
        Ok(profile.clone())
    }

    async fn create_job(
        &self,
        recruiter_uid: &str,
        details: &JobDetails,
    ) -> Result<JobPosting, AppError> {
        let job = JobPosting {
            id: Uuid::new_v4(),
            recruiter_uid: recruiter_uid.to_string(),
            details: details.clone(),
            created_at: Utc::now(),
        };
        self.jobs.write().await.push(job.clone());
        Ok(job)
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<JobPosting>, AppError> {
        Ok(self.jobs.read().await.iter().find(|j| j.id == id).cloned())
    }

    async fn list_jobs(&self) -> Result<Vec<JobPosting>, AppError> {
        let mut jobs = self.jobs.read().await.clone();
        jobs.reverse();
        Ok(jobs)
    }
}
