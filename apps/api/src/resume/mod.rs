//! Resume Context: the server-side mirror of each user's resume.
//!
//! Reads go through the session cache before the document store. Writes are
//! version-checked; a wizard-step save that loses a race is re-applied once
//! onto the latest document before the conflict is reported.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::models::resume::{ResumeData, StoredResume};
use crate::session::{resume_key, SessionStore};
use crate::store::DocumentStore;

pub mod export;
pub mod handlers;
pub mod sections;
pub mod validation;

use sections::SectionUpdate;

#[derive(Clone)]
pub struct ResumeContext {
    store: Arc<dyn DocumentStore>,
    sessions: Arc<dyn SessionStore>,
    ttl: Duration,
}

impl ResumeContext {
    pub fn new(store: Arc<dyn DocumentStore>, sessions: Arc<dyn SessionStore>, ttl: Duration) -> Self {
        Self {
            store,
            sessions,
            ttl,
        }
    }

    /// Current resume for `uid`, cache first.
    pub async fn load(&self, uid: &str) -> Result<Option<StoredResume>, AppError> {
        let key = resume_key(uid);
        match self.sessions.get(&key).await {
            Ok(Some(raw)) => match serde_json::from_str::<StoredResume>(&raw) {
                Ok(stored) => {
                    debug!("Resume cache hit for user {uid}");
                    return Ok(Some(stored));
                }
                Err(e) => warn!("Discarding unreadable cached resume for user {uid}: {e}"),
            },
            Ok(None) => {}
            Err(e) => warn!("Session cache read failed for user {uid}: {e}"),
        }

        let stored = self.store.get_resume(uid).await?;
        if let Some(stored) = &stored {
            self.remember(uid, stored).await;
        }
        Ok(stored)
    }

    /// Replaces the whole document. `expected_version = None` creates it.
    pub async fn save(
        &self,
        uid: &str,
        resume: &ResumeData,
        expected_version: Option<i32>,
    ) -> Result<StoredResume, AppError> {
        validation::validate_resume(resume)?;
        match self.store.save_resume(uid, resume, expected_version).await {
            Ok(stored) => {
                self.remember(uid, &stored).await;
                Ok(stored)
            }
            Err(err @ AppError::Conflict { .. }) => {
                self.forget(uid).await;
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Saves one wizard section.
    ///
    /// `expected_version` is the version the client last saw; when absent the
    /// latest known version is used. On a conflict the section is re-applied
    /// to a freshly fetched document and saved once more.
    pub async fn save_section(
        &self,
        uid: &str,
        update: &SectionUpdate,
        expected_version: Option<i32>,
    ) -> Result<StoredResume, AppError> {
        update.validate()?;

        let current = self.load(uid).await?;
        let expected = expected_version.or(current.as_ref().map(|s| s.version));
        let mut resume = current.map(|s| s.resume).unwrap_or_default();
        update.apply(&mut resume);

        match self.store.save_resume(uid, &resume, expected).await {
            Ok(stored) => {
                self.remember(uid, &stored).await;
                Ok(stored)
            }
            Err(AppError::Conflict { expected, current }) => {
                warn!(
                    "Section '{}' save for user {uid} conflicted (expected {expected:?}, current {current:?}); retrying on latest",
                    update.name()
                );
                self.forget(uid).await;

                let latest = self.store.get_resume(uid).await?;
                let retry_version = latest.as_ref().map(|s| s.version);
                let mut resume = latest.map(|s| s.resume).unwrap_or_default();
                update.apply(&mut resume);

                let stored = self.store.save_resume(uid, &resume, retry_version).await?;
                info!(
                    "Section '{}' for user {uid} saved on retry at version {}",
                    update.name(),
                    stored.version
                );
                self.remember(uid, &stored).await;
                Ok(stored)
            }
            Err(err) => Err(err),
        }
    }

    pub async fn list(&self, uid: &str) -> Result<Vec<StoredResume>, AppError> {
        self.store.list_resumes(uid).await
    }

    async fn remember(&self, uid: &str, stored: &StoredResume) {
        let raw = match serde_json::to_string(stored) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Could not serialize resume for cache: {e}");
                return;
            }
        };
        if let Err(e) = self.sessions.put(&resume_key(uid), raw, self.ttl).await {
            warn!("Session cache write failed for user {uid}: {e}");
        }
    }

    async fn forget(&self, uid: &str) {
        if let Err(e) = self.sessions.remove(&resume_key(uid)).await {
            warn!("Session cache eviction failed for user {uid}: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::PersonalInfo;
    use crate::session::memory::MemorySessionStore;
    use crate::store::memory::MemoryStore;

    const UID: &str = "user-1";

    fn context() -> (ResumeContext, Arc<MemoryStore>, Arc<MemorySessionStore>) {
        let store = Arc::new(MemoryStore::default());
        let sessions = Arc::new(MemorySessionStore::new());
        let ctx = ResumeContext::new(store.clone(), sessions.clone(), Duration::from_secs(600));
        (ctx, store, sessions)
    }

    fn skills(list: &[&str]) -> SectionUpdate {
        SectionUpdate::Skills(list.iter().map(|s| s.to_string()).collect())
    }

    #[tokio::test]
    async fn test_first_section_creates_document() {
        let (ctx, _, _) = context();
        let stored = ctx.save_section(UID, &skills(&["Rust"]), None).await.unwrap();
        assert_eq!(stored.version, 1);
        assert_eq!(stored.resume.skills, vec!["Rust"]);
    }

    #[tokio::test]
    async fn test_sections_accumulate() {
        let (ctx, _, _) = context();
        let v1 = ctx.save_section(UID, &skills(&["Rust"]), None).await.unwrap();
        let personal = SectionUpdate::Personal(PersonalInfo {
            full_name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            ..Default::default()
        });
        let v2 = ctx
            .save_section(UID, &personal, Some(v1.version))
            .await
            .unwrap();

        assert_eq!(v2.version, 2);
        assert_eq!(v2.resume.skills, vec!["Rust"]);
        assert_eq!(v2.resume.personal_info.full_name, "Ada");
    }

    #[tokio::test]
    async fn test_stale_section_save_retries_on_latest() {
        let (ctx, store, _) = context();
        let v1 = ctx.save_section(UID, &skills(&["Rust"]), None).await.unwrap();

        // Another tab saves a different section in between.
        let mut other = v1.resume.clone();
        other.template = "classic".to_string();
        store.bump_resume(UID, other).await;

        let stored = ctx
            .save_section(UID, &skills(&["Rust", "SQL"]), Some(v1.version))
            .await
            .unwrap();

        assert_eq!(stored.version, 3);
        assert_eq!(stored.resume.skills, vec!["Rust", "SQL"]);
        assert_eq!(stored.resume.template, "classic");
    }

    #[tokio::test]
    async fn test_full_save_with_stale_version_conflicts() {
        let (ctx, _, _) = context();
        let v1 = ctx.save(UID, &ResumeData::default(), None).await.unwrap();
        ctx.save(UID, &ResumeData::default(), Some(v1.version))
            .await
            .unwrap();

        let err = ctx
            .save(UID, &ResumeData::default(), Some(v1.version))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Conflict {
                expected: Some(1),
                current: Some(2)
            }
        ));
    }

    #[tokio::test]
    async fn test_create_twice_conflicts() {
        let (ctx, _, _) = context();
        ctx.save(UID, &ResumeData::default(), None).await.unwrap();
        let err = ctx
            .save(UID, &ResumeData::default(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict { expected: None, .. }));
    }

    #[tokio::test]
    async fn test_load_fills_and_uses_cache() {
        let (ctx, store, sessions) = context();
        store
            .save_resume(UID, &ResumeData::default(), None)
            .await
            .unwrap();
        assert!(sessions.get(&resume_key(UID)).await.unwrap().is_none());

        let loaded = ctx.load(UID).await.unwrap().unwrap();
        assert_eq!(loaded.version, 1);
        assert!(sessions.get(&resume_key(UID)).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_invalid_section_is_not_saved() {
        let (ctx, store, _) = context();
        let personal = SectionUpdate::Personal(PersonalInfo::default());
        assert!(ctx.save_section(UID, &personal, None).await.is_err());
        assert!(store.get_resume(UID).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_load_missing_resume() {
        let (ctx, _, _) = context();
        assert!(ctx.load(UID).await.unwrap().is_none());
    }
}
