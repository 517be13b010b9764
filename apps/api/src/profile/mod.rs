//! Candidate profiles and account info.

use crate::errors::AppError;
use crate::models::profile::CandidateProfile;
use crate::state::AppState;

pub mod handlers;

/// The caller's stored profile, or one derived from their resume.
pub async fn resolve_candidate(state: &AppState, uid: &str) -> Result<CandidateProfile, AppError> {
    if let Some(profile) = state.store.get_profile(uid).await? {
        return Ok(profile);
    }
    let resume = state.resumes.load(uid).await?;
    Ok(resume
        .map(|stored| CandidateProfile::from_resume(&stored.resume))
        .unwrap_or_default())
}
