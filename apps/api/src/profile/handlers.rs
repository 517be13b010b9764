use axum::{extract::State, Extension, Json};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::profile::CandidateProfile;
use crate::models::user::UserAccount;
use crate::profile::resolve_candidate;
use crate::resume::validation::validate_skills;
use crate::state::AppState;

const MAX_PREFERENCE_ENTRIES: usize = 10;

/// GET /api/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<CandidateProfile>, AppError> {
    Ok(Json(resolve_candidate(&state, &user.uid).await?))
}

/// PUT /api/profile
pub async fn handle_put_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(profile): Json<CandidateProfile>,
) -> Result<Json<CandidateProfile>, AppError> {
    validate_profile(&profile)?;
    let saved = state.store.put_profile(&user.uid, &profile).await?;
    Ok(Json(saved))
}

/// GET /api/user/profile
///
/// Registers the account on first sight and returns it.
pub async fn handle_user_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserAccount>, AppError> {
    Ok(Json(state.store.upsert_user(&user).await?))
}

fn validate_profile(profile: &CandidateProfile) -> Result<(), AppError> {
    if profile.role.trim().is_empty() {
        return Err(AppError::Validation("role is required".to_string()));
    }
    validate_skills(&profile.skills)?;
    if let Some(prefs) = &profile.preferences {
        if prefs.work_modes.len() > MAX_PREFERENCE_ENTRIES
            || prefs.job_types.len() > MAX_PREFERENCE_ENTRIES
        {
            return Err(AppError::Validation(format!(
                "preferences may list at most {MAX_PREFERENCE_ENTRIES} work modes and job types"
            )));
        }
    }
    Ok(())
}
