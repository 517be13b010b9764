//! Axum route handlers for job postings and matching.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::matching::{calculate_match, rank_jobs, MatchResult, RankedJob};
use crate::models::job::{JobDetails, JobPosting};
use crate::profile::resolve_candidate;
use crate::state::AppState;

const MAX_REQUIRED_SKILLS: usize = 50;

/// POST /api/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(details): Json<JobDetails>,
) -> Result<(StatusCode, Json<JobPosting>), AppError> {
    validate_job(&details)?;
    let job = state.store.create_job(&user.uid, &details).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<JobPosting>>, AppError> {
    Ok(Json(state.store.list_jobs().await?))
}

/// GET /api/jobs/:id/match
pub async fn handle_job_match(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<MatchResult>, AppError> {
    let job = state
        .store
        .get_job(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
    let candidate = resolve_candidate(&state, &user.uid).await?;
    Ok(Json(calculate_match(&candidate, &job.details)))
}

/// GET /api/jobs/matches
///
/// Every posting scored for the caller, best first.
pub async fn handle_ranked_matches(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<RankedJob>>, AppError> {
    let candidate = resolve_candidate(&state, &user.uid).await?;
    let jobs = state.store.list_jobs().await?;
    Ok(Json(rank_jobs(&candidate, &jobs)))
}

fn validate_job(details: &JobDetails) -> Result<(), AppError> {
    if details.title.trim().is_empty() {
        return Err(AppError::Validation("title is required".to_string()));
    }
    if details.skills_required.len() > MAX_REQUIRED_SKILLS {
        return Err(AppError::Validation(format!(
            "skillsRequired may list at most {MAX_REQUIRED_SKILLS} skills"
        )));
    }
    if details
        .skills_required
        .iter()
        .any(|s| s.name.trim().is_empty())
    {
        return Err(AppError::Validation(
            "skillsRequired entries need a name".to_string(),
        ));
    }
    Ok(())
}
