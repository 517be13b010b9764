//! Axum route handlers for the Resume API.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::ats::AtsReport;
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::resume::{ResumeData, ResumeSummary, StoredResume};
use crate::resume::export::{file_name, render_text, ExportFormat};
use crate::resume::sections::SectionUpdate;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResumeRequest {
    /// Parsed strictly: a malformed section is rejected, never stored empty.
    pub resume: Value,
    /// Version the client last loaded. Omit when creating.
    pub version: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSectionRequest {
    pub data: Value,
    pub version: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeStoredRequest {
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadRequest {
    #[serde(default)]
    pub resume: Value,
    #[serde(default)]
    pub format: ExportFormat,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/resume
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<StoredResume>, AppError> {
    let stored = state
        .resumes
        .load(&user.uid)
        .await?
        .ok_or_else(|| AppError::NotFound("No resume saved yet".to_string()))?;
    Ok(Json(stored))
}

/// POST /api/resume
///
/// Replaces the whole document. A stale `version` yields 409.
pub async fn handle_save_resume(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<SaveResumeRequest>,
) -> Result<Json<StoredResume>, AppError> {
    let resume: ResumeData = serde_json::from_value(request.resume)
        .map_err(|e| AppError::Validation(format!("Invalid resume: {e}")))?;
    let stored = state
        .resumes
        .save(&user.uid, &resume, request.version)
        .await?;
    Ok(Json(stored))
}

/// PUT /api/resume/sections/:section
///
/// Saves one wizard step. Lost races are retried once server-side.
pub async fn handle_save_section(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(section): Path<String>,
    Json(request): Json<SaveSectionRequest>,
) -> Result<Json<StoredResume>, AppError> {
    let update = SectionUpdate::parse(&section, request.data)?;
    let stored = state
        .resumes
        .save_section(&user.uid, &update, request.version)
        .await?;
    Ok(Json(stored))
}

/// POST /api/resume/analyze
///
/// ATS report for the caller's stored resume.
pub async fn handle_analyze_stored(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<AnalyzeStoredRequest>,
) -> Result<Json<AtsReport>, AppError> {
    let stored = state
        .resumes
        .load(&user.uid)
        .await?
        .ok_or_else(|| AppError::NotFound("No resume saved yet".to_string()))?;
    Ok(Json(
        state.ats.score(&stored.resume, &request.job_description),
    ))
}

/// GET /api/user/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<ResumeSummary>>, AppError> {
    let resumes = state.resumes.list(&user.uid).await?;
    Ok(Json(resumes.iter().map(ResumeSummary::from).collect()))
}

/// POST /api/download
///
/// Plain-text export. PDF is produced by the external renderer.
pub async fn handle_download(Json(request): Json<DownloadRequest>) -> Result<Response, AppError> {
    if request.format == ExportFormat::Pdf {
        return Err(AppError::NotImplemented);
    }

    let resume = ResumeData::from_value_lenient(request.resume);
    let disposition = format!("attachment; filename=\"{}\"", file_name(&resume, "txt"));

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        render_text(&resume),
    )
        .into_response())
}
