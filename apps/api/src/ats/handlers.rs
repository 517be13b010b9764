use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;

use crate::ats::AtsReport;
use crate::models::resume::ResumeData;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub resume: Value,
    #[serde(default)]
    pub job_description: String,
}

/// POST /api/analyze
///
/// Unauthenticated. A malformed resume scores as an empty one.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Json<AtsReport> {
    let resume = ResumeData::from_value_lenient(request.resume);
    Json(state.ats.score(&resume, &request.job_description))
}
