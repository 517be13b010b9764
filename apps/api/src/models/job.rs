use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequiredSkill {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceRange {
    pub label: String,
}

/// Recruiter-supplied posting fields. Used both as the create payload and as
/// the JSONB document stored alongside the row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobDetails {
    pub title: String,
    pub company: String,
    pub description: String,
    pub skills_required: Vec<RequiredSkill>,
    pub experience_range: ExperienceRange,
    pub employment_type: String,
    pub work_mode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: Uuid,
    pub recruiter_uid: String,
    #[serde(flatten)]
    pub details: JobDetails,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub recruiter_uid: String,
    pub data: Json<JobDetails>,
    pub created_at: DateTime<Utc>,
}

impl From<JobRow> for JobPosting {
    fn from(row: JobRow) -> Self {
        Self {
            id: row.id,
            recruiter_uid: row.recruiter_uid,
            details: row.data.0,
            created_at: row.created_at,
        }
    }
}
