use serde::{Deserialize, Serialize};

use crate::models::resume::ResumeData;

/// Role assigned to job seekers; the matcher compares against it.
pub const SEEKER_ROLE: &str = "seeker";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub work_modes: Vec<String>,
    pub job_types: Vec<String>,
}

/// What the matcher knows about a candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidateProfile {
    pub skills: Vec<String>,
    pub role: String,
    pub preferences: Option<Preferences>,
}

impl Default for CandidateProfile {
    fn default() -> Self {
        Self {
            skills: Vec::new(),
            role: SEEKER_ROLE.to_string(),
            preferences: None,
        }
    }
}

impl CandidateProfile {
    /// Profile used for users who never saved one: resume skills, seeker role.
    pub fn from_resume(resume: &ResumeData) -> Self {
        Self {
            skills: resume.skills.clone(),
            ..Self::default()
        }
    }
}
