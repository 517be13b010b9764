//! AI career counselor.
//!
//! Builds a mode-specific prompt, asks the text generator once, and falls back
//! to a static reply when the model fails or answers with nothing. No
//! conversation state is kept between calls.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::CAREER_COUNSELOR_SYSTEM;
use crate::llm_client::TextGenerator;
use crate::models::resume::ResumeData;

pub mod handlers;
pub mod prompts;

use prompts::{build_prompt, fallback_for, MODE_SELECTION_MESSAGE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptMode {
    Gap,
    Quiz,
    Mock,
    Career,
}

impl PromptMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptMode::Gap => "gap",
            PromptMode::Quiz => "quiz",
            PromptMode::Mock => "mock",
            PromptMode::Career => "career",
        }
    }
}

impl fmt::Display for PromptMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromptMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gap" => Ok(PromptMode::Gap),
            "quiz" => Ok(PromptMode::Quiz),
            "mock" => Ok(PromptMode::Mock),
            "career" => Ok(PromptMode::Career),
            _ => Err(AppError::Validation(MODE_SELECTION_MESSAGE.to_string())),
        }
    }
}

/// What the counselor knows about the candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiContext {
    pub skills: Vec<String>,
    pub experience: String,
    pub projects: Vec<String>,
    pub target_role: String,
    pub question: Option<String>,
}

impl AiContext {
    pub fn from_resume(resume: &ResumeData, target_role: String) -> Self {
        let experience = resume
            .work_experience
            .iter()
            .filter(|w| !w.position.trim().is_empty() || !w.company.trim().is_empty())
            .map(|w| format!("{} at {}", w.position.trim(), w.company.trim()))
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            skills: resume.skills.clone(),
            experience,
            projects: resume.projects.iter().map(|p| p.name.clone()).collect(),
            target_role,
            question: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplySource {
    Model,
    Fallback,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CounselorReply {
    pub mode: PromptMode,
    pub text: String,
    pub source: ReplySource,
}

#[derive(Clone)]
pub struct CounselorService {
    generator: Arc<dyn TextGenerator>,
}

impl CounselorService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Never fails: model errors degrade to the mode's static reply.
    pub async fn respond(&self, mode: PromptMode, ctx: &AiContext) -> CounselorReply {
        let prompt = build_prompt(mode, ctx);

        match self
            .generator
            .generate(&prompt, CAREER_COUNSELOR_SYSTEM)
            .await
        {
            Ok(text) if !text.trim().is_empty() => {
                info!("Counselor reply generated: mode={mode}");
                CounselorReply {
                    mode,
                    text,
                    source: ReplySource::Model,
                }
            }
            Ok(_) => {
                warn!("Counselor model returned blank text (mode={mode}), using fallback");
                Self::fallback(mode)
            }
            Err(e) => {
                warn!("Counselor model call failed (mode={mode}): {e}. Using fallback.");
                Self::fallback(mode)
            }
        }
    }

    fn fallback(mode: PromptMode) -> CounselorReply {
        CounselorReply {
            mode,
            text: fallback_for(mode).to_string(),
            source: ReplySource::Fallback,
        }
    }
}
