//! ATS Scorer: keyword match between a resume and a pasted job description.
//!
//! Default: `KeywordAtsScorer` (fixed vocabulary, substring matching, pure).
//! `AppState` holds an `Arc<dyn AtsScorer>` so another backend can be swapped
//! in at startup without touching handlers.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::resume::ResumeData;

pub mod handlers;
pub mod keywords;

use keywords::extract_keywords;

const MIN_SUMMARY_CHARS: usize = 50;

const SUMMARY_RECOMMENDATION: &str =
    "Expand your professional summary to at least 50 characters and lead with your strongest qualifications";
const QUANTIFY_RECOMMENDATION: &str =
    "Quantify your achievements with numbers (e.g. percentages, dollar amounts, or how many times faster)";
const FILLER_RECOMMENDATIONS: [&str; 2] = [
    "Start each bullet point with a strong action verb",
    "Tailor your resume to each job description you apply for",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsReport {
    pub score: u32, // 0 – 100
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub recommendations: Vec<String>,
}

pub trait AtsScorer: Send + Sync {
    fn score(&self, resume: &ResumeData, job_description: &str) -> AtsReport;
}

/// Vocabulary-based scorer. Deterministic; holds no state.
pub struct KeywordAtsScorer;

impl AtsScorer for KeywordAtsScorer {
    fn score(&self, resume: &ResumeData, job_description: &str) -> AtsReport {
        score_resume(resume, job_description)
    }
}

/// Scores `resume` against `job_description`.
///
/// Every vocabulary term found in the job description is either matched (it
/// also occurs in the flattened resume text) or missing. The score is the
/// matched share of the found terms, rounded, 0 when none were found.
pub fn score_resume(resume: &ResumeData, job_description: &str) -> AtsReport {
    let resume_text = resume.flatten_text().to_lowercase();

    let (matched, missing): (Vec<&str>, Vec<&str>) = extract_keywords(job_description)
        .into_iter()
        .partition(|kw| resume_text.contains(&kw.to_lowercase()));

    let found = (matched.len() + missing.len()).max(1);
    let score = ((100.0 * matched.len() as f64 / found as f64).round() as u32).min(100);

    let recommendations = build_recommendations(resume, &missing);

    AtsReport {
        score,
        matched_keywords: matched.into_iter().map(str::to_string).collect(),
        missing_keywords: missing.into_iter().map(str::to_string).collect(),
        recommendations,
    }
}

fn quantified_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\d+%|\d+x|\$\d+|\d+ times").expect("quantified-achievement pattern is valid")
    })
}

fn build_recommendations(resume: &ResumeData, missing: &[&str]) -> Vec<String> {
    let mut recommendations: Vec<String> = missing
        .iter()
        .map(|kw| format!("Add {kw} if you have experience with it"))
        .collect();

    if resume.personal_info.summary.chars().count() < MIN_SUMMARY_CHARS {
        recommendations.push(SUMMARY_RECOMMENDATION.to_string());
    }

    let pattern = quantified_pattern();
    if !resume.achievements().any(|a| pattern.is_match(a)) {
        recommendations.push(QUANTIFY_RECOMMENDATION.to_string());
    }

    if recommendations.len() < 2 {
        recommendations.extend(FILLER_RECOMMENDATIONS.iter().map(|r| r.to_string()));
    }

    recommendations
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
