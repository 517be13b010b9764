//! Job/Candidate Matcher: weighted compatibility between a candidate profile
//! and a job posting.
//!
//! score = 0.6 × skills + 0.2 × experience + 0.2 × preferences, each in 0–100.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::job::{JobDetails, JobPosting};
use crate::models::profile::{CandidateProfile, SEEKER_ROLE};

pub mod handlers;

const SKILL_WEIGHT: f64 = 0.6;
const EXPERIENCE_WEIGHT: f64 = 0.2;
const PREFERENCE_WEIGHT: f64 = 0.2;

const FRESHER_LABEL: &str = "Fresher";
const FRESHER_SEEKER_SCORE: f64 = 100.0;
/// Flat experience credit for every other combination. Not a years comparison.
const DEFAULT_EXPERIENCE_SCORE: f64 = 80.0;
const DEFAULT_PREFERENCE_SCORE: f64 = 70.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: u32,
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedJob {
    pub job_id: Uuid,
    pub title: String,
    pub company: String,
    #[serde(flatten)]
    pub result: MatchResult,
}

/// Scores `user` against `job`.
pub fn calculate_match(user: &CandidateProfile, job: &JobDetails) -> MatchResult {
    let (matched, required) = skill_overlap(user, job);
    let skill_score = if required == 0 {
        100.0
    } else {
        matched as f64 / required as f64 * 100.0
    };

    let experience_score = experience_score(user, job);
    let preference_score = preference_score(user, job);

    let combined = SKILL_WEIGHT * skill_score
        + EXPERIENCE_WEIGHT * experience_score
        + PREFERENCE_WEIGHT * preference_score;
    let score = combined.round().clamp(0.0, 100.0) as u32;

    MatchResult {
        score,
        explanation: format!(
            "Matched {matched} of {required} required skills. Work mode: {}.",
            job.work_mode
        ),
    }
}

/// All jobs scored for `user`, best first. Ties keep input order.
pub fn rank_jobs(user: &CandidateProfile, jobs: &[JobPosting]) -> Vec<RankedJob> {
    let mut ranked: Vec<RankedJob> = jobs
        .iter()
        .map(|job| RankedJob {
            job_id: job.id,
            title: job.details.title.clone(),
            company: job.details.company.clone(),
            result: calculate_match(user, &job.details),
        })
        .collect();
    ranked.sort_by(|a, b| b.result.score.cmp(&a.result.score));
    ranked
}

/// (required skills the user has, required skill count). Case-insensitive.
fn skill_overlap(user: &CandidateProfile, job: &JobDetails) -> (usize, usize) {
    let user_skills: Vec<String> = user.skills.iter().map(|s| s.to_lowercase()).collect();
    let required = job.skills_required.len();
    let matched = job
        .skills_required
        .iter()
        .filter(|s| user_skills.contains(&s.name.to_lowercase()))
        .count();
    (matched, required)
}

fn experience_score(user: &CandidateProfile, job: &JobDetails) -> f64 {
    if job.experience_range.label == FRESHER_LABEL && user.role == SEEKER_ROLE {
        FRESHER_SEEKER_SCORE
    } else {
        DEFAULT_EXPERIENCE_SCORE
    }
}

fn preference_score(user: &CandidateProfile, job: &JobDetails) -> f64 {
    let Some(prefs) = &user.preferences else {
        return DEFAULT_PREFERENCE_SCORE;
    };
    let mode_ok = prefs.work_modes.contains(&job.work_mode);
    let type_ok = prefs.job_types.contains(&job.employment_type);
    (f64::from(u8::from(mode_ok)) + f64::from(u8::from(type_ok))) / 2.0 * 100.0
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::{ExperienceRange, RequiredSkill};
    use crate::models::profile::Preferences;
    use chrono::Utc;

    fn user(skills: &[&str], role: &str, preferences: Option<Preferences>) -> CandidateProfile {
        CandidateProfile {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            role: role.to_string(),
            preferences,
        }
    }

    fn job(required: &[&str], label: &str, employment: &str, mode: &str) -> JobDetails {
        JobDetails {
            title: "Engineer".to_string(),
            skills_required: required
                .iter()
                .map(|s| RequiredSkill {
                    name: s.to_string(),
                })
                .collect(),
            experience_range: ExperienceRange {
                label: label.to_string(),
            },
            employment_type: employment.to_string(),
            work_mode: mode.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_two_of_three_skills_with_defaults_scores_70() {
        let u = user(&["react", "node.js"], "recruiter", None);
        let j = job(&["React", "Node.js", "AWS"], "2-4 years", "Full-time", "Remote");
        let result = calculate_match(&u, &j);
        assert_eq!(result.score, 70);
        assert!(result.explanation.contains("Matched 2 of 3"));
        assert!(result.explanation.contains("Remote"));
    }

    #[test]
    fn test_no_required_skills_gives_full_skill_credit() {
        let u = user(&[], "recruiter", None);
        let j = job(&[], "Senior", "Full-time", "Onsite");
        // 100*0.6 + 80*0.2 + 70*0.2 = 90
        assert_eq!(calculate_match(&u, &j).score, 90);
    }

    #[test]
    fn test_fresher_seeker_gets_full_experience() {
        let u = user(&["python"], SEEKER_ROLE, None);
        let j = job(&["Python"], FRESHER_LABEL, "Internship", "Hybrid");
        // 100*0.6 + 100*0.2 + 70*0.2 = 94
        assert_eq!(calculate_match(&u, &j).score, 94);
    }

    #[test]
    fn test_full_credit_everywhere_scores_100() {
        let prefs = Preferences {
            work_modes: vec!["Remote".to_string()],
            job_types: vec!["Internship".to_string()],
        };
        let u = user(&["python"], SEEKER_ROLE, Some(prefs));
        let j = job(&["Python"], FRESHER_LABEL, "Internship", "Remote");
        assert_eq!(calculate_match(&u, &j).score, 100);
    }

    #[test]
    fn test_fresher_label_is_case_sensitive() {
        let u = user(&["python"], SEEKER_ROLE, None);
        let j = job(&["Python"], "fresher", "Internship", "Hybrid");
        assert_eq!(calculate_match(&u, &j).score, 90);
    }

    #[test]
    fn test_preferences_average_two_checks() {
        let prefs = Preferences {
            work_modes: vec!["Remote".to_string()],
            job_types: vec!["Contract".to_string()],
        };
        let u = user(&["go"], "recruiter", Some(prefs));

        let both = job(&["Go"], "Any", "Contract", "Remote");
        let one = job(&["Go"], "Any", "Full-time", "Remote");
        let none = job(&["Go"], "Any", "Full-time", "Onsite");

        // 60 + 16 + {20, 10, 0}
        assert_eq!(calculate_match(&u, &both).score, 96);
        assert_eq!(calculate_match(&u, &one).score, 86);
        assert_eq!(calculate_match(&u, &none).score, 76);
    }

    #[test]
    fn test_declared_empty_preferences_score_zero() {
        let u = user(&[], "recruiter", Some(Preferences::default()));
        let j = job(&[], "Any", "Full-time", "Remote");
        // 60 + 16 + 0
        assert_eq!(calculate_match(&u, &j).score, 76);
    }

    #[test]
    fn test_score_bounded_and_monotonic_in_skills() {
        let required = ["A", "B", "C", "D"];
        let mut last = 0;
        for n in 0..=required.len() {
            let have: Vec<&str> = required[..n].to_vec();
            let u = user(&have, "recruiter", None);
            let score = calculate_match(&u, &job(&required, "Any", "Full-time", "Remote")).score;
            assert!(score <= 100);
            assert!(score >= last, "score dropped from {last} to {score} at {n} skills");
            last = score;
        }
    }

    #[test]
    fn test_user_skills_not_in_job_do_not_count() {
        let u = user(&["react", "vue", "svelte"], "recruiter", None);
        let j = job(&["React"], "Any", "Full-time", "Remote");
        let result = calculate_match(&u, &j);
        assert!(result.explanation.starts_with("Matched 1 of 1"));
    }

    #[test]
    fn test_rank_jobs_orders_by_score() {
        let u = user(&["rust"], "recruiter", None);
        let make = |title: &str, required: &[&str]| JobPosting {
            id: Uuid::new_v4(),
            recruiter_uid: "r".to_string(),
            details: JobDetails {
                title: title.to_string(),
                ..job(required, "Any", "Full-time", "Remote")
            },
            created_at: Utc::now(),
        };
        let jobs = vec![make("low", &["Java"]), make("high", &["Rust"])];

        let ranked = rank_jobs(&u, &jobs);
        assert_eq!(ranked[0].title, "high");
        assert_eq!(ranked[1].title, "low");
        assert!(ranked[0].result.score > ranked[1].result.score);
    }
}
