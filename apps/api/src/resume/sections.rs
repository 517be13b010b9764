use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::resume::{
    AdditionalSection, Education, PersonalInfo, Project, ResumeData, WorkExperience,
};
use crate::resume::validation;

pub const SECTION_NAMES: [&str; 7] = [
    "personal",
    "education",
    "experience",
    "skills",
    "projects",
    "additional",
    "template",
];

/// One wizard step's worth of resume data.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionUpdate {
    Personal(PersonalInfo),
    Education(Vec<Education>),
    Experience(Vec<WorkExperience>),
    Skills(Vec<String>),
    Projects(Vec<Project>),
    Additional(Vec<AdditionalSection>),
    Template(String),
}

impl SectionUpdate {
    /// Builds the update for the `section` path segment from its JSON payload.
    pub fn parse(section: &str, data: Value) -> Result<Self, AppError> {
        Ok(match section {
            "personal" => Self::Personal(decode(section, data)?),
            "education" => Self::Education(decode(section, data)?),
            "experience" => Self::Experience(decode(section, data)?),
            "skills" => Self::Skills(decode(section, data)?),
            "projects" => Self::Projects(decode(section, data)?),
            "additional" => Self::Additional(decode(section, data)?),
            "template" => Self::Template(decode(section, data)?),
            other => {
                return Err(AppError::Validation(format!(
                    "Unknown resume section '{other}'. Expected one of: {}",
                    SECTION_NAMES.join(", ")
                )))
            }
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Personal(_) => "personal",
            Self::Education(_) => "education",
            Self::Experience(_) => "experience",
            Self::Skills(_) => "skills",
            Self::Projects(_) => "projects",
            Self::Additional(_) => "additional",
            Self::Template(_) => "template",
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        match self {
            Self::Personal(info) => validation::validate_personal(info, true),
            Self::Education(entries) => validation::validate_education(entries),
            Self::Experience(entries) => validation::validate_experience(entries),
            Self::Skills(skills) => validation::validate_skills(skills),
            Self::Projects(projects) => validation::validate_projects(projects),
            Self::Additional(sections) => validation::validate_additional(sections),
            Self::Template(name) => validation::validate_template(name),
        }
    }

    /// Overwrites this section of `resume`, leaving the others untouched.
    pub fn apply(&self, resume: &mut ResumeData) {
        match self {
            Self::Personal(info) => resume.personal_info = info.clone(),
            Self::Education(entries) => resume.education = entries.clone(),
            Self::Experience(entries) => resume.work_experience = entries.clone(),
            Self::Skills(skills) => resume.skills = skills.clone(),
            Self::Projects(projects) => resume.projects = projects.clone(),
            Self::Additional(sections) => resume.additional_sections = sections.clone(),
            Self::Template(name) => resume.template = name.clone(),
        }
    }
}

fn decode<T: DeserializeOwned>(section: &str, data: Value) -> Result<T, AppError> {
    serde_json::from_value(data)
        .map_err(|e| AppError::Validation(format!("Invalid '{section}' section: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_each_section() {
        let cases = [
            ("personal", json!({"fullName": "Ada", "email": "ada@example.com"})),
            ("education", json!([{"institution": "MIT"}])),
            ("experience", json!([{"company": "Acme", "achievements": ["x"]}])),
            ("skills", json!(["Rust", "SQL"])),
            ("projects", json!([{"name": "p", "technologies": ["Go"]}])),
            ("additional", json!([{"title": "Awards", "items": ["a"]}])),
            ("template", json!("classic")),
        ];
        for (name, data) in cases {
            let update = SectionUpdate::parse(name, data).unwrap();
            assert_eq!(update.name(), name);
        }
    }

    #[test]
    fn test_unknown_section_rejected() {
        let err = SectionUpdate::parse("hobbies", json!([])).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("hobbies")));
    }

    #[test]
    fn test_wrong_shape_rejected() {
        assert!(SectionUpdate::parse("skills", json!("Rust")).is_err());
        assert!(SectionUpdate::parse("template", json!(3)).is_err());
    }

    #[test]
    fn test_apply_only_touches_its_section() {
        let mut resume = ResumeData {
            skills: vec!["SQL".to_string()],
            ..Default::default()
        };
        resume.personal_info.full_name = "Ada".to_string();

        SectionUpdate::Skills(vec!["Rust".to_string()]).apply(&mut resume);

        assert_eq!(resume.skills, vec!["Rust"]);
        assert_eq!(resume.personal_info.full_name, "Ada");
    }

    #[test]
    fn test_personal_section_requires_identity() {
        let update = SectionUpdate::parse("personal", json!({"fullName": "Ada"})).unwrap();
        assert!(update.validate().is_err());
    }
}
