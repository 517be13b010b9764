use crate::errors::AppError;
use crate::models::resume::{
    AdditionalSection, Education, PersonalInfo, Project, ResumeData, WorkExperience,
};

pub const MAX_SHORT_FIELD: usize = 200;
pub const MAX_LONG_FIELD: usize = 5_000;
pub const MAX_LIST_ITEMS: usize = 100;
pub const MAX_TEMPLATE_NAME: usize = 50;

/// Full-document checks: lengths everywhere, email shape when present.
/// Required fields are enforced per wizard step, not here.
pub fn validate_resume(resume: &ResumeData) -> Result<(), AppError> {
    validate_personal(&resume.personal_info, false)?;
    validate_education(&resume.education)?;
    validate_experience(&resume.work_experience)?;
    validate_skills(&resume.skills)?;
    validate_projects(&resume.projects)?;
    validate_additional(&resume.additional_sections)?;
    validate_template(&resume.template)
}

pub fn validate_personal(info: &PersonalInfo, require_identity: bool) -> Result<(), AppError> {
    if require_identity {
        required("personalInfo.fullName", &info.full_name)?;
        required("personalInfo.email", &info.email)?;
    }
    short("personalInfo.fullName", &info.full_name)?;
    short("personalInfo.email", &info.email)?;
    short("personalInfo.phone", &info.phone)?;
    short("personalInfo.location", &info.location)?;
    long("personalInfo.summary", &info.summary)?;
    if let Some(picture) = &info.profile_picture {
        // Pictures may be data URLs; only cap them loosely.
        if picture.len() > 2_000_000 {
            return Err(AppError::Validation(
                "personalInfo.profilePicture is too large".to_string(),
            ));
        }
    }
    if !info.email.trim().is_empty() && !looks_like_email(&info.email) {
        return Err(AppError::Validation(format!(
            "personalInfo.email '{}' is not a valid email address",
            info.email
        )));
    }
    Ok(())
}

pub fn validate_education(entries: &[Education]) -> Result<(), AppError> {
    list_len("education", entries.len())?;
    for (i, e) in entries.iter().enumerate() {
        short(&format!("education[{i}].institution"), &e.institution)?;
        short(&format!("education[{i}].degree"), &e.degree)?;
        short(&format!("education[{i}].fieldOfStudy"), &e.field_of_study)?;
        short(&format!("education[{i}].startDate"), &e.start_date)?;
        short(&format!("education[{i}].endDate"), &e.end_date)?;
        if let Some(gpa) = &e.gpa {
            short(&format!("education[{i}].gpa"), gpa)?;
        }
    }
    Ok(())
}

pub fn validate_experience(entries: &[WorkExperience]) -> Result<(), AppError> {
    list_len("workExperience", entries.len())?;
    for (i, w) in entries.iter().enumerate() {
        short(&format!("workExperience[{i}].company"), &w.company)?;
        short(&format!("workExperience[{i}].position"), &w.position)?;
        short(&format!("workExperience[{i}].location"), &w.location)?;
        short(&format!("workExperience[{i}].startDate"), &w.start_date)?;
        short(&format!("workExperience[{i}].endDate"), &w.end_date)?;
        long(&format!("workExperience[{i}].description"), &w.description)?;
        list_len(&format!("workExperience[{i}].achievements"), w.achievements.len())?;
        for (j, a) in w.achievements.iter().enumerate() {
            long(&format!("workExperience[{i}].achievements[{j}]"), a)?;
        }
    }
    Ok(())
}

pub fn validate_skills(skills: &[String]) -> Result<(), AppError> {
    list_len("skills", skills.len())?;
    for (i, s) in skills.iter().enumerate() {
        short(&format!("skills[{i}]"), s)?;
    }
    Ok(())
}

pub fn validate_projects(projects: &[Project]) -> Result<(), AppError> {
    list_len("projects", projects.len())?;
    for (i, p) in projects.iter().enumerate() {
        short(&format!("projects[{i}].name"), &p.name)?;
        long(&format!("projects[{i}].description"), &p.description)?;
        list_len(&format!("projects[{i}].technologies"), p.technologies.len())?;
        for (j, t) in p.technologies.iter().enumerate() {
            short(&format!("projects[{i}].technologies[{j}]"), t)?;
        }
        if let Some(link) = &p.link {
            long(&format!("projects[{i}].link"), link)?;
        }
    }
    Ok(())
}

pub fn validate_additional(sections: &[AdditionalSection]) -> Result<(), AppError> {
    list_len("additionalSections", sections.len())?;
    for (i, s) in sections.iter().enumerate() {
        short(&format!("additionalSections[{i}].title"), &s.title)?;
        list_len(&format!("additionalSections[{i}].items"), s.items.len())?;
        for (j, item) in s.items.iter().enumerate() {
            long(&format!("additionalSections[{i}].items[{j}]"), item)?;
        }
    }
    Ok(())
}

pub fn validate_template(name: &str) -> Result<(), AppError> {
    let valid = !name.is_empty()
        && name.len() <= MAX_TEMPLATE_NAME
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "template '{name}' must be 1-{MAX_TEMPLATE_NAME} letters, digits, '-' or '_'"
        )))
    }
}

fn required(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(())
}

fn short(field: &str, value: &str) -> Result<(), AppError> {
    max_chars(field, value, MAX_SHORT_FIELD)
}

fn long(field: &str, value: &str) -> Result<(), AppError> {
    max_chars(field, value, MAX_LONG_FIELD)
}

fn max_chars(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

fn list_len(field: &str, len: usize) -> Result<(), AppError> {
    if len > MAX_LIST_ITEMS {
        return Err(AppError::Validation(format!(
            "{field} may contain at most {MAX_LIST_ITEMS} entries"
        )));
    }
    Ok(())
}

fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.contains(char::is_whitespace)
        }
        None => false,
    }
}
