use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

pub const DEFAULT_TEMPLATE: &str = "modern";

/// The resume document edited by the wizard.
///
/// Serde deserialization is strict about shapes (a string where a list is
/// expected is an error) but reads a missing field or `null` as the default.
/// `from_value_lenient` is the forgiving reader for scoring and export input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeData {
    #[serde(deserialize_with = "null_as_default")]
    pub personal_info: PersonalInfo,
    #[serde(deserialize_with = "null_as_default")]
    pub education: Vec<Education>,
    #[serde(deserialize_with = "null_as_default")]
    pub work_experience: Vec<WorkExperience>,
    #[serde(deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub projects: Vec<Project>,
    #[serde(deserialize_with = "null_as_default")]
    pub additional_sections: Vec<AdditionalSection>,
    #[serde(deserialize_with = "null_as_default_template")]
    pub template: String,
}

impl Default for ResumeData {
    fn default() -> Self {
        Self {
            personal_info: PersonalInfo::default(),
            education: Vec::new(),
            work_experience: Vec::new(),
            skills: Vec::new(),
            projects: Vec::new(),
            additional_sections: Vec::new(),
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    #[serde(deserialize_with = "null_as_default")]
    pub institution: String,
    #[serde(deserialize_with = "null_as_default")]
    pub degree: String,
    #[serde(deserialize_with = "null_as_default")]
    pub field_of_study: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperience {
    #[serde(deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(deserialize_with = "null_as_default")]
    pub position: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub current: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub technologies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdditionalSection {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default_template<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .unwrap_or_else(|| DEFAULT_TEMPLATE.to_string()))
}

// ────────────────────────────────────────────────────────────────────────────
// Lenient reading
// ────────────────────────────────────────────────────────────────────────────

/// Field-by-field reader: a wrong-typed scalar becomes its default and a bad
/// list element is dropped without touching its siblings.
trait Lenient: Sized {
    fn lenient(value: &Value) -> Option<Self>;
}

impl Lenient for String {
    fn lenient(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl Lenient for PersonalInfo {
    fn lenient(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            full_name: text(obj, "fullName"),
            email: text(obj, "email"),
            phone: text(obj, "phone"),
            location: text(obj, "location"),
            summary: text(obj, "summary"),
            profile_picture: opt_text(obj, "profilePicture"),
        })
    }
}

impl Lenient for Education {
    fn lenient(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            institution: text(obj, "institution"),
            degree: text(obj, "degree"),
            field_of_study: text(obj, "fieldOfStudy"),
            start_date: text(obj, "startDate"),
            end_date: text(obj, "endDate"),
            gpa: opt_text(obj, "gpa"),
        })
    }
}

impl Lenient for WorkExperience {
    fn lenient(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            company: text(obj, "company"),
            position: text(obj, "position"),
            location: text(obj, "location"),
            start_date: text(obj, "startDate"),
            end_date: text(obj, "endDate"),
            current: obj.get("current").and_then(Value::as_bool).unwrap_or(false),
            description: text(obj, "description"),
            achievements: list(obj, "achievements"),
        })
    }
}

impl Lenient for Project {
    fn lenient(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            name: text(obj, "name"),
            description: text(obj, "description"),
            technologies: list(obj, "technologies"),
            link: opt_text(obj, "link"),
        })
    }
}

impl Lenient for AdditionalSection {
    fn lenient(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            title: text(obj, "title"),
            items: list(obj, "items"),
        })
    }
}

/// Strings as-is, numbers rendered (a GPA of `3.8`), anything else empty.
fn opt_text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn text(obj: &Map<String, Value>, key: &str) -> String {
    opt_text(obj, key).unwrap_or_default()
}

fn list<T: Lenient>(obj: &Map<String, Value>, key: &str) -> Vec<T> {
    obj.get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(T::lenient).collect())
        .unwrap_or_default()
}

impl ResumeData {
    /// Reads whatever is usable from an arbitrary JSON value. Never fails.
    pub fn from_value_lenient(value: Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };
        Self {
            personal_info: obj
                .get("personalInfo")
                .and_then(PersonalInfo::lenient)
                .unwrap_or_default(),
            education: list(obj, "education"),
            work_experience: list(obj, "workExperience"),
            skills: list(obj, "skills"),
            projects: list(obj, "projects"),
            additional_sections: list(obj, "additionalSections"),
            template: obj
                .get("template")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| DEFAULT_TEMPLATE.to_string()),
        }
    }

    /// Every free-text field joined with spaces.
    pub fn flatten_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();

        let p = &self.personal_info;
        parts.extend([
            p.full_name.as_str(),
            p.email.as_str(),
            p.phone.as_str(),
            p.location.as_str(),
            p.summary.as_str(),
        ]);

        for edu in &self.education {
            parts.extend([
                edu.institution.as_str(),
                edu.degree.as_str(),
                edu.field_of_study.as_str(),
            ]);
        }

        for work in &self.work_experience {
            parts.extend([
                work.company.as_str(),
                work.position.as_str(),
                work.location.as_str(),
                work.description.as_str(),
            ]);
            parts.extend(work.achievements.iter().map(String::as_str));
        }

        parts.extend(self.skills.iter().map(String::as_str));

        for project in &self.projects {
            parts.extend([project.name.as_str(), project.description.as_str()]);
            parts.extend(project.technologies.iter().map(String::as_str));
        }

        for section in &self.additional_sections {
            parts.push(section.title.as_str());
            parts.extend(section.items.iter().map(String::as_str));
        }

        parts
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn achievements(&self) -> impl Iterator<Item = &str> {
        self.work_experience
            .iter()
            .flat_map(|w| w.achievements.iter().map(String::as_str))
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub data: Json<ResumeData>,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A persisted resume together with its concurrency token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredResume {
    pub id: Uuid,
    pub resume: ResumeData,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ResumeRow> for StoredResume {
    fn from(row: ResumeRow) -> Self {
        Self {
            id: row.id,
            resume: row.data.0,
            version: row.version,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Listing entry for `GET /api/user/resumes`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSummary {
    pub id: Uuid,
    pub full_name: String,
    pub template: String,
    pub version: i32,
    pub updated_at: DateTime<Utc>,
}

impl From<&StoredResume> for ResumeSummary {
    fn from(stored: &StoredResume) -> Self {
        Self {
            id: stored.id,
            full_name: stored.resume.personal_info.full_name.clone(),
            template: stored.resume.template.clone(),
            version: stored.version,
            updated_at: stored.updated_at,
        }
    }
}
