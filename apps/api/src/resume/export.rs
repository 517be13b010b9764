use serde::Deserialize;

use crate::models::resume::ResumeData;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Text,
    Pdf,
}

/// Renders the resume as plain text, skipping empty sections.
pub fn render_text(resume: &ResumeData) -> String {
    let mut out = String::new();
    let p = &resume.personal_info;

    if !p.full_name.trim().is_empty() {
        out.push_str(p.full_name.trim());
        out.push('\n');
    }
    let contact: Vec<&str> = [p.email.as_str(), p.phone.as_str(), p.location.as_str()]
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if !contact.is_empty() {
        out.push_str(&contact.join(" | "));
        out.push('\n');
    }

    if !p.summary.trim().is_empty() {
        push_heading(&mut out, "SUMMARY");
        out.push_str(p.summary.trim());
        out.push('\n');
    }

    if !resume.work_experience.is_empty() {
        push_heading(&mut out, "EXPERIENCE");
        for w in &resume.work_experience {
            out.push_str(&join_present(
                &[w.position.as_str(), w.company.as_str(), w.location.as_str()],
                ", ",
            ));
            let end = if w.current { "Present" } else { w.end_date.as_str() };
            let dates = join_present(&[w.start_date.as_str(), end], " - ");
            if !dates.is_empty() {
                out.push_str(&format!(" ({dates})"));
            }
            out.push('\n');
            if !w.description.trim().is_empty() {
                out.push_str(&format!("  {}\n", w.description.trim()));
            }
            for a in &w.achievements {
                out.push_str(&format!("  - {}\n", a.trim()));
            }
        }
    }

    if !resume.education.is_empty() {
        push_heading(&mut out, "EDUCATION");
        for e in &resume.education {
            out.push_str(&join_present(
                &[e.degree.as_str(), e.field_of_study.as_str(), e.institution.as_str()],
                ", ",
            ));
            let dates = join_present(&[e.start_date.as_str(), e.end_date.as_str()], " - ");
            if !dates.is_empty() {
                out.push_str(&format!(" ({dates})"));
            }
            if let Some(gpa) = e.gpa.as_deref().filter(|g| !g.trim().is_empty()) {
                out.push_str(&format!(" GPA {gpa}"));
            }
            out.push('\n');
        }
    }

    if !resume.skills.is_empty() {
        push_heading(&mut out, "SKILLS");
        out.push_str(&resume.skills.join(", "));
        out.push('\n');
    }

    if !resume.projects.is_empty() {
        push_heading(&mut out, "PROJECTS");
        for project in &resume.projects {
            out.push_str(project.name.trim());
            if !project.technologies.is_empty() {
                out.push_str(&format!(" [{}]", project.technologies.join(", ")));
            }
            out.push('\n');
            if !project.description.trim().is_empty() {
                out.push_str(&format!("  {}\n", project.description.trim()));
            }
            if let Some(link) = project.link.as_deref().filter(|l| !l.trim().is_empty()) {
                out.push_str(&format!("  {link}\n"));
            }
        }
    }

    for section in &resume.additional_sections {
        if section.items.is_empty() {
            continue;
        }
        push_heading(&mut out, &section.title.trim().to_uppercase());
        for item in &section.items {
            out.push_str(&format!("  - {}\n", item.trim()));
        }
    }

    out
}

/// `jane-doe-resume.txt` style file name.
pub fn file_name(resume: &ResumeData, extension: &str) -> String {
    let slug: String = resume
        .personal_info
        .full_name
        .split_whitespace()
        .map(|w| {
            w.chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        format!("resume.{extension}")
    } else {
        format!("{slug}-resume.{extension}")
    }
}

fn push_heading(out: &mut String, title: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(title);
    out.push('\n');
}

fn join_present(parts: &[&str], sep: &str) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}
