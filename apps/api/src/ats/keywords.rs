// Fixed ATS vocabulary. Order matters: matched/missing lists follow it.
//
// Matching is plain case-insensitive substring search, so terms that are
// substrings of everyday words ("Go", "R", "Rust", "Scala", "REST") are
// deliberately absent.

pub const TECHNICAL_KEYWORDS: &[&str] = &[
    "JavaScript",
    "TypeScript",
    "Python",
    "Java",
    "C++",
    "C#",
    "Ruby",
    "PHP",
    "Swift",
    "Kotlin",
    "Golang",
    "React",
    "Angular",
    "Vue",
    "Svelte",
    "Node.js",
    "Express.js",
    "Next.js",
    "Django",
    "Flask",
    "Spring Boot",
    "HTML",
    "CSS",
    "Tailwind",
    "SQL",
    "MySQL",
    "PostgreSQL",
    "MongoDB",
    "Redis",
    "GraphQL",
    "REST API",
    "AWS",
    "Azure",
    "GCP",
    "Docker",
    "Kubernetes",
    "Terraform",
    "Jenkins",
    "CI/CD",
    "GitHub",
    "Linux",
    "Machine Learning",
    "TensorFlow",
    "PyTorch",
    "Microservices",
];

pub const SOFT_SKILL_KEYWORDS: &[&str] = &[
    "Communication",
    "Leadership",
    "Teamwork",
    "Problem Solving",
    "Collaboration",
    "Time Management",
    "Critical Thinking",
    "Adaptability",
    "Mentoring",
    "Agile",
    "Scrum",
];

/// Technical terms first, then soft skills.
pub fn vocabulary() -> impl Iterator<Item = &'static str> {
    TECHNICAL_KEYWORDS
        .iter()
        .chain(SOFT_SKILL_KEYWORDS.iter())
        .copied()
}

/// Vocabulary terms that occur (case-insensitively) in `text`.
pub fn extract_keywords(text: &str) -> Vec<&'static str> {
    let haystack = text.to_lowercase();
    vocabulary()
        .filter(|kw| haystack.contains(&kw.to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_sizes() {
        assert_eq!(TECHNICAL_KEYWORDS.len(), 45);
        assert_eq!(SOFT_SKILL_KEYWORDS.len(), 11);
    }

    #[test]
    fn test_extract_is_case_insensitive() {
        assert_eq!(extract_keywords("we use DOCKER and kubernetes"), vec![
            "Docker",
            "Kubernetes"
        ]);
    }

    #[test]
    fn test_extract_keeps_vocabulary_order() {
        let found = extract_keywords("Scrum, AWS, React");
        assert_eq!(found, vec!["React", "AWS", "Scrum"]);
    }

    #[test]
    fn test_extract_empty_text() {
        assert!(extract_keywords("").is_empty());
    }

    #[test]
    fn test_scenario_sentence_only_hits_react_and_aws() {
        assert_eq!(
            extract_keywords("Looking for a React and AWS engineer"),
            vec!["React", "AWS"]
        );
    }
}
