// Prompt templates and static fallbacks for the career counselor.
// Reuses the shared system instruction from llm_client::prompts.

use crate::counselor::{AiContext, PromptMode};

const NONE_LISTED: &str = "none listed";
const DEFAULT_TARGET_ROLE: &str = "a tech role";
const DEFAULT_EXPERIENCE: &str = "not specified";

/// Skill-gap analysis. Replace `{skills}`, `{experience}`, `{projects}`, `{target_role}`.
pub const GAP_PROMPT_TEMPLATE: &str = r#"Analyze the skill gaps for a candidate targeting {target_role}.

Current skills: {skills}
Experience: {experience}
Projects: {projects}

1. List the most important skills they are missing for {target_role}.
2. For each missing skill, suggest one concrete way to learn it (course, project or certification).
3. Suggest the order in which to close the gaps."#;

/// Technical quiz. Replace `{skills}`, `{target_role}`.
pub const QUIZ_PROMPT_TEMPLATE: &str = r#"Create a short technical quiz for a candidate preparing for {target_role}.

Their skills: {skills}

Write 5 questions of increasing difficulty that test these skills.
Mix multiple-choice and short-answer questions.
After the questions, give an answer key with one-line explanations."#;

/// Mock interview. Replace `{skills}`, `{experience}`, `{projects}`, `{target_role}`, `{question}`.
pub const MOCK_PROMPT_TEMPLATE: &str = r#"Act as an interviewer running a mock interview for {target_role}.

Candidate skills: {skills}
Candidate experience: {experience}
Candidate projects: {projects}

{question}

Ask one interview question at a time. Start with a behavioral question about their experience,
then a technical question about one of their projects. After each question, describe what a
strong answer would cover."#;

/// Open career guidance. Replace `{skills}`, `{experience}`, `{projects}`, `{target_role}`, `{question}`.
pub const CAREER_PROMPT_TEMPLATE: &str = r#"Give career guidance to a candidate aiming for {target_role}.

Skills: {skills}
Experience: {experience}
Projects: {projects}

Their question: {question}

Cover realistic next roles, how to position their resume, and the one thing they should do this month."#;

const DEFAULT_CAREER_QUESTION: &str = "What should my next career step be?";

pub const GAP_FALLBACK: &str = "To identify skill gaps, compare your current skills against 3-5 job \
    postings for your target role. List the skills that appear repeatedly that you don't have yet, \
    then pick one to learn through a small hands-on project. Focus on fundamentals first: version \
    control, testing, and one cloud platform are asked for in most tech roles.";

pub const QUIZ_FALLBACK: &str = "Here is a quick practice quiz:\n\
    1. What is the difference between a process and a thread?\n\
    2. Explain what a REST API is and name its common HTTP methods.\n\
    3. What does Big-O notation describe?\n\
    4. How does a hash map handle collisions?\n\
    5. What is the purpose of version control?";

pub const MOCK_FALLBACK: &str = "Let's start your mock interview. Tell me about yourself and \
    walk me through a project you're proud of. What was your role, what challenges did you face, \
    and what was the measurable result?";

pub const CAREER_FALLBACK: &str = "Focus on building projects that show real impact, keep your \
    resume tailored to each application, and network with people already working in your target \
    role. Consistent, visible progress matters more than any single credential.";

/// Shown when no mode is selected or the selection is not recognized.
pub const MODE_SELECTION_MESSAGE: &str = "Please choose a counseling mode: \
    'gap' for skill-gap analysis, 'quiz' for a practice quiz, 'mock' for a mock interview, \
    or 'career' for general career guidance.";

/// Fills the template for `mode` from `ctx`. Empty fields get readable defaults.
pub fn build_prompt(mode: PromptMode, ctx: &AiContext) -> String {
    let template = match mode {
        PromptMode::Gap => GAP_PROMPT_TEMPLATE,
        PromptMode::Quiz => QUIZ_PROMPT_TEMPLATE,
        PromptMode::Mock => MOCK_PROMPT_TEMPLATE,
        PromptMode::Career => CAREER_PROMPT_TEMPLATE,
    };

    let question = match (mode, non_empty(ctx.question.as_deref())) {
        (PromptMode::Mock, Some(q)) => format!("Focus area requested by the candidate: {q}"),
        (PromptMode::Mock, None) => String::new(),
        (_, Some(q)) => q.to_string(),
        (_, None) => DEFAULT_CAREER_QUESTION.to_string(),
    };

    let skills = join_or_none(&ctx.skills);
    let projects = join_or_none(&ctx.projects);
    let experience = non_empty(Some(&ctx.experience)).unwrap_or(DEFAULT_EXPERIENCE);
    let target_role = non_empty(Some(&ctx.target_role)).unwrap_or(DEFAULT_TARGET_ROLE);

    fill_template(template, |name| match name {
        "skills" => Some(skills.as_str()),
        "projects" => Some(projects.as_str()),
        "experience" => Some(experience),
        "target_role" => Some(target_role),
        "question" => Some(question.as_str()),
        _ => None,
    })
}

/// Replaces each `{name}` in `template` with its value in one left-to-right
/// pass. Substituted text is never rescanned. Unknown names stay literal.
fn fill_template<'a>(template: &str, value_of: impl Fn(&str) -> Option<&'a str>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after
            .find('}')
            .and_then(|close| value_of(&after[..close]).map(|value| (close, value)));
        match substituted {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Static reply used when the model call fails.
pub fn fallback_for(mode: PromptMode) -> &'static str {
    match mode {
        PromptMode::Gap => GAP_FALLBACK,
        PromptMode::Quiz => QUIZ_FALLBACK,
        PromptMode::Mock => MOCK_FALLBACK,
        PromptMode::Career => CAREER_FALLBACK,
    }
}

fn join_or_none(items: &[String]) -> String {
    let present: Vec<&str> = items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if present.is_empty() {
        NONE_LISTED.to_string()
    } else {
        present.join(", ")
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
