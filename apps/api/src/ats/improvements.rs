//! Staged improvement plan for a stored resume.

use serde::{Deserialize, Serialize};

use crate::ats::scoring::{has_any_skill, has_text, text_len};
use crate::models::resume::ResumeContent;

const GITHUB_SIGNAL_SKILLS: &[&str] = &["javascript", "python", "java", "react"];

/// Related terms worth adding when a resume already carries the trigger keyword.
const KEYWORD_EXPANSIONS: &[(&str, &[&str])] = &[
    ("javascript", &["React", "Node.js", "TypeScript", "Express"]),
    (
        "python",
        &["Django", "Flask", "Pandas", "NumPy", "Machine Learning"],
    ),
];

const LONG_TERM: &[&str] = &[
    "Regularly update with new skills and experiences",
    "Customize keywords for each job application",
    "Seek additional certifications relevant to your field",
];

const FORMAT_SUGGESTIONS: &[&str] = &[
    "Use consistent date formats throughout",
    "Start bullet points with action verbs",
    "Quantify achievements with numbers and percentages",
    "Keep sections in a logical order",
    "Use standard section headers",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedImprovements {
    pub immediate: Vec<String>,
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
    pub keyword_suggestions: Vec<String>,
    pub format_suggestions: Vec<String>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Buckets advice by how quickly it can be acted on. `keywords` is the
/// resume's stored keyword set.
pub fn detailed_improvements(content: &ResumeContent, keywords: &[String]) -> DetailedImprovements {
    let info = &content.personal_info;
    let mut plan = DetailedImprovements::default();

    if !has_text(info.linkedin.as_deref()) {
        plan.immediate.push("Add LinkedIn profile URL".to_string());
    }
    if !has_text(info.github.as_deref()) && has_any_skill(content, GITHUB_SIGNAL_SKILLS) {
        plan.immediate.push("Add GitHub profile URL".to_string());
    }
    if content.skills.len() < 8 {
        plan.immediate
            .push("Add more relevant skills (aim for 8-12)".to_string());
    }

    if text_len(&content.professional_summary) < 100 {
        plan.short_term
            .push("Write a compelling professional summary (100-150 words)".to_string());
    }
    if content
        .work_experience
        .iter()
        .any(|exp| text_len(&exp.description) < 100)
    {
        plan.short_term
            .push("Enhance job descriptions with specific achievements and metrics".to_string());
    }

    plan.long_term = owned(LONG_TERM);

    for (trigger, related) in KEYWORD_EXPANSIONS {
        if keywords.iter().any(|k| k == trigger) {
            plan.keyword_suggestions.extend(owned(related));
        }
    }

    plan.format_suggestions = owned(FORMAT_SUGGESTIONS);
    plan
}
