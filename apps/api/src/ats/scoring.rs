//! ATS scoring — five independent sub-score calculators and the aggregator
//! that sums them into an [`AtsScore`].
//!
//! Every calculator is a pure function of the resume content. Each returns its
//! raw points together with the suggestions triggered by the same thresholds
//! that kept it below its maximum. Sub-scores are rounded individually and the
//! total is the sum of the rounded values, so it can never exceed 100.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ats::keywords::extract_keywords;
use crate::models::resume::ResumeContent;

pub const CONTACT_INFO_MAX: f64 = 20.0;
pub const KEYWORDS_MAX: f64 = 25.0;
pub const FORMAT_MAX: f64 = 20.0;
pub const EXPERIENCE_MAX: f64 = 20.0;
pub const SKILLS_MAX: f64 = 15.0;

const EXPERIENCE_ENTRY_MAX: f64 = 5.0;
const DETAILED_TEXT_LEN: usize = 100;

/// Skills that make a missing GitHub profile worth pointing out.
const GITHUB_SIGNAL_SKILLS: &[&str] = &["javascript", "python", "java", "react", "node"];

/// Immutable result of one scoring pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsScore {
    pub total_score: u32,
    pub contact_info_score: u32,
    pub keywords_score: u32,
    pub format_score: u32,
    pub experience_score: u32,
    pub skills_score: u32,
    pub suggestions: Vec<String>,
    pub last_updated: DateTime<Utc>,
}

/// Keyword set and score computed together, as stored on a resume.
#[derive(Debug, Clone)]
pub struct ScoredContent {
    pub keywords: Vec<String>,
    pub ats_score: AtsScore,
}

/// Raw output of a single calculator before rounding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubScore {
    pub points: f64,
    pub suggestions: Vec<String>,
}

impl SubScore {
    fn suggest(&mut self, text: &str) {
        self.suggestions.push(text.to_string());
    }

    /// Clamps to `max` and rounds half away from zero.
    fn rounded(&self, max: f64) -> u32 {
        self.points.clamp(0.0, max).round() as u32
    }
}

/// Length in UTF-16 code units, the unit browser clients count in.
pub(crate) fn text_len(text: &str) -> usize {
    text.encode_utf16().count()
}

pub(crate) fn has_text(value: Option<&str>) -> bool {
    value.map(|v| !v.is_empty()).unwrap_or(false)
}

pub(crate) fn has_any_skill(content: &ResumeContent, candidates: &[&str]) -> bool {
    content
        .skills
        .iter()
        .any(|skill| candidates.contains(&skill.to_lowercase().as_str()))
}

/// +5 for each of full name, email, phone and location.
pub fn contact_info_score(content: &ResumeContent) -> SubScore {
    let info = &content.personal_info;
    let mut sub = SubScore::default();

    for field in [&info.full_name, &info.email, &info.phone, &info.location] {
        if !field.is_empty() {
            sub.points += 5.0;
        }
    }

    if !has_text(info.linkedin.as_deref()) {
        sub.suggest("Add LinkedIn profile for better visibility");
    }
    if !has_text(info.github.as_deref()) && has_any_skill(content, GITHUB_SIGNAL_SKILLS) {
        sub.suggest("Add GitHub profile to showcase your technical projects");
    }
    sub
}

/// Two points per extracted keyword, saturating at 25.
pub fn keywords_score(keyword_count: usize) -> SubScore {
    let mut sub = SubScore {
        points: (keyword_count as f64 * 2.0).min(KEYWORDS_MAX),
        suggestions: Vec::new(),
    };
    if keyword_count < 10 {
        sub.suggest("Add more relevant keywords to improve ATS visibility");
    }
    sub
}

/// Section presence: summary, work experience, education, five skills.
pub fn format_score(content: &ResumeContent) -> SubScore {
    let mut sub = SubScore::default();

    if text_len(&content.professional_summary) >= DETAILED_TEXT_LEN {
        sub.points += 5.0;
    } else {
        sub.suggest("Add a professional summary of at least 100 characters");
    }

    if !content.work_experience.is_empty() {
        sub.points += 5.0;
    } else {
        sub.suggest("Add work experience to strengthen your resume");
    }

    if !content.education.is_empty() {
        sub.points += 5.0;
    } else {
        sub.suggest("Add education information");
    }

    if content.skills.len() >= 5 {
        sub.points += 5.0;
    } else {
        sub.suggest("Add at least 5 relevant skills");
    }
    sub
}

/// Up to five points per work entry: detailed description and a titled role.
pub fn experience_score(content: &ResumeContent) -> SubScore {
    let mut sub = SubScore::default();

    let total: f64 = content
        .work_experience
        .iter()
        .map(|exp| {
            let mut points = 0.0;
            if text_len(&exp.description) >= DETAILED_TEXT_LEN {
                points += 3.0;
            }
            if !exp.position.is_empty() && !exp.company.is_empty() {
                points += 2.0;
            }
            f64::min(points, EXPERIENCE_ENTRY_MAX)
        })
        .sum();
    sub.points = total.min(EXPERIENCE_MAX);

    if content
        .work_experience
        .iter()
        .any(|exp| text_len(&exp.description) < DETAILED_TEXT_LEN)
    {
        sub.suggest("Provide detailed job descriptions with quantifiable achievements");
    }
    sub
}

/// One and a half points per skill, saturating at 15.
pub fn skills_score(content: &ResumeContent) -> SubScore {
    let count = content.skills.len();
    let mut sub = SubScore {
        points: (count as f64 * 1.5).min(SKILLS_MAX),
        suggestions: Vec::new(),
    };
    if count < 8 {
        sub.suggest("Add more relevant skills (aim for 8-12 skills)");
    }
    sub
}

/// Aggregates the five sub-scores for content whose keyword set is already known.
pub fn calculate_ats_score(content: &ResumeContent, keywords: &[String]) -> AtsScore {
    let contact = contact_info_score(content);
    let keyword = keywords_score(keywords.len());
    let format = format_score(content);
    let experience = experience_score(content);
    let skills = skills_score(content);

    let contact_info_score = contact.rounded(CONTACT_INFO_MAX);
    let keywords_score = keyword.rounded(KEYWORDS_MAX);
    let format_score = format.rounded(FORMAT_MAX);
    let experience_score = experience.rounded(EXPERIENCE_MAX);
    let skills_score = skills.rounded(SKILLS_MAX);

    let suggestions = [contact, keyword, format, experience, skills]
        .into_iter()
        .flat_map(|sub| sub.suggestions)
        .collect();

    AtsScore {
        total_score: contact_info_score
            + keywords_score
            + format_score
            + experience_score
            + skills_score,
        contact_info_score,
        keywords_score,
        format_score,
        experience_score,
        skills_score,
        suggestions,
        last_updated: Utc::now(),
    }
}

/// Full scoring pass: extracts keywords, then scores against them.
pub fn score_content(content: &ResumeContent) -> ScoredContent {
    let keywords = extract_keywords(content);
    let ats_score = calculate_ats_score(content, &keywords);
    ScoredContent {
        keywords,
        ats_score,
    }
}
