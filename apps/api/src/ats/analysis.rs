//! Advisory output built on top of a computed [`AtsScore`]: recommendations,
//! keyword and format breakdowns, and the industry benchmark band.
//!
//! Nothing here feeds back into the score.

use serde::{Deserialize, Serialize};

use crate::ats::keywords::extract_keywords;
use crate::ats::scoring::{calculate_ats_score, text_len, AtsScore};
use crate::models::resume::ResumeContent;

const TECH_KEYWORDS: &[&str] = &[
    "javascript",
    "python",
    "react",
    "node",
    "sql",
    "aws",
    "docker",
    "kubernetes",
];

const SOFT_SKILL_KEYWORDS: &[&str] = &[
    "leadership",
    "communication",
    "teamwork",
    "management",
    "collaboration",
];

const KEYWORD_PREVIEW_LEN: usize = 20;

const FORMAT_RECOMMENDATIONS: &[&str] = &[
    "Use standard section headers (Experience, Education, Skills)",
    "Keep formatting consistent throughout the resume",
    "Use bullet points for easy scanning",
    "Ensure dates are in a consistent format",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordAnalysis {
    pub total_keywords: usize,
    pub keywords: Vec<String>,
    pub tech_keywords: Vec<String>,
    pub soft_skill_keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatAnalysis {
    pub score: u32,
    pub issues: Vec<String>,
    pub strengths: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryBenchmark {
    pub category: String,
    pub percentile: u32,
    pub message: String,
}

/// Complete report for an ad-hoc analysis request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsAnalysis {
    pub ats_score: AtsScore,
    pub recommendations: Vec<String>,
    pub keyword_analysis: KeywordAnalysis,
    pub format_analysis: FormatAnalysis,
    pub industry_benchmark: IndustryBenchmark,
}

/// Maps sub-scores below their thresholds to fixed advice.
pub fn generate_recommendations(score: &AtsScore) -> Vec<String> {
    let mut recommendations = Vec::new();

    if score.contact_info_score < 15 {
        recommendations.push("Ensure all contact information is complete and properly formatted");
    }
    if score.keywords_score < 20 {
        recommendations.push("Include more industry-specific keywords and technical skills");
        recommendations.push("Use keywords from the job description you're applying for");
    }
    if score.format_score < 15 {
        recommendations.push("Use a clean, simple format that ATS systems can easily parse");
        recommendations.push("Avoid complex layouts, graphics, and unusual fonts");
    }
    if score.experience_score < 15 {
        recommendations.push("Provide more detailed job descriptions with quantifiable achievements");
        recommendations.push("Use action verbs and specific metrics in your experience section");
    }
    if score.skills_score < 10 {
        recommendations.push("Add more relevant technical and soft skills");
        recommendations.push("Include both hard and soft skills relevant to your target role");
    }

    recommendations.into_iter().map(String::from).collect()
}

/// Summarizes an extracted keyword set.
pub fn analyze_keywords(keywords: &[String]) -> KeywordAnalysis {
    let pick = |allow: &[&str]| -> Vec<String> {
        keywords
            .iter()
            .filter(|k| allow.contains(&k.as_str()))
            .cloned()
            .collect()
    };

    KeywordAnalysis {
        total_keywords: keywords.len(),
        keywords: keywords.iter().take(KEYWORD_PREVIEW_LEN).cloned().collect(),
        tech_keywords: pick(TECH_KEYWORDS),
        soft_skill_keywords: pick(SOFT_SKILL_KEYWORDS),
    }
}

/// Structural check; each issue costs 20 points off 100.
pub fn analyze_format(content: &ResumeContent) -> FormatAnalysis {
    let mut issues = Vec::new();
    let mut strengths = Vec::new();

    let mut check = |ok: bool, strength: &str, issue: &str| {
        if ok {
            strengths.push(strength.to_string());
        } else {
            issues.push(issue.to_string());
        }
    };

    check(
        !content.personal_info.full_name.is_empty(),
        "Complete personal information section",
        "Missing or incomplete personal information",
    );
    check(
        text_len(&content.professional_summary) >= 50,
        "Professional summary present",
        "Professional summary is missing or too short",
    );
    check(
        !content.work_experience.is_empty(),
        "Work experience section included",
        "No work experience provided",
    );
    check(
        content.skills.len() >= 5,
        "Good variety of skills listed",
        "Insufficient skills listed (aim for 8-12)",
    );

    let score = 100u32.saturating_sub(issues.len() as u32 * 20);

    FormatAnalysis {
        score,
        issues,
        strengths,
        recommendations: FORMAT_RECOMMENDATIONS.iter().map(|s| s.to_string()).collect(),
    }
}

/// Places a total score into one of five benchmark bands.
pub fn industry_benchmark(total_score: u32) -> IndustryBenchmark {
    let (category, percentile) = match total_score {
        s if s >= 90 => ("Excellent", 95),
        s if s >= 80 => ("Very Good", 80),
        s if s >= 70 => ("Good", 65),
        s if s >= 60 => ("Fair", 40),
        _ => ("Needs Improvement", 20),
    };

    IndustryBenchmark {
        category: category.to_string(),
        percentile,
        message: format!(
            "Your resume scores in the {percentile}th percentile of resumes we've analyzed."
        ),
    }
}

/// Scores the content from scratch and assembles the full advisory report.
pub fn analyze_resume(content: &ResumeContent) -> AtsAnalysis {
    let keywords = extract_keywords(content);
    let ats_score = calculate_ats_score(content, &keywords);

    AtsAnalysis {
        recommendations: generate_recommendations(&ats_score),
        keyword_analysis: analyze_keywords(&keywords),
        format_analysis: analyze_format(content),
        industry_benchmark: industry_benchmark(ats_score.total_score),
        ats_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{PersonalInfo, WorkExperience};
    use chrono::Utc;

    fn score(contact: u32, keywords: u32, format: u32, experience: u32, skills: u32) -> AtsScore {
        AtsScore {
            total_score: contact + keywords + format + experience + skills,
            contact_info_score: contact,
            keywords_score: keywords,
            format_score: format,
            experience_score: experience,
            skills_score: skills,
            suggestions: vec![],
            last_updated: Utc::now(),
        }
    }

    fn owned(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_benchmark_bands() {
        let excellent = industry_benchmark(95);
        assert_eq!(excellent.category, "Excellent");
        assert_eq!(excellent.percentile, 95);

        let low = industry_benchmark(55);
        assert_eq!(low.category, "Needs Improvement");
        assert_eq!(low.percentile, 20);
        assert_eq!(
            low.message,
            "Your resume scores in the 20th percentile of resumes we've analyzed."
        );

        assert_eq!(industry_benchmark(90).category, "Excellent");
        assert_eq!(industry_benchmark(89).category, "Very Good");
        assert_eq!(industry_benchmark(70).percentile, 65);
        assert_eq!(industry_benchmark(60).category, "Fair");
    }

    #[test]
    fn test_perfect_score_has_no_recommendations() {
        assert!(generate_recommendations(&score(20, 25, 20, 20, 15)).is_empty());
    }

    #[test]
    fn test_recommendation_thresholds() {
        let recs = generate_recommendations(&score(14, 20, 15, 15, 10));
        assert_eq!(
            recs,
            vec!["Ensure all contact information is complete and properly formatted"]
        );

        let recs = generate_recommendations(&score(15, 19, 15, 15, 9));
        assert_eq!(recs.len(), 4);
        assert_eq!(recs[0], "Include more industry-specific keywords and technical skills");
        assert_eq!(recs[3], "Include both hard and soft skills relevant to your target role");
    }

    #[test]
    fn test_zero_score_triggers_every_recommendation() {
        assert_eq!(generate_recommendations(&score(0, 0, 0, 0, 0)).len(), 9);
    }

    #[test]
    fn test_keyword_analysis_filters_allow_lists() {
        let keywords = owned(&[
            "python",
            "leadership",
            "node.js",
            "docker",
            "mentoring",
            "communication",
        ]);
        let analysis = analyze_keywords(&keywords);
        assert_eq!(analysis.total_keywords, 6);
        assert_eq!(analysis.tech_keywords, vec!["python", "docker"]);
        assert_eq!(analysis.soft_skill_keywords, vec!["leadership", "communication"]);
    }

    #[test]
    fn test_keyword_analysis_previews_first_twenty() {
        let keywords: Vec<String> = (0..30).map(|i| format!("kw{i}")).collect();
        let analysis = analyze_keywords(&keywords);
        assert_eq!(analysis.total_keywords, 30);
        assert_eq!(analysis.keywords.len(), 20);
        assert_eq!(analysis.keywords[19], "kw19");
    }

    #[test]
    fn test_format_analysis_empty_resume() {
        let analysis = analyze_format(&ResumeContent::default());
        assert_eq!(analysis.issues.len(), 4);
        assert!(analysis.strengths.is_empty());
        assert_eq!(analysis.score, 20);
        assert_eq!(analysis.recommendations.len(), 4);
    }

    #[test]
    fn test_format_analysis_complete_resume() {
        let content = ResumeContent {
            personal_info: PersonalInfo {
                full_name: "Linus".to_string(),
                ..Default::default()
            },
            professional_summary: "x".repeat(50),
            work_experience: vec![WorkExperience::default()],
            skills: owned(&["a", "b", "c", "d", "e"]),
            ..Default::default()
        };
        let analysis = analyze_format(&content);
        assert!(analysis.issues.is_empty());
        assert_eq!(analysis.strengths.len(), 4);
        assert_eq!(analysis.score, 100);
    }

    #[test]
    fn test_analyze_resume_is_consistent_with_score() {
        let content = ResumeContent {
            skills: owned(&["Python", "Docker", "Leadership"]),
            ..Default::default()
        };
        let analysis = analyze_resume(&content);
        assert_eq!(analysis.keyword_analysis.total_keywords, 3);
        assert_eq!(analysis.ats_score.keywords_score, 6);
        assert_eq!(analysis.industry_benchmark.category, "Needs Improvement");
        assert_eq!(analysis.keyword_analysis.tech_keywords, vec!["python", "docker"]);
        assert!(!analysis.recommendations.is_empty());
    }
}
