use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::ats::scoring::AtsScore;

/// Treats an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Absent, `null` or wrongly-typed values all fall back to the default, so
/// any submitted shape can still be scored.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default())
}

/// Numbers and booleans are kept as their text form.
fn scalar_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .and_then(scalar_string)
        .unwrap_or_default())
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(scalar_string))
}

/// Decodes each element on its own and drops only the ones that don't fit.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items.into_iter().filter_map(scalar_string).collect(),
        _ => Vec::new(),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    #[serde(deserialize_with = "lenient_string")]
    pub full_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient_string")]
    pub location: String,
    #[serde(deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    #[serde(deserialize_with = "lenient_string")]
    pub school: String,
    #[serde(deserialize_with = "lenient_string")]
    pub degree: String,
    #[serde(deserialize_with = "lenient_string")]
    pub field: String,
    #[serde(deserialize_with = "lenient_string")]
    pub start_date: String,
    #[serde(deserialize_with = "lenient_string")]
    pub end_date: String,
    #[serde(deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperience {
    #[serde(deserialize_with = "lenient_string")]
    pub company: String,
    #[serde(deserialize_with = "lenient_string")]
    pub position: String,
    #[serde(deserialize_with = "lenient_string")]
    pub start_date: String,
    #[serde(deserialize_with = "lenient_string")]
    pub end_date: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_string")]
    pub technologies: String,
    #[serde(deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// Everything the ATS engine reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeContent {
    #[serde(deserialize_with = "lenient")]
    pub personal_info: PersonalInfo,
    #[serde(deserialize_with = "lenient_string")]
    pub professional_summary: String,
    #[serde(deserialize_with = "lenient_list")]
    pub education: Vec<Education>,
    #[serde(deserialize_with = "lenient_list")]
    pub work_experience: Vec<WorkExperience>,
    #[serde(deserialize_with = "lenient_strings")]
    pub skills: Vec<String>,
    #[serde(deserialize_with = "lenient_strings")]
    pub certifications: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub projects: Vec<Project>,
}

impl ResumeContent {
    /// Trims every string field and lower-cases the email, the way stored
    /// resumes are normalized before scoring.
    pub fn normalized(mut self) -> Self {
        let info = &mut self.personal_info;
        trim_in_place(&mut info.full_name);
        trim_in_place(&mut info.email);
        info.email = info.email.to_lowercase();
        trim_in_place(&mut info.phone);
        trim_in_place(&mut info.location);
        trim_opt(&mut info.linkedin);
        trim_opt(&mut info.website);
        trim_opt(&mut info.github);

        trim_in_place(&mut self.professional_summary);

        for edu in &mut self.education {
            trim_in_place(&mut edu.school);
            trim_in_place(&mut edu.degree);
            trim_in_place(&mut edu.field);
            trim_opt(&mut edu.gpa);
        }
        for exp in &mut self.work_experience {
            trim_in_place(&mut exp.company);
            trim_in_place(&mut exp.position);
            trim_in_place(&mut exp.description);
            trim_opt(&mut exp.location);
        }
        for project in &mut self.projects {
            trim_in_place(&mut project.name);
            trim_in_place(&mut project.description);
            trim_in_place(&mut project.technologies);
            trim_opt(&mut project.link);
        }
        self.skills.iter_mut().for_each(trim_in_place);
        self.certifications.iter_mut().for_each(trim_in_place);
        self
    }
}

fn trim_in_place(s: &mut String) {
    let trimmed = s.trim();
    if trimmed.len() != s.len() {
        *s = trimmed.to_string();
    }
}

fn trim_opt(s: &mut Option<String>) {
    if let Some(inner) = s.as_mut() {
        trim_in_place(inner);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    #[default]
    Modern,
    Classic,
    Creative,
    Minimal,
    Professional,
}

impl Template {
    pub fn as_str(&self) -> &'static str {
        match self {
            Template::Modern => "modern",
            Template::Classic => "classic",
            Template::Creative => "creative",
            Template::Minimal => "minimal",
            Template::Professional => "professional",
        }
    }
}

fn default_visible() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionOrder {
    pub id: String,
    pub name: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

/// Client-editable part of a stored resume: presentation settings plus content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub template: Template,
    #[serde(default, deserialize_with = "null_as_default")]
    pub section_order: Vec<SectionOrder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(flatten)]
    pub content: ResumeContent,
}

/// A persisted resume with its derived keyword set and last computed score.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub id: Uuid,
    #[serde(flatten)]
    pub draft: ResumeDraft,
    pub keywords: Vec<String>,
    pub ats_score: Option<AtsScore>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resume {
    pub fn content(&self) -> &ResumeContent {
        &self.draft.content
    }

    pub fn total_score(&self) -> u32 {
        self.ats_score.as_ref().map(|s| s.total_score).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_object_deserializes_to_empty_content() {
        let content: ResumeContent = serde_json::from_value(json!({})).unwrap();
        assert_eq!(content, ResumeContent::default());
    }

    #[test]
    fn test_null_fields_are_treated_as_missing() {
        let content: ResumeContent = serde_json::from_value(json!({
            "personalInfo": null,
            "professionalSummary": null,
            "skills": null,
            "workExperience": [{ "company": "Acme", "description": null }]
        }))
        .unwrap();
        assert!(content.skills.is_empty());
        assert_eq!(content.professional_summary, "");
        assert_eq!(content.work_experience[0].company, "Acme");
        assert_eq!(content.work_experience[0].description, "");
    }

    #[test]
    fn test_malformed_fields_fall_back_to_empty() {
        let content: ResumeContent = serde_json::from_value(json!({
            "skills": "Rust, Go",
            "education": 3,
            "personalInfo": { "fullName": "Ada", "linkedin": ["not", "a", "url"] }
        }))
        .unwrap();
        assert!(content.skills.is_empty());
        assert!(content.education.is_empty());
        assert_eq!(content.personal_info.full_name, "Ada");
        assert_eq!(content.personal_info.linkedin, None);
    }

    #[test]
    fn test_bad_list_elements_drop_without_losing_siblings() {
        let content: ResumeContent = serde_json::from_value(json!({
            "skills": ["Rust", "Go", "Python", "SQL", "Docker", 5, null, { "x": 1 }],
            "workExperience": [
                null,
                { "company": "Acme", "position": "Engineer" },
                "freelance"
            ]
        }))
        .unwrap();
        assert_eq!(
            content.skills,
            vec!["Rust", "Go", "Python", "SQL", "Docker", "5"]
        );
        assert_eq!(content.work_experience.len(), 1);
        assert_eq!(content.work_experience[0].company, "Acme");
    }

    #[test]
    fn test_scalar_values_are_kept_as_text() {
        let content: ResumeContent = serde_json::from_value(json!({
            "personalInfo": {
                "fullName": "Ada",
                "email": "ada@example.com",
                "phone": 5550100,
                "location": true,
                "github": 42
            },
            "education": [{ "school": "Cambridge", "gpa": 3.9 }]
        }))
        .unwrap();
        assert_eq!(content.personal_info.phone, "5550100");
        assert_eq!(content.personal_info.location, "true");
        assert_eq!(content.personal_info.github.as_deref(), Some("42"));
        assert_eq!(content.education[0].gpa.as_deref(), Some("3.9"));

        let score = crate::ats::scoring::contact_info_score(&content);
        assert_eq!(score.points, 20.0);
    }

    #[test]
    fn test_camel_case_wire_names() {
        let content: ResumeContent = serde_json::from_value(json!({
            "personalInfo": { "fullName": "Ada Lovelace", "email": "ada@example.com" },
            "workExperience": [{ "company": "Analytical Engines", "position": "Engineer", "startDate": "1842" }]
        }))
        .unwrap();
        assert_eq!(content.personal_info.full_name, "Ada Lovelace");
        assert_eq!(content.work_experience[0].start_date, "1842");

        let value = serde_json::to_value(&content).unwrap();
        assert!(value.get("personalInfo").is_some());
        assert!(value["personalInfo"].get("linkedin").is_none());
    }

    #[test]
    fn test_normalized_trims_and_lowercases_email() {
        let content = ResumeContent {
            personal_info: PersonalInfo {
                full_name: "  Ada  ".to_string(),
                email: " Ada@Example.COM ".to_string(),
                linkedin: Some(" linkedin.com/in/ada ".to_string()),
                ..Default::default()
            },
            skills: vec![" Rust ".to_string()],
            ..Default::default()
        }
        .normalized();

        assert_eq!(content.personal_info.full_name, "Ada");
        assert_eq!(content.personal_info.email, "ada@example.com");
        assert_eq!(
            content.personal_info.linkedin.as_deref(),
            Some("linkedin.com/in/ada")
        );
        assert_eq!(content.skills, vec!["Rust".to_string()]);
    }

    #[test]
    fn test_draft_defaults_template_and_flattens_content() {
        let draft: ResumeDraft = serde_json::from_value(json!({
            "userId": "u-1",
            "skills": ["Rust"],
            "sectionOrder": [{ "id": "skills", "name": "Skills" }]
        }))
        .unwrap();
        assert_eq!(draft.template, Template::Modern);
        assert_eq!(draft.content.skills, vec!["Rust".to_string()]);
        assert!(draft.section_order[0].visible);
    }

    #[test]
    fn test_unknown_template_is_rejected() {
        let result: Result<ResumeDraft, _> =
            serde_json::from_value(json!({ "template": "neon" }));
        assert!(result.is_err());
    }
}
