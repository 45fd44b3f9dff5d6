use std::sync::OnceLock;

use regex::Regex;

use crate::errors::AppError;
use crate::models::resume::ResumeDraft;

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email pattern"))
}

/// Checks the fields a stored resume cannot do without. Expects normalized
/// content (trimmed, lower-cased email).
pub fn validate_draft(draft: &ResumeDraft) -> Result<(), AppError> {
    let info = &draft.content.personal_info;
    if info.full_name.is_empty() || info.email.is_empty() {
        return Err(AppError::Validation(
            "Personal information with name and email is required".to_string(),
        ));
    }
    if !email_pattern().is_match(&info.email) {
        return Err(AppError::Validation("Invalid email format".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{PersonalInfo, ResumeContent};

    fn draft(name: &str, email: &str) -> ResumeDraft {
        ResumeDraft {
            content: ResumeContent {
                personal_info: PersonalInfo {
                    full_name: name.to_string(),
                    email: email.to_string(),
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(validate_draft(&draft("Ada", "ada@example.com")).is_ok());
    }

    #[test]
    fn test_missing_name_or_email_fails() {
        assert!(matches!(
            validate_draft(&draft("", "ada@example.com")),
            Err(AppError::Validation(msg)) if msg.contains("name and email")
        ));
        assert!(validate_draft(&draft("Ada", "")).is_err());
    }

    #[test]
    fn test_malformed_email_fails() {
        for email in ["ada", "ada@example", "ada @example.com", "@example.com"] {
            assert!(
                matches!(validate_draft(&draft("Ada", email)), Err(AppError::Validation(msg)) if msg == "Invalid email format"),
                "accepted {email}"
            );
        }
    }
}
