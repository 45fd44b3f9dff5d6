//! Persistence-side flows. Every write recomputes `keywords` and `atsScore`
//! through the ATS engine before the record reaches the repository.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::ats::scoring::score_content;
use crate::errors::AppError;
use crate::models::resume::{Resume, ResumeDraft};
use crate::resumes::repository::ResumeRepository;
use crate::resumes::validation::validate_draft;

/// Normalizes and validates a draft, then scores it into a storable record.
pub fn build_resume(
    id: Uuid,
    draft: ResumeDraft,
    created_at: DateTime<Utc>,
) -> Result<Resume, AppError> {
    let draft = ResumeDraft {
        content: draft.content.normalized(),
        ..draft
    };
    validate_draft(&draft)?;

    let scored = score_content(&draft.content);
    Ok(Resume {
        id,
        draft,
        keywords: scored.keywords,
        ats_score: Some(scored.ats_score),
        created_at,
        updated_at: Utc::now(),
    })
}

/// Overlays the top-level keys of `patch` onto `existing`.
pub fn apply_update(existing: &ResumeDraft, patch: Value) -> Result<ResumeDraft, AppError> {
    let Value::Object(patch) = patch else {
        return Err(AppError::Validation(
            "Update body must be a JSON object".to_string(),
        ));
    };

    let mut merged = serde_json::to_value(existing).map_err(anyhow::Error::from)?;
    if let Value::Object(fields) = &mut merged {
        fields.extend(patch);
    }

    serde_json::from_value(merged)
        .map_err(|e| AppError::Validation(format!("Invalid resume update: {e}")))
}

pub async fn create_resume(
    repo: &dyn ResumeRepository,
    draft: ResumeDraft,
) -> Result<Resume, AppError> {
    let resume = build_resume(Uuid::new_v4(), draft, Utc::now())?;
    repo.insert(&resume).await?;
    info!(
        "Created resume {} (ATS score {})",
        resume.id,
        resume.total_score()
    );
    Ok(resume)
}

pub async fn update_resume(
    repo: &dyn ResumeRepository,
    id: Uuid,
    patch: Value,
) -> Result<Resume, AppError> {
    let existing = repo.get(id).await?.ok_or_else(AppError::resume_not_found)?;
    let draft = apply_update(&existing.draft, patch)?;
    let resume = build_resume(id, draft, existing.created_at)?;

    if !repo.update(&resume).await? {
        return Err(AppError::resume_not_found());
    }
    info!(
        "Updated resume {id} (ATS score {} -> {})",
        existing.total_score(),
        resume.total_score()
    );
    Ok(resume)
}

pub async fn duplicate_resume(repo: &dyn ResumeRepository, id: Uuid) -> Result<Resume, AppError> {
    let original = repo.get(id).await?.ok_or_else(AppError::resume_not_found)?;

    let mut draft = original.draft;
    draft.content.personal_info.full_name =
        format!("{} (Copy)", draft.content.personal_info.full_name);

    let copy = build_resume(Uuid::new_v4(), draft, Utc::now())?;
    repo.insert(&copy).await?;
    info!("Duplicated resume {id} as {}", copy.id);
    Ok(copy)
}
