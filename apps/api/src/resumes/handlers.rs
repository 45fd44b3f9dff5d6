//! Axum route handlers for the Resume API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::ats::scoring::{score_content, AtsScore};
use crate::errors::AppError;
use crate::models::resume::{Resume, ResumeDraft};
use crate::resumes::repository::{ResumeFilter, SearchQuery};
use crate::resumes::service::{create_resume, duplicate_resume, update_resume};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ResumeListResponse {
    pub data: Vec<Resume>,
    pub count: usize,
}

impl From<Vec<Resume>> for ResumeListResponse {
    fn from(data: Vec<Resume>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsScoreResponse {
    pub resume_id: Uuid,
    pub resume_name: String,
    pub ats_score: AtsScore,
}

/// GET /api/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Query(filter): Query<ResumeFilter>,
) -> Result<Json<ResumeListResponse>, AppError> {
    let resumes = state.repo.list(&filter).await?;
    Ok(Json(resumes.into()))
}

/// GET /api/resumes/search
pub async fn handle_search_resumes(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ResumeListResponse>, AppError> {
    let resumes = state.repo.search(&query).await?;
    Ok(Json(resumes.into()))
}

/// GET /api/resumes/:id
///
/// Returns the stored record, including the score computed at its last save.
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Resume>, AppError> {
    let resume = state
        .repo
        .get(id)
        .await?
        .ok_or_else(AppError::resume_not_found)?;
    Ok(Json(resume))
}

/// POST /api/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Resume>), AppError> {
    let draft: ResumeDraft = serde_json::from_value(body)
        .map_err(|e| AppError::Validation(format!("Invalid resume: {e}")))?;
    let resume = create_resume(state.repo.as_ref(), draft).await?;
    Ok((StatusCode::CREATED, Json(resume)))
}

/// PUT /api/resumes/:id
pub async fn handle_update_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<Value>,
) -> Result<Json<Resume>, AppError> {
    let resume = update_resume(state.repo.as_ref(), id, patch).await?;
    Ok(Json(resume))
}

/// DELETE /api/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.repo.delete(id).await? {
        return Err(AppError::resume_not_found());
    }
    tracing::info!("Deleted resume {id}");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/resumes/:id/ats-score
///
/// Recomputes the score from the stored content without persisting it.
pub async fn handle_get_ats_score(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AtsScoreResponse>, AppError> {
    let resume = state
        .repo
        .get(id)
        .await?
        .ok_or_else(AppError::resume_not_found)?;

    let scored = score_content(resume.content());
    Ok(Json(AtsScoreResponse {
        resume_id: resume.id,
        resume_name: resume.content().personal_info.full_name.clone(),
        ats_score: scored.ats_score,
    }))
}

/// POST /api/resumes/:id/duplicate
pub async fn handle_duplicate_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<Resume>), AppError> {
    let copy = duplicate_resume(state.repo.as_ref(), id).await?;
    Ok((StatusCode::CREATED, Json(copy)))
}
