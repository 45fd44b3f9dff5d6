//! Axum route handlers for the ATS analysis API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::ats::analysis::{analyze_resume, AtsAnalysis};
use crate::ats::improvements::{detailed_improvements, DetailedImprovements};
use crate::ats::industry::industry_keywords;
use crate::errors::AppError;
use crate::models::resume::ResumeContent;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct IndustryKeywordsQuery {
    pub industry: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryKeywordsResponse {
    pub industry: String,
    pub role: String,
    pub keywords: Vec<String>,
    pub total_count: usize,
}

/// POST /api/ats/analyze
///
/// Scores raw, unsaved resume content. Any JSON object is accepted; fields
/// that are missing or malformed count as empty.
pub async fn handle_analyze(Json(body): Json<Value>) -> Result<Json<AtsAnalysis>, AppError> {
    if !body.is_object() {
        return Err(AppError::Validation(
            "Resume content must be a JSON object".to_string(),
        ));
    }
    let content: ResumeContent = serde_json::from_value(body)
        .map_err(|e| AppError::Validation(format!("Invalid resume content: {e}")))?;

    let analysis = analyze_resume(&content.normalized());
    info!(
        "Analyzed resume content: score {} ({})",
        analysis.ats_score.total_score, analysis.industry_benchmark.category
    );
    Ok(Json(analysis))
}

/// GET /api/ats/keywords?industry=&role=
pub async fn handle_industry_keywords(
    Query(query): Query<IndustryKeywordsQuery>,
) -> Json<IndustryKeywordsResponse> {
    let industry = query.industry.filter(|s| !s.is_empty());
    let role = query.role.filter(|s| !s.is_empty());

    let keywords = industry_keywords(industry.as_deref(), role.as_deref());
    Json(IndustryKeywordsResponse {
        industry: industry.unwrap_or_else(|| "general".to_string()),
        role: role.unwrap_or_else(|| "general".to_string()),
        total_count: keywords.len(),
        keywords,
    })
}

/// GET /api/ats/improvements/:id
pub async fn handle_improvements(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DetailedImprovements>, AppError> {
    let resume = state
        .repo
        .get(id)
        .await?
        .ok_or_else(AppError::resume_not_found)?;

    Ok(Json(detailed_improvements(resume.content(), &resume.keywords)))
}
