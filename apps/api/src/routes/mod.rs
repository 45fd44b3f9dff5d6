pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::ats::handlers as ats;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route(
            "/api/resumes",
            get(resumes::handle_list_resumes).post(resumes::handle_create_resume),
        )
        .route("/api/resumes/search", get(resumes::handle_search_resumes))
        .route(
            "/api/resumes/:id",
            get(resumes::handle_get_resume)
                .put(resumes::handle_update_resume)
                .delete(resumes::handle_delete_resume),
        )
        .route(
            "/api/resumes/:id/ats-score",
            get(resumes::handle_get_ats_score),
        )
        .route(
            "/api/resumes/:id/duplicate",
            post(resumes::handle_duplicate_resume),
        )
        // ATS analysis API
        .route("/api/ats/analyze", post(ats::handle_analyze))
        .route("/api/ats/keywords", get(ats::handle_industry_keywords))
        .route(
            "/api/ats/improvements/:id",
            get(ats::handle_improvements),
        )
        .with_state(state)
}
