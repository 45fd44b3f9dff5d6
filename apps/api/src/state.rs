use std::sync::Arc;

use crate::resumes::repository::ResumeRepository;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Postgres or in-process store, chosen once at startup from `STORAGE_BACKEND`.
    pub repo: Arc<dyn ResumeRepository>,
}
