//! Resume storage behind a trait, so handlers never know which backend is live.
//!
//! `PgResumeRepository` is the production store. `InMemoryResumeRepository`
//! serves local development and tests. `AppState` carries either as
//! `Arc<dyn ResumeRepository>`, chosen once at startup.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::ats::scoring::AtsScore;
use crate::models::resume::{Resume, ResumeDraft, Template};

/// Newest-first page size for plain listings.
pub const LIST_LIMIT: usize = 20;
/// Result cap for searches.
pub const SEARCH_LIMIT: usize = 10;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeFilter {
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// Case-insensitive substring of full name, email or any keyword.
    pub q: Option<String>,
    pub user_id: Option<String>,
    pub template: Option<Template>,
    pub min_score: Option<u32>,
}

impl SearchQuery {
    fn matches(&self, resume: &Resume) -> bool {
        if let Some(user_id) = &self.user_id {
            if resume.draft.user_id.as_ref() != Some(user_id) {
                return false;
            }
        }
        if let Some(template) = self.template {
            if resume.draft.template != template {
                return false;
            }
        }
        if let Some(min_score) = self.min_score {
            if resume.total_score() < min_score {
                return false;
            }
        }
        match self.q.as_deref().filter(|q| !q.is_empty()) {
            None => true,
            Some(q) => {
                let needle = q.to_lowercase();
                let info = &resume.content().personal_info;
                info.full_name.to_lowercase().contains(&needle)
                    || info.email.to_lowercase().contains(&needle)
                    || resume
                        .keywords
                        .iter()
                        .any(|k| k.to_lowercase().contains(&needle))
            }
        }
    }
}

#[async_trait]
pub trait ResumeRepository: Send + Sync {
    /// Short label reported by the health endpoint.
    fn backend(&self) -> &'static str;

    async fn insert(&self, resume: &Resume) -> Result<()>;

    async fn get(&self, id: Uuid) -> Result<Option<Resume>>;

    /// Replaces a stored resume. Returns `false` when `resume.id` is unknown.
    async fn update(&self, resume: &Resume) -> Result<bool>;

    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool>;

    async fn list(&self, filter: &ResumeFilter) -> Result<Vec<Resume>>;

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Resume>>;
}

// ────────────────────────────────────────────────────────────────────────────
// In-process store
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryResumeRepository {
    resumes: RwLock<HashMap<Uuid, Resume>>,
}

impl InMemoryResumeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn newest_first<F>(&self, limit: usize, keep: F) -> Vec<Resume>
    where
        F: Fn(&Resume) -> bool,
    {
        let resumes = self.resumes.read().await;
        let mut matched: Vec<Resume> = resumes.values().filter(|r| keep(*r)).cloned().collect();
        matched.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        matched.truncate(limit);
        matched
    }
}

#[async_trait]
impl ResumeRepository for InMemoryResumeRepository {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, resume: &Resume) -> Result<()> {
        self.resumes.write().await.insert(resume.id, resume.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Resume>> {
        Ok(self.resumes.read().await.get(&id).cloned())
    }

    async fn update(&self, resume: &Resume) -> Result<bool> {
        let mut resumes = self.resumes.write().await;
        match resumes.get_mut(&resume.id) {
            Some(slot) => {
                *slot = resume.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.resumes.write().await.remove(&id).is_some())
    }

    async fn list(&self, filter: &ResumeFilter) -> Result<Vec<Resume>> {
        Ok(self
            .newest_first(LIST_LIMIT, |r| match &filter.user_id {
                Some(user_id) => r.draft.user_id.as_ref() == Some(user_id),
                None => true,
            })
            .await)
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Resume>> {
        Ok(self.newest_first(SEARCH_LIMIT, |r| query.matches(r)).await)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL store
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, FromRow)]
struct ResumeRow {
    id: Uuid,
    draft: Json<ResumeDraft>,
    keywords: Vec<String>,
    ats_score: Option<Json<AtsScore>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ResumeRow> for Resume {
    fn from(row: ResumeRow) -> Self {
        Resume {
            id: row.id,
            draft: row.draft.0,
            keywords: row.keywords,
            ats_score: row.ats_score.map(|s| s.0),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_COLUMNS: &str = "SELECT id, draft, keywords, ats_score, created_at, updated_at FROM resumes";

/// Escapes LIKE metacharacters so user input matches literally.
fn like_pattern(q: &str) -> String {
    let escaped = q
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn score_column(resume: &Resume) -> i32 {
    i32::try_from(resume.total_score()).unwrap_or(i32::MAX)
}

pub struct PgResumeRepository {
    pool: PgPool,
}

impl PgResumeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeRepository for PgResumeRepository {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn insert(&self, resume: &Resume) -> Result<()> {
        let info = &resume.content().personal_info;
        sqlx::query(
            r#"
            INSERT INTO resumes
                (id, user_id, template, full_name, email, draft,
                 keywords, ats_score, total_score, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(resume.id)
        .bind(resume.draft.user_id.as_deref())
        .bind(resume.draft.template.as_str())
        .bind(&info.full_name)
        .bind(&info.email)
        .bind(Json(&resume.draft))
        .bind(&resume.keywords)
        .bind(resume.ats_score.as_ref().map(Json))
        .bind(score_column(resume))
        .bind(resume.created_at)
        .bind(resume.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Resume>> {
        let row = sqlx::query_as::<_, ResumeRow>(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Resume::from))
    }

    async fn update(&self, resume: &Resume) -> Result<bool> {
        let info = &resume.content().personal_info;
        let result = sqlx::query(
            r#"
            UPDATE resumes
            SET user_id = $2, template = $3, full_name = $4, email = $5, draft = $6,
                keywords = $7, ats_score = $8, total_score = $9, updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(resume.id)
        .bind(resume.draft.user_id.as_deref())
        .bind(resume.draft.template.as_str())
        .bind(&info.full_name)
        .bind(&info.email)
        .bind(Json(&resume.draft))
        .bind(&resume.keywords)
        .bind(resume.ats_score.as_ref().map(Json))
        .bind(score_column(resume))
        .bind(resume.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, filter: &ResumeFilter) -> Result<Vec<Resume>> {
        let rows = sqlx::query_as::<_, ResumeRow>(&format!(
            "{SELECT_COLUMNS} WHERE ($1::text IS NULL OR user_id = $1) ORDER BY updated_at DESC LIMIT $2"
        ))
        .bind(filter.user_id.as_deref())
        .bind(LIST_LIMIT as i64)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Resume::from).collect())
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Resume>> {
        let pattern = query
            .q
            .as_deref()
            .filter(|q| !q.is_empty())
            .map(like_pattern);
        let min_score = query
            .min_score
            .map(|s| i32::try_from(s).unwrap_or(i32::MAX));

        let rows = sqlx::query_as::<_, ResumeRow>(&format!(
            r#"
            {SELECT_COLUMNS}
            WHERE ($1::text IS NULL OR user_id = $1)
              AND ($2::text IS NULL OR template = $2)
              AND ($3::int IS NULL OR total_score >= $3)
              AND ($4::text IS NULL
                   OR full_name ILIKE $4
                   OR email ILIKE $4
                   OR EXISTS (SELECT 1 FROM unnest(keywords) AS k WHERE k ILIKE $4))
            ORDER BY updated_at DESC
            LIMIT $5
            "#
        ))
        .bind(query.user_id.as_deref())
        .bind(query.template.map(|t| t.as_str()))
        .bind(min_score)
        .bind(pattern)
        .bind(SEARCH_LIMIT as i64)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Resume::from).collect())
    }
}
