//! Axum route handlers for CV extraction, candidate intake and matching.

use anyhow::anyhow;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::candidates::store::{
    get_candidate, insert_candidate, insert_match, list_candidates, NewCandidate,
};
use crate::documents::{extract_text, DocumentKind};
use crate::errors::AppError;
use crate::extractors::{AppJson, AppPath, AppQuery};
use crate::matching::scorer::MatchReport;
use crate::models::candidate::CandidateRow;
use crate::parsing::work_history::{extract_work_signals, WorkSignals};
use crate::parsing::{extract_profile_with, CandidateProfile};
use crate::state::AppState;
use crate::storage::{archive_document, document_key};

const DEFAULT_LIST_LIMIT: i64 = 20;
const MAX_LIST_LIMIT: i64 = 100;
const DEFAULT_RANK_LIMIT: usize = 10;
/// How many of the most recent candidates a ranking considers.
const RANK_POOL_SIZE: i64 = 500;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub profile: CandidateProfile,
    pub work_signals: WorkSignals,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub profile: CandidateProfile,
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct JobDescriptionRequest {
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct RankRequest {
    pub job_description: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CandidateResponse {
    pub id: Uuid,
    pub profile: CandidateProfile,
    pub document_name: Option<String>,
    pub document_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<CandidateRow> for CandidateResponse {
    fn from(row: CandidateRow) -> Self {
        Self {
            id: row.id,
            profile: row.profile(),
            document_name: row.document_name,
            document_key: row.document_key,
            created_at: row.created_at,
        }
    }
}

/// List view without the raw text.
#[derive(Debug, Serialize)]
pub struct CandidateSummary {
    pub id: Uuid,
    pub email: Option<String>,
    pub tags: Vec<String>,
    pub years_experience: Option<i32>,
    pub document_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<CandidateRow> for CandidateSummary {
    fn from(row: CandidateRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            tags: row.tags,
            years_experience: row.years_experience,
            document_name: row.document_name,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub candidate: CandidateResponse,
    pub work_signals: WorkSignals,
    pub match_report: Option<MatchReport>,
}

#[derive(Debug, Serialize)]
pub struct RankedCandidate {
    pub candidate: CandidateSummary,
    pub match_report: MatchReport,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/cv/extract
///
/// Parses already-extracted CV text without storing anything.
pub async fn handle_extract(
    State(state): State<AppState>,
    AppJson(request): AppJson<ExtractRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let taxonomy = state.taxonomy.clone();
    let response = run_blocking(move || ExtractResponse {
        profile: extract_profile_with(&request.text, &taxonomy),
        work_signals: extract_work_signals(&request.text),
    })
    .await?;

    Ok(Json(response))
}

/// POST /api/v1/cv/score
///
/// Scores a caller-supplied profile. An empty job description scores 0.
pub async fn handle_score(
    State(state): State<AppState>,
    AppJson(request): AppJson<ScoreRequest>,
) -> Result<Json<MatchReport>, AppError> {
    Ok(Json(
        state.scorer.score(&request.profile, &request.job_description),
    ))
}

/// POST /api/v1/candidates
///
/// Multipart fields: `file` (PDF, DOCX or text CV) and optional `job_description`.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let mut multipart = multipart?;
    let mut upload: Option<(Option<String>, Option<String>, Bytes)> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(String::from);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().map(String::from);
                let content_type = field.content_type().map(String::from);
                let data = field.bytes().await?;
                upload = Some((file_name, content_type, data));
            }
            Some("job_description") => {
                job_description = Some(field.text().await?);
            }
            _ => {}
        }
    }

    let (file_name, content_type, data) =
        upload.ok_or_else(|| AppError::Validation("multipart field 'file' is required".to_string()))?;
    let kind = DocumentKind::detect(file_name.as_deref(), content_type.as_deref())?;
    info!(
        "Received {:?} CV '{}' ({} bytes)",
        kind,
        file_name.as_deref().unwrap_or("<unnamed>"),
        data.len()
    );

    let taxonomy = state.taxonomy.clone();
    let document = data.clone();
    let (profile, work_signals) = run_blocking(move || {
        let text = extract_text(&document, kind)?;
        let signals = extract_work_signals(&text);
        Ok::<_, AppError>((extract_profile_with(&text, &taxonomy), signals))
    })
    .await??;

    let candidate_id = Uuid::new_v4();
    let key = document_key(candidate_id, file_name.as_deref().unwrap_or_default());
    archive_document(
        &state.s3,
        &state.config.s3_bucket,
        &key,
        data,
        kind.content_type(),
    )
    .await?;

    let row = insert_candidate(
        &state.db,
        NewCandidate {
            id: candidate_id,
            profile: &profile,
            document_name: file_name.as_deref(),
            document_key: Some(&key),
        },
    )
    .await
    .map_err(|e| orphaned_document(e, &state.config.s3_bucket, &key))?;

    let match_report = match job_description.filter(|jd| !jd.trim().is_empty()) {
        Some(jd) => {
            let report = state.scorer.score(&profile, &jd);
            insert_match(&state.db, candidate_id, &jd, &report).await?;
            Some(report)
        }
        None => None,
    };

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            candidate: row.into(),
            work_signals,
            match_report,
        }),
    ))
}

/// GET /api/v1/candidates
pub async fn handle_list_candidates(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListQuery>,
) -> Result<Json<Vec<CandidateSummary>>, AppError> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(1, MAX_LIST_LIMIT);
    let rows = list_candidates(&state.db, limit).await?;
    Ok(Json(rows.into_iter().map(CandidateSummary::from).collect()))
}

/// GET /api/v1/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<CandidateResponse>, AppError> {
    let row = get_candidate(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))?;
    Ok(Json(row.into()))
}

/// POST /api/v1/candidates/:id/matches
pub async fn handle_match_candidate(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(request): AppJson<JobDescriptionRequest>,
) -> Result<Json<MatchReport>, AppError> {
    require_job_description(&request.job_description)?;

    let row = get_candidate(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))?;

    let report = state.scorer.score(&row.profile(), &request.job_description);
    insert_match(&state.db, id, &request.job_description, &report).await?;

    Ok(Json(report))
}

/// POST /api/v1/matches/rank
///
/// Scores the most recent candidates against one job description, best first.
pub async fn handle_rank(
    State(state): State<AppState>,
    AppJson(request): AppJson<RankRequest>,
) -> Result<Json<Vec<RankedCandidate>>, AppError> {
    require_job_description(&request.job_description)?;
    let limit = request
        .limit
        .unwrap_or(DEFAULT_RANK_LIMIT)
        .clamp(1, MAX_LIST_LIMIT as usize);

    let rows = list_candidates(&state.db, RANK_POOL_SIZE).await?;
    let considered = rows.len();
    let scored: Vec<(MatchReport, CandidateRow)> = rows
        .into_iter()
        .map(|row| (state.scorer.score(&row.profile(), &request.job_description), row))
        .collect();
    let ranked = rank_by_score(scored, limit);

    info!("Ranked {considered} candidates, returning top {}", ranked.len());
    Ok(Json(ranked))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn require_job_description(job_description: &str) -> Result<(), AppError> {
    if job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// The document is already archived when the insert fails; name it in the error log.
fn orphaned_document(err: anyhow::Error, bucket: &str, key: &str) -> AppError {
    AppError::Internal(err.context(format!(
        "Candidate insert failed, orphaned document s3://{bucket}/{key}"
    )))
}

/// Highest score first; ties keep the newer candidate first.
fn rank_by_score(mut scored: Vec<(MatchReport, CandidateRow)>, limit: usize) -> Vec<RankedCandidate> {
    scored.sort_by(|(a, _), (b, _)| b.score.cmp(&a.score));
    scored
        .into_iter()
        .take(limit)
        .map(|(match_report, row)| RankedCandidate {
            candidate: row.into(),
            match_report,
        })
        .collect()
}

/// Runs CPU-bound parsing off the async workers.
async fn run_blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(anyhow!("Parsing task failed: {e}")))
}
