use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::matching::scorer::MatchReport;
use crate::models::candidate::{CandidateMatchRow, CandidateRow};
use crate::parsing::CandidateProfile;

/// Parameters for storing a freshly parsed candidate.
pub struct NewCandidate<'a> {
    pub id: Uuid,
    pub profile: &'a CandidateProfile,
    pub document_name: Option<&'a str>,
    pub document_key: Option<&'a str>,
}

/// Inserts a parsed candidate. Rows are never updated afterwards.
pub async fn insert_candidate(pool: &PgPool, candidate: NewCandidate<'_>) -> Result<CandidateRow> {
    let NewCandidate {
        id,
        profile,
        document_name,
        document_key,
    } = candidate;

    let skills: Vec<String> = profile.skills.iter().cloned().collect();
    let tags: Vec<String> = profile.tags.iter().cloned().collect();
    let years_experience = profile
        .years_experience
        .map(i32::try_from)
        .transpose()
        .context("years_experience out of range")?;

    let row: CandidateRow = sqlx::query_as(
        r#"
        INSERT INTO candidates
            (id, email, phone, skills, education, work_history, summary, tags,
             years_experience, raw_text, document_name, document_key)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&profile.contact.email)
    .bind(&profile.contact.phone)
    .bind(&skills)
    .bind(&profile.education)
    .bind(&profile.work_history)
    .bind(&profile.summary)
    .bind(&tags)
    .bind(years_experience)
    .bind(&profile.raw_text)
    .bind(document_name)
    .bind(document_key)
    .fetch_one(pool)
    .await?;

    info!("Stored candidate {id} ({} skills, {} tags)", skills.len(), tags.len());
    Ok(row)
}

pub async fn get_candidate(pool: &PgPool, id: Uuid) -> Result<Option<CandidateRow>> {
    let row = sqlx::query_as("SELECT * FROM candidates WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Most recent candidates first.
pub async fn list_candidates(pool: &PgPool, limit: i64) -> Result<Vec<CandidateRow>> {
    let rows = sqlx::query_as("SELECT * FROM candidates ORDER BY created_at DESC LIMIT $1")
        .bind(limit)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Records a match result for a stored candidate.
pub async fn insert_match(
    pool: &PgPool,
    candidate_id: Uuid,
    job_description: &str,
    report: &MatchReport,
) -> Result<CandidateMatchRow> {
    let breakdown = serde_json::to_value(&report.breakdown)?;
    let score = i32::try_from(report.score).context("score out of range")?;

    let row: CandidateMatchRow = sqlx::query_as(
        r#"
        INSERT INTO candidate_matches (id, candidate_id, job_description, score, breakdown)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(candidate_id)
    .bind(job_description)
    .bind(score)
    .bind(&breakdown)
    .fetch_one(pool)
    .await?;

    info!("Recorded match {} for candidate {candidate_id}: {score}/100", row.id);
    Ok(row)
}
