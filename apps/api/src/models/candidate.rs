use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::parsing::contact::ContactInfo;
use crate::parsing::CandidateProfile;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Vec<String>,
    pub education: Vec<String>,
    pub work_history: Vec<String>,
    pub summary: String,
    pub tags: Vec<String>,
    pub years_experience: Option<i32>,
    pub raw_text: String,
    pub document_name: Option<String>,
    pub document_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CandidateRow {
    /// Rebuilds the parsed profile stored in this row.
    pub fn profile(&self) -> CandidateProfile {
        CandidateProfile {
            raw_text: self.raw_text.clone(),
            contact: ContactInfo {
                email: self.email.clone(),
                phone: self.phone.clone(),
            },
            skills: self.skills.iter().cloned().collect(),
            education: self.education.clone(),
            work_history: self.work_history.clone(),
            summary: self.summary.clone(),
            tags: self.tags.iter().cloned().collect(),
            years_experience: self.years_experience.and_then(|y| u32::try_from(y).ok()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateMatchRow {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub job_description: String,
    pub score: i32,
    pub breakdown: Value,
    pub created_at: DateTime<Utc>,
}
