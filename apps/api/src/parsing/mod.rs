// CV parsing core: keyword/pattern extractors over already-extracted text.
// Every extractor is a pure function of (text, taxonomy); none can fail.

pub mod contact;
pub mod education;
pub mod experience;
pub mod skills;
pub mod summary;
pub mod tags;
pub mod taxonomy;
pub mod work_history;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::parsing::contact::{extract_contact, ContactInfo};
use crate::parsing::education::extract_education;
use crate::parsing::experience::estimate_years_experience;
use crate::parsing::skills::extract_skills;
use crate::parsing::summary::extract_summary;
use crate::parsing::tags::extract_tags;
use crate::parsing::taxonomy::{Taxonomy, DEFAULT_TAXONOMY};
use crate::parsing::work_history::extract_work_history;

/// Cap on `education` and `work_history` entries.
pub const MAX_LINE_ENTRIES: usize = 5;

/// Structured attributes derived from one CV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub raw_text: String,
    pub contact: ContactInfo,
    pub skills: BTreeSet<String>,
    pub education: Vec<String>,
    pub work_history: Vec<String>,
    pub summary: String,
    pub tags: BTreeSet<String>,
    pub years_experience: Option<u32>,
}

impl CandidateProfile {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

/// Parses a CV with the built-in taxonomy.
#[allow(dead_code)]
pub fn extract_profile(text: &str) -> CandidateProfile {
    extract_profile_with(text, &DEFAULT_TAXONOMY)
}

pub fn extract_profile_with(text: &str, taxonomy: &Taxonomy) -> CandidateProfile {
    let profile = CandidateProfile {
        raw_text: text.to_string(),
        contact: extract_contact(text),
        skills: extract_skills(text, taxonomy),
        education: extract_education(text, taxonomy),
        work_history: extract_work_history(text, taxonomy),
        summary: extract_summary(text, taxonomy),
        tags: extract_tags(text, taxonomy),
        years_experience: estimate_years_experience(text),
    };

    debug!(
        skills = profile.skills.len(),
        education = profile.education.len(),
        work_history = profile.work_history.len(),
        tags = profile.tags.len(),
        years_experience = ?profile.years_experience,
        "Extracted candidate profile"
    );

    profile
}

/// `haystack` must already be lower-cased.
pub(crate) fn contains_any(haystack: &str, keywords: &[String]) -> bool {
    keywords
        .iter()
        .any(|k| !k.is_empty() && haystack.contains(k.to_lowercase().as_str()))
}
