//! Match scoring: a pluggable scorer that rates a parsed profile against a job description.
//!
//! Default: `KeywordMatchScorer` (weighted keyword/tag checks, deterministic).
//! `AppState` holds an `Arc<dyn MatchScorer>` so the backend can change
//! without touching handlers.

use serde::{Deserialize, Serialize};

use crate::parsing::experience::explicit_years;
use crate::parsing::taxonomy::{
    Taxonomy, CERTIFIED_PROFESSIONAL_TAG, DEFAULT_TAXONOMY, UAE_EXPERIENCE_TAG,
};
use crate::parsing::CandidateProfile;

pub const MAX_SCORE: u32 = 100;

// ────────────────────────────────────────────────────────────────────────────
// Weights
// ────────────────────────────────────────────────────────────────────────────

/// Maximum points per category plus the experience partial-credit rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub skills: f64,
    pub education: f64,
    pub experience: f64,
    pub location: f64,
    pub certification: f64,
    /// Fraction of the required years that still earns `experience_partial`.
    pub experience_partial_ratio: f64,
    pub experience_partial: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skills: 40.0,
            education: 20.0,
            experience: 20.0,
            location: 10.0,
            certification: 10.0,
            experience_partial_ratio: 0.7,
            experience_partial: 10.0,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// Points earned per category, before rounding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchBreakdown {
    pub skills: f64,
    pub education: f64,
    pub experience: f64,
    pub location: f64,
    pub certification: f64,
    pub matched_skills: Vec<String>,
    pub required_years: Option<u32>,
}

impl MatchBreakdown {
    pub fn total(&self) -> f64 {
        self.skills + self.education + self.experience + self.location + self.certification
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub score: u32, // 0 – 100
    pub breakdown: MatchBreakdown,
    pub recommendation: String,
    pub scorer_backend: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap scoring backends. Carried in `AppState` as
/// `Arc<dyn MatchScorer>`.
pub trait MatchScorer: Send + Sync {
    fn score(&self, profile: &CandidateProfile, job_description: &str) -> MatchReport;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordMatchScorer
// ────────────────────────────────────────────────────────────────────────────

/// Algorithm:
/// 1. skills: share of the profile's skills found in the JD × skills weight
/// 2. education: full points when a degree term is in both JD and education lines
/// 3. experience: full / partial / none against the JD's "N years experience"
/// 4. location: full points for a UAE JD and the UAE tag
/// 5. certification: full points for the certified tag
///
/// score = round(Σ), clamped to 100. An empty JD scores 0.
#[derive(Debug, Clone, Default)]
pub struct KeywordMatchScorer {
    pub weights: ScoringWeights,
    pub taxonomy: Taxonomy,
}

impl KeywordMatchScorer {
    pub fn new(weights: ScoringWeights, taxonomy: Taxonomy) -> Self {
        Self { weights, taxonomy }
    }
}

impl MatchScorer for KeywordMatchScorer {
    fn score(&self, profile: &CandidateProfile, job_description: &str) -> MatchReport {
        compute_keyword_match(profile, job_description, &self.weights, &self.taxonomy)
    }
}

/// Score with default weights and the built-in taxonomy.
#[allow(dead_code)]
pub fn score_match(profile: &CandidateProfile, job_description: &str) -> u32 {
    compute_keyword_match(
        profile,
        job_description,
        &ScoringWeights::default(),
        &DEFAULT_TAXONOMY,
    )
    .score
}

// ────────────────────────────────────────────────────────────────────────────
// Core keyword match algorithm
// ────────────────────────────────────────────────────────────────────────────

fn compute_keyword_match(
    profile: &CandidateProfile,
    job_description: &str,
    weights: &ScoringWeights,
    taxonomy: &Taxonomy,
) -> MatchReport {
    if job_description.trim().is_empty() {
        return MatchReport {
            score: 0,
            breakdown: MatchBreakdown::default(),
            recommendation: "No job description provided. Nothing to score.".to_string(),
            scorer_backend: "keyword".to_string(),
        };
    }

    let jd_lower = job_description.to_lowercase();

    let matched_skills: Vec<String> = profile
        .skills
        .iter()
        .filter(|skill| jd_lower.contains(skill.to_lowercase().as_str()))
        .cloned()
        .collect();
    let total_skills = profile.skills.len().max(1) as f64;
    let skills = (matched_skills.len() as f64 / total_skills * weights.skills).min(weights.skills);

    let education_lower: Vec<String> = profile.education.iter().map(|l| l.to_lowercase()).collect();
    let education_match = taxonomy.degree_requirements.iter().any(|degree| {
        let degree = degree.to_lowercase();
        !degree.is_empty()
            && jd_lower.contains(degree.as_str())
            && education_lower.iter().any(|line| line.contains(degree.as_str()))
    });
    let education = if education_match { weights.education } else { 0.0 };

    let required_years = explicit_years(job_description);
    let experience = match (required_years, profile.years_experience) {
        (Some(required), Some(actual)) if actual >= required => weights.experience,
        (Some(required), Some(actual))
            if actual as f64 >= required as f64 * weights.experience_partial_ratio =>
        {
            weights.experience_partial
        }
        _ => 0.0,
    };

    let uae_job = taxonomy
        .uae_locations
        .iter()
        .any(|place| !place.is_empty() && jd_lower.contains(place.to_lowercase().as_str()));
    let location = if uae_job && profile.has_tag(UAE_EXPERIENCE_TAG) {
        weights.location
    } else {
        0.0
    };

    let certification = if profile.has_tag(CERTIFIED_PROFESSIONAL_TAG) {
        weights.certification
    } else {
        0.0
    };

    let breakdown = MatchBreakdown {
        skills,
        education,
        experience,
        location,
        certification,
        matched_skills,
        required_years,
    };

    let score = (breakdown.total().round().max(0.0) as u32).min(MAX_SCORE);
    let recommendation = build_recommendation(score, &breakdown);

    MatchReport {
        score,
        breakdown,
        recommendation,
        scorer_backend: "keyword".to_string(),
    }
}

/// Human-readable verdict naming the categories that earned nothing.
fn build_recommendation(score: u32, breakdown: &MatchBreakdown) -> String {
    let gaps: Vec<&str> = [
        ("skills", breakdown.skills),
        ("education", breakdown.education),
        ("experience", breakdown.experience),
        ("location", breakdown.location),
        ("certification", breakdown.certification),
    ]
    .iter()
    .filter(|(_, points)| *points <= 0.0)
    .map(|(name, _)| *name)
    .collect();

    if score >= 80 {
        "Strong match. Shortlist for interview.".to_string()
    } else if score >= 50 {
        format!("Moderate match ({score}/100). No credit for: {}.", gaps.join(", "))
    } else {
        format!("Weak match ({score}/100). No credit for: {}.", gaps.join(", "))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
