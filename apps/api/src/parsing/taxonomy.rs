//! Keyword tables driving every extractor and the match scorer.
//!
//! The built-in tables are the `Default` impl. A deployment can swap any of
//! them by pointing `CV_TAXONOMY_PATH` at a TOML file; sections left out of
//! the file keep their built-in values.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Tag emitted when the CV mentions a UAE location. Read by the scorer.
pub const UAE_EXPERIENCE_TAG: &str = "UAE Experience";
/// Tag emitted when the CV mentions a professional certification. Read by the scorer.
pub const CERTIFIED_PROFESSIONAL_TAG: &str = "Certified Professional";

/// Process-wide built-in taxonomy, used by `extract_profile` and `score_match`.
pub static DEFAULT_TAXONOMY: Lazy<Taxonomy> = Lazy::new(Taxonomy::default);

/// One row of the tag rule table: any keyword present fires the label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagRule {
    pub label: String,
    pub keywords: Vec<String>,
}

impl TagRule {
    fn new(label: &str, keywords: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            keywords: owned(keywords),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Taxonomy {
    /// Skill category → keywords. Categories only group; matching is flat.
    pub skills: BTreeMap<String, Vec<String>>,
    /// Degree and institution terms qualifying an education line.
    pub education_keywords: Vec<String>,
    /// Certification terms, also qualifying an education line.
    pub certification_keywords: Vec<String>,
    pub job_titles: Vec<String>,
    pub summary_markers: Vec<String>,
    /// Evaluated in order; every rule fires independently.
    pub tag_rules: Vec<TagRule>,
    /// Degree terms the scorer looks for in both the JD and education lines.
    pub degree_requirements: Vec<String>,
    /// JD terms that make the "UAE Experience" tag count towards location.
    pub uae_locations: Vec<String>,
}

impl Default for Taxonomy {
    fn default() -> Self {
        let skills = BTreeMap::from([
            (
                "hr".to_string(),
                owned(&[
                    "human resources",
                    "recruitment",
                    "talent acquisition",
                    "onboarding",
                    "employee relations",
                    "performance management",
                    "compensation",
                    "benefits administration",
                    "payroll",
                    "hris",
                    "succession planning",
                    "workforce planning",
                    "learning and development",
                    "labor law",
                    "emiratization",
                ]),
            ),
            (
                "finance".to_string(),
                owned(&[
                    "accounting",
                    "financial analysis",
                    "financial reporting",
                    "budgeting",
                    "forecasting",
                    "auditing",
                    "taxation",
                    "ifrs",
                    "gaap",
                    "accounts payable",
                    "accounts receivable",
                ]),
            ),
            (
                "it".to_string(),
                owned(&[
                    "javascript",
                    "typescript",
                    "python",
                    "java",
                    "sql",
                    "react",
                    "node.js",
                    "aws",
                    "azure",
                    "docker",
                    "kubernetes",
                    "linux",
                    "microsoft excel",
                ]),
            ),
            (
                "operations".to_string(),
                owned(&[
                    "project management",
                    "operations management",
                    "supply chain",
                    "logistics",
                    "procurement",
                    "quality assurance",
                    "six sigma",
                    "vendor management",
                    "inventory management",
                ]),
            ),
            (
                "general".to_string(),
                owned(&[
                    "leadership",
                    "communication",
                    "teamwork",
                    "problem solving",
                    "negotiation",
                    "time management",
                    "customer service",
                    "microsoft office",
                    "stakeholder management",
                ]),
            ),
        ]);

        Self {
            skills,
            education_keywords: owned(&[
                "bachelor",
                "master",
                "mba",
                "phd",
                "doctorate",
                "degree",
                "diploma",
                "university",
                "college",
                "institute",
                "b.sc",
                "m.sc",
                "bsc",
                "msc",
                "high school",
            ]),
            certification_keywords: owned(&[
                "certified",
                "certification",
                "certificate",
                "cipd",
                "shrm",
                "sphr",
                "cpa",
                "acca",
                "cma",
                "pmp",
                "cfa",
                "cisa",
            ]),
            job_titles: owned(&[
                "manager",
                "specialist",
                "coordinator",
                "analyst",
                "director",
                "officer",
                "executive",
                "consultant",
                "engineer",
                "developer",
                "accountant",
                "supervisor",
            ]),
            summary_markers: owned(&["summary", "profile", "objective", "about"]),
            tag_rules: vec![
                TagRule::new(
                    "HR Professional",
                    &["hr", "human resources", "recruitment", "talent"],
                ),
                TagRule::new(
                    "Finance Professional",
                    &["finance", "accounting", "accountant", "audit"],
                ),
                TagRule::new(
                    "IT Professional",
                    &["software", "developer", "programming", "information technology"],
                ),
                TagRule::new(
                    "Operations Professional",
                    &["operations", "logistics", "supply chain", "procurement"],
                ),
                TagRule::new(
                    "Management Experience",
                    &["manager", "director", "head of", "team lead"],
                ),
                TagRule::new("Higher Education", &["master", "mba", "phd", "doctorate"]),
                TagRule::new(
                    UAE_EXPERIENCE_TAG,
                    &["uae", "dubai", "abu dhabi", "sharjah", "united arab emirates"],
                ),
                TagRule::new(
                    "GCC Experience",
                    &["saudi", "riyadh", "qatar", "doha", "kuwait", "bahrain", "muscat"],
                ),
                TagRule::new(
                    CERTIFIED_PROFESSIONAL_TAG,
                    &["certified", "certification", "cipd", "shrm", "cpa", "acca", "pmp"],
                ),
                TagRule::new("Arabic Speaker", &["arabic"]),
            ],
            degree_requirements: owned(&["bachelor", "master", "mba", "degree"]),
            uae_locations: owned(&["uae", "dubai", "abu dhabi"]),
        }
    }
}

impl Taxonomy {
    /// Parses a TOML taxonomy. Omitted sections keep the built-in tables.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).context("Invalid taxonomy TOML")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read taxonomy file '{}'", path.display()))?;
        Self::from_toml_str(&source)
    }

    /// All skill keywords across categories.
    pub fn skill_keywords(&self) -> impl Iterator<Item = &str> {
        self.skills.values().flatten().map(String::as_str)
    }

    /// Total keyword count, for the startup log line.
    pub fn keyword_count(&self) -> usize {
        self.skills.values().map(Vec::len).sum::<usize>()
            + self.education_keywords.len()
            + self.certification_keywords.len()
            + self.job_titles.len()
            + self.tag_rules.iter().map(|r| r.keywords.len()).sum::<usize>()
    }
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}
