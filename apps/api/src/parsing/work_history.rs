//! Work history lines plus the auxiliary organization / date-range signals.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::parsing::taxonomy::Taxonomy;
use crate::parsing::{contains_any, MAX_LINE_ENTRIES};

const MIN_TITLE_LINE_CHARS: usize = 10;
const MAX_TITLE_LINE_CHARS: usize = 100;
const MAX_SIGNALS: usize = 10;

static ORGANIZATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:[A-Z][\w&'.-]*[ \t]+){1,4}(?:LLC|L\.L\.C|Ltd|Limited|Inc|Group|Company|Corporation|Bank|Authority|Holdings?)\b",
    )
    .expect("organization pattern compiles")
});

static DATE_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?[ \t]+)?((?:19|20)\d{2})[ \t]*(?:-|–|—|to)[ \t]*(?:(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?[ \t]+)?((?:19|20)\d{2}|present|current|now)\b",
    )
    .expect("date range pattern compiles")
});

/// A `start – end` span found in the text. `end_year` is `None` for ongoing roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSpan {
    pub text: String,
    pub start_year: u16,
    pub end_year: Option<u16>,
}

/// Organization-like and date-like spans. Informational only: never feeds the
/// profile or the match score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSignals {
    pub organizations: Vec<String>,
    pub date_ranges: Vec<DateSpan>,
}

/// Lines of plausible length that name a job title, in document order.
pub fn extract_work_history(text: &str, taxonomy: &Taxonomy) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| {
            let len = line.chars().count();
            len > MIN_TITLE_LINE_CHARS && len < MAX_TITLE_LINE_CHARS
        })
        .filter(|line| contains_any(&line.to_lowercase(), &taxonomy.job_titles))
        .take(MAX_LINE_ENTRIES)
        .map(String::from)
        .collect()
}

pub fn extract_work_signals(text: &str) -> WorkSignals {
    let mut organizations: Vec<String> = Vec::new();
    for m in ORGANIZATION_RE.find_iter(text) {
        let name = m.as_str().split_whitespace().collect::<Vec<_>>().join(" ");
        if !organizations.contains(&name) {
            organizations.push(name);
        }
        if organizations.len() == MAX_SIGNALS {
            break;
        }
    }

    let date_ranges = DATE_RANGE_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let start_year = caps.get(1)?.as_str().parse().ok()?;
            let end_year = caps.get(2).and_then(|m| m.as_str().parse().ok());
            Some(DateSpan {
                text: caps.get(0)?.as_str().trim().to_string(),
                start_year,
                end_year,
            })
        })
        .take(MAX_SIGNALS)
        .collect();

    WorkSignals {
        organizations,
        date_ranges,
    }
}
