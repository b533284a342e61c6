use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Upper bound for any experience figure on a profile.
pub const MAX_YEARS_EXPERIENCE: u32 = 30;

static EXPLICIT_YEARS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+)\s*\+?\s*(?:years?|yrs?)\s*(?:of\s+)?(?:experience|exp)")
        .expect("experience pattern compiles")
});

static YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("year pattern compiles"));

/// The number in the first "N+ years of experience" statement, uncapped.
/// Digit runs too long for `u32` saturate.
pub fn explicit_years(text: &str) -> Option<u32> {
    let caps = EXPLICIT_YEARS_RE.captures(text)?;
    let digits = caps.get(1)?.as_str();
    Some(digits.parse().unwrap_or(u32::MAX))
}

/// Explicit statements win. Otherwise the span between the earliest and latest
/// calendar years mentioned, when at least two distinct years appear.
pub fn estimate_years_experience(text: &str) -> Option<u32> {
    if let Some(years) = explicit_years(text) {
        return Some(years.min(MAX_YEARS_EXPERIENCE));
    }

    let years: BTreeSet<u32> = YEAR_RE
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();
    if years.len() < 2 {
        return None;
    }

    let (first, last) = (years.first()?, years.last()?);
    let span = (last - first).min(MAX_YEARS_EXPERIENCE);
    (span > 0).then_some(span)
}
