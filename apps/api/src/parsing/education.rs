use crate::parsing::taxonomy::Taxonomy;
use crate::parsing::{contains_any, MAX_LINE_ENTRIES};

/// Shorter lines are section headers or fragments.
const MIN_EDUCATION_LINE_CHARS: usize = 10;

/// Lines mentioning a degree, institution or certification term, in document order.
pub fn extract_education(text: &str, taxonomy: &Taxonomy) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| line.chars().count() > MIN_EDUCATION_LINE_CHARS)
        .filter(|line| {
            let lower = line.to_lowercase();
            contains_any(&lower, &taxonomy.education_keywords)
                || contains_any(&lower, &taxonomy.certification_keywords)
        })
        .take(MAX_LINE_ENTRIES)
        .map(String::from)
        .collect()
}
