use crate::parsing::contains_any;
use crate::parsing::taxonomy::Taxonomy;

const SECTION_LINES: usize = 5;
const MIN_SECTION_CHARS: usize = 50;
const MAX_SECTION_CHARS: usize = 500;
const FALLBACK_WORDS: usize = 200;

/// Text following the first summary/profile/objective/about marker line, or
/// the opening words of the document when that section is missing or too short.
pub fn extract_summary(text: &str, taxonomy: &Taxonomy) -> String {
    let lines: Vec<&str> = text.lines().collect();

    let marker = lines
        .iter()
        .position(|line| contains_any(&line.to_lowercase(), &taxonomy.summary_markers));

    if let Some(index) = marker {
        let section = lines
            .iter()
            .skip(index + 1)
            .take(SECTION_LINES)
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        let section = section.trim();
        if section.chars().count() > MIN_SECTION_CHARS {
            return section.chars().take(MAX_SECTION_CHARS).collect();
        }
    }

    fallback_excerpt(text)
}

fn fallback_excerpt(text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().take(FALLBACK_WORDS).collect();
    if words.is_empty() {
        return String::new();
    }
    format!("{}...", words.join(" "))
}
