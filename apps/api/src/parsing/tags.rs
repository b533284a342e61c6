use std::collections::BTreeSet;

use crate::parsing::contains_any;
use crate::parsing::taxonomy::Taxonomy;

/// Labels of every tag rule with at least one keyword present in the text.
pub fn extract_tags(text: &str, taxonomy: &Taxonomy) -> BTreeSet<String> {
    let text_lower = text.to_lowercase();
    taxonomy
        .tag_rules
        .iter()
        .filter(|rule| contains_any(&text_lower, &rule.keywords))
        .map(|rule| rule.label.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::taxonomy::{TagRule, CERTIFIED_PROFESSIONAL_TAG, UAE_EXPERIENCE_TAG};

    #[test]
    fn test_independent_rules_fire_together() {
        let tags = extract_tags(
            "MBA graduate working in Talent Acquisition in Abu Dhabi",
            &Taxonomy::default(),
        );
        assert!(tags.contains("HR Professional"));
        assert!(tags.contains("Higher Education"));
        assert!(tags.contains(UAE_EXPERIENCE_TAG));
        assert!(!tags.contains(CERTIFIED_PROFESSIONAL_TAG));
    }

    #[test]
    fn test_duplicate_labels_collapse() {
        let mut taxonomy = Taxonomy::default();
        taxonomy.tag_rules = vec![
            TagRule {
                label: "Finance".to_string(),
                keywords: vec!["ifrs".to_string()],
            },
            TagRule {
                label: "Finance".to_string(),
                keywords: vec!["audit".to_string()],
            },
        ];
        let tags = extract_tags("IFRS audit", &taxonomy);
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn test_no_tags() {
        assert!(extract_tags("Lorem ipsum dolor sit amet", &Taxonomy::default()).is_empty());
    }
}
