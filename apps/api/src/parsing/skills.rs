use std::collections::BTreeSet;

use crate::parsing::taxonomy::Taxonomy;

/// Case-insensitive substring match of every taxonomy skill against the text.
pub fn extract_skills(text: &str, taxonomy: &Taxonomy) -> BTreeSet<String> {
    let text_lower = text.to_lowercase();
    taxonomy
        .skill_keywords()
        .map(str::to_lowercase)
        .filter(|skill| !skill.is_empty() && text_lower.contains(skill.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_matches_across_categories() {
        let text = "Led Recruitment and PAYROLL; built dashboards in Python. Strong Leadership.";
        let skills = extract_skills(text, &Taxonomy::default());
        for expected in ["recruitment", "payroll", "python", "leadership"] {
            assert!(skills.contains(expected), "missing {expected}");
        }
    }

    #[test]
    fn test_duplicate_keywords_collapse() {
        let mut taxonomy = Taxonomy::default();
        taxonomy.skills = BTreeMap::from([
            ("a".to_string(), vec!["payroll".to_string()]),
            ("b".to_string(), vec!["Payroll".to_string(), "payroll".to_string()]),
        ]);
        let skills = extract_skills("payroll payroll payroll", &taxonomy);
        assert_eq!(skills.len(), 1);
    }

    #[test]
    fn test_no_skills() {
        let skills = extract_skills("Lorem ipsum dolor sit amet", &Taxonomy::default());
        assert!(skills.is_empty());
    }
}
