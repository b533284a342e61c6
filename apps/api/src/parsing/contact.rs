use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}").expect("email pattern compiles")
});

// 7–11 digits, single space/dash separators, optional +country prefix.
// Never spans a line break.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+\d{1,3}[ \t-]?|\b)\d(?:[ \t-]?\d){6,10}\b").expect("phone pattern compiles")
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// First email-shaped and first phone-shaped substrings. No validation.
pub fn extract_contact(text: &str) -> ContactInfo {
    ContactInfo {
        email: EMAIL_RE.find(text).map(|m| m.as_str().to_string()),
        phone: PHONE_RE.find(text).map(|m| m.as_str().trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_email_and_phone() {
        let contact = extract_contact("Sara Ali\nsara.ali@example.ae | +971 50 123 4567\nDubai");
        assert_eq!(contact.email.as_deref(), Some("sara.ali@example.ae"));
        assert_eq!(contact.phone.as_deref(), Some("+971 50 123 4567"));
    }

    #[test]
    fn test_email_is_case_insensitive() {
        let contact = extract_contact("Contact: John.Doe@Company.COM");
        assert_eq!(contact.email.as_deref(), Some("John.Doe@Company.COM"));
    }

    #[test]
    fn test_first_match_wins() {
        let contact = extract_contact("a@first.com b@second.com 0501234567 0559876543");
        assert_eq!(contact.email.as_deref(), Some("a@first.com"));
        assert_eq!(contact.phone.as_deref(), Some("0501234567"));
    }

    #[test]
    fn test_dash_grouped_phone() {
        let contact = extract_contact("Phone: 050-123-4567");
        assert_eq!(contact.phone.as_deref(), Some("050-123-4567"));
    }

    #[test]
    fn test_phone_does_not_join_lines() {
        assert_eq!(extract_contact("Ref 2015\n2020 Dubai").phone, None);

        let contact = extract_contact("Ref 2015\n+971 50 123 4567");
        assert_eq!(contact.phone.as_deref(), Some("+971 50 123 4567"));
    }

    #[test]
    fn test_short_number_is_not_phone() {
        let contact = extract_contact("Room 12345, floor 3");
        assert_eq!(contact.phone, None);
    }

    #[test]
    fn test_overlong_digit_run_is_not_phone() {
        let contact = extract_contact("IBAN 123456789012345678");
        assert_eq!(contact.phone, None);
    }

    #[test]
    fn test_absent_fields() {
        let contact = extract_contact("No contact details here");
        assert_eq!(contact, ContactInfo::default());
    }
}
