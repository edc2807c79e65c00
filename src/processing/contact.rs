//! Email and phone detection

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\S+@\S+").expect("Invalid email regex")
});

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").expect("Invalid phone regex")
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// First email-like token and first US-style phone number, unvalidated.
pub fn extract_contact_info(text: &str) -> ContactInfo {
    let email = EMAIL_REGEX.find(text).map(|m| m.as_str().to_string());
    let phone = PHONE_REGEX.find(text).map(|m| m.as_str().to_string());
    debug!("Contact heuristic: email={:?} phone={:?}", email, phone);

    ContactInfo { email, phone }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_email_and_phone() {
        let text = "Jane Doe\njane.doe@example.com | (555) 123-4567\nalt: jd@work.io 555.987.6543";
        let info = extract_contact_info(text);

        assert_eq!(info.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(info.phone.as_deref(), Some("(555) 123-4567"));
    }

    #[test]
    fn test_email_token_is_not_validated() {
        let info = extract_contact_info("reach me at <me@host>, thanks");
        assert_eq!(info.email.as_deref(), Some("<me@host>,"));
    }

    #[test]
    fn test_phone_separators_are_optional() {
        let info = extract_contact_info("Phone 5551234567");
        assert_eq!(info.phone.as_deref(), Some("5551234567"));
    }

    #[test]
    fn test_missing_contact_details() {
        assert_eq!(extract_contact_info("No contact here"), ContactInfo::default());
    }
}
