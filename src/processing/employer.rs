//! Candidate name taken from a `Name:` label near the top of the document

use once_cell::sync::Lazy;
use regex::Regex;

pub const DEFAULT_WINDOW: usize = 50;

static NAME_LABEL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(Name)\s*[:\-]?\s*(\w+)").expect("Invalid name label regex")
});

pub fn extract_employer_name(text: &str) -> Option<String> {
    extract_employer_name_within(text, DEFAULT_WINDOW)
}

/// Search only the first `window` lines for `Name`, an optional `:`/`-`, and one word.
pub fn extract_employer_name_within(text: &str, window: usize) -> Option<String> {
    let head = text.lines().take(window).collect::<Vec<_>>().join("\n");
    NAME_LABEL_REGEX.captures(&head).map(|caps| caps[2].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_label() {
        assert_eq!(extract_employer_name("Name: Priya Sharma\nEmail: p@x.com"), Some("Priya".to_string()));
        assert_eq!(extract_employer_name("NAME - Carlos"), Some("Carlos".to_string()));
    }

    #[test]
    fn test_label_outside_window_is_ignored() {
        let mut text = "filler line\n".repeat(DEFAULT_WINDOW);
        text.push_str("Name: Late");
        assert_eq!(extract_employer_name(&text), None);
        assert_eq!(extract_employer_name_within(&text, DEFAULT_WINDOW + 1), Some("Late".to_string()));
    }

    #[test]
    fn test_no_label() {
        assert_eq!(extract_employer_name("Curriculum Vitae\nJane Doe"), None);
    }
}
