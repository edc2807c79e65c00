//! Skill detection against fixed technical and interpersonal vocabularies

use crate::error::{Result, ResumeParserError};
use aho_corasick::{AhoCorasick, MatchKind};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

pub const TECHNICAL_SKILLS: [&str; 12] = [
    "Python", "Java", "React", "JavaScript", "SQL", "C++",
    "HTML", "CSS", "AWS", "Docker", "Kubernetes", "Node.js",
];

pub const INTERPERSONAL_SKILLS: [&str; 6] = [
    "Communication", "Leadership", "Project Management",
    "Teamwork", "Sales", "Customer Service",
];

static SECTION_HEADER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(skills)\s*[:\-]?\s*").expect("Invalid skills header regex")
});

static SECTION_END_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\n\n|experience|education").expect("Invalid section end regex")
});

static DEFAULT_MATCHER: Lazy<SkillMatcher> = Lazy::new(|| {
    SkillMatcher::new().expect("Built-in skill vocabulary must compile")
});

/// Case-insensitive substring matcher over the skill vocabularies.
///
/// Overlapping matches are reported, so "JavaScript" yields both
/// `JavaScript` and `Java`.
pub struct SkillMatcher {
    matcher: AhoCorasick,
    vocabulary: Vec<String>,
}

impl SkillMatcher {
    pub fn new() -> Result<Self> {
        Self::with_custom_skills(Vec::new(), Vec::new())
    }

    pub fn with_custom_skills(extra_technical: Vec<String>, extra_interpersonal: Vec<String>) -> Result<Self> {
        let mut vocabulary: Vec<String> = TECHNICAL_SKILLS.iter().map(|s| s.to_string()).collect();
        vocabulary.extend(split_terms(extra_technical));
        vocabulary.extend(INTERPERSONAL_SKILLS.iter().map(|s| s.to_string()));
        vocabulary.extend(split_terms(extra_interpersonal));

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::Standard)
            .build(&vocabulary)
            .map_err(|e| ResumeParserError::InvalidInput(format!("Failed to build skill matcher: {}", e)))?;

        Ok(Self { matcher, vocabulary })
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Skills found in the `Skills` section when there is one, otherwise anywhere.
    pub fn extract(&self, text: &str) -> BTreeSet<String> {
        let scope = match skills_section(text) {
            Some(section) => {
                debug!("Searching skills section ({} chars)", section.len());
                section
            }
            None => text,
        };
        self.find_skills(scope)
    }

    pub fn find_skills(&self, text: &str) -> BTreeSet<String> {
        self.matcher
            .find_overlapping_iter(text)
            .map(|m| self.vocabulary[m.pattern().as_usize()].clone())
            .collect()
    }
}

/// Body of the first `Skills` section.
///
/// The section ends at the first blank line or `Experience`/`Education`
/// header after it. Without such a terminator there is no section.
pub fn skills_section(text: &str) -> Option<&str> {
    let header = SECTION_HEADER_REGEX.captures(text)?;
    let keyword_end = header.get(1)?.end();
    let body_start = header.get(0)?.end();

    if let Some(end) = SECTION_END_REGEX.find_at(text, body_start) {
        return Some(&text[body_start..end.start()]);
    }

    // A blank line swallowed by the header padding still closes the section,
    // leaving it with nothing but padding in it.
    SECTION_END_REGEX.find_at(text, keyword_end).map(|_| "")
}

pub fn extract_skills(text: &str) -> BTreeSet<String> {
    DEFAULT_MATCHER.extract(text)
}

/// Configured terms, with comma-separated entries broken into separate skills
fn split_terms(terms: Vec<String>) -> Vec<String> {
    terms
        .iter()
        .flat_map(|term| term.split(','))
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_skills_line_without_other_mentions() {
        assert_eq!(extract_skills("Skills: Python, Leadership"), set(&["Python", "Leadership"]));
    }

    #[test]
    fn test_section_limits_the_search() {
        let text = "Skills: python, sql\n\nExperience\nShipped Docker images for a React app";
        assert_eq!(extract_skills(text), set(&["Python", "SQL"]));
    }

    #[test]
    fn test_section_ends_at_education_header() {
        let text = "SKILLS - Kubernetes, teamwork Education: BSc with AWS labs";
        assert_eq!(extract_skills(text), set(&["Kubernetes", "Teamwork"]));
    }

    #[test]
    fn test_whole_text_without_section() {
        let text = "Led customer service for a node.js shop; strong communication.";
        assert_eq!(extract_skills(text), set(&["Customer Service", "Node.js", "Communication"]));
    }

    #[test]
    fn test_substring_semantics_are_kept() {
        assert_eq!(extract_skills("JavaScript"), set(&["JavaScript", "Java"]));
        assert_eq!(extract_skills("wholesales"), set(&["Sales"]));
    }

    #[test]
    fn test_blank_line_right_after_header_yields_empty_section() {
        assert_eq!(skills_section("Skills:\n\nPython\n"), Some(""));
        assert!(extract_skills("Skills:\n\nPython\n").is_empty());
    }

    #[test]
    fn test_custom_vocabulary() {
        let matcher = SkillMatcher::with_custom_skills(vec!["Rust".to_string(), "  ".to_string()], vec![]).unwrap();
        assert_eq!(matcher.vocabulary().len(), TECHNICAL_SKILLS.len() + INTERPERSONAL_SKILLS.len() + 1);
        assert_eq!(matcher.extract("Skills: rust and C++"), set(&["Rust", "C++"]));
    }

    #[test]
    fn test_comma_separated_custom_terms() {
        let matcher = SkillMatcher::with_custom_skills(vec!["Rust, Elixir".to_string()], vec![]).unwrap();
        assert_eq!(matcher.vocabulary().len(), TECHNICAL_SKILLS.len() + INTERPERSONAL_SKILLS.len() + 2);
        assert!(!matcher.vocabulary().iter().any(|term| term.contains(',')));
        assert_eq!(matcher.extract("Skills: Elixir, rust"), set(&["Elixir", "Rust"]));
    }

    #[test]
    fn test_no_skills() {
        assert!(extract_skills("Gardener and beekeeper").is_empty());
    }
}
