//! Certification names

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

// The name runs to the next newline or period.
static CERTIFICATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(Certified|Certification|Certifications)\s+([^\n.]*)[\n.]")
        .expect("Invalid certification regex")
});

pub fn extract_certifications(text: &str) -> Vec<String> {
    let certifications: Vec<String> = CERTIFICATION_REGEX
        .captures_iter(text)
        .map(|caps| caps[2].trim().to_string())
        .collect();

    debug!("Certification heuristic: {} match(es)", certifications.len());
    certifications
}
