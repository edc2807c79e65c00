//! Query-driven filtering of stored records

use crate::error::{Result, ResumeParserError};
use crate::store::record::{split_list, ResumeRecord};

/// Listing criteria. Every comparison is a case-insensitive substring match;
/// list criteria require all of their terms to match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    pub min_experience: Option<u32>,
    pub skills: Vec<String>,
    pub education: Option<String>,
    pub certifications: Vec<String>,
    pub location: Option<String>,
}

impl ListingFilter {
    /// Build from `key=value` pairs; unknown keys and empty values are ignored
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut filter = Self::default();

        for (key, value) in pairs {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            match key {
                "experience" => {
                    let years = value.parse::<u32>().map_err(|_| {
                        ResumeParserError::InvalidInput(format!("experience must be a whole number of years, got '{}'", value))
                    })?;
                    filter.min_experience = Some(years);
                }
                "skills" => filter.skills = lowercase_terms(value),
                "education" => filter.education = Some(value.to_lowercase()),
                "certifications" => filter.certifications = lowercase_terms(value),
                "location" => filter.location = Some(value.to_lowercase()),
                _ => {}
            }
        }

        Ok(filter)
    }

    /// Build from a raw query string such as `skills=python,sql&experience=3`
    pub fn from_query(query: &str) -> Result<Self> {
        let query = query.trim_start_matches('?');
        let pairs: Vec<(String, String)> = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode_component(key), decode_component(value))
            })
            .collect();

        Self::from_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, record: &ResumeRecord) -> bool {
        if let Some(min) = self.min_experience {
            if record.experience < min {
                return false;
            }
        }

        contains_all(&record.skills, &self.skills)
            && self
                .education
                .as_ref()
                .map_or(true, |term| record.education.to_lowercase().contains(term.as_str()))
            && contains_all(&record.certifications, &self.certifications)
            && self
                .location
                .as_ref()
                .map_or(true, |term| record.location.to_lowercase().contains(term.as_str()))
    }

    pub fn apply<'a>(&self, records: &'a [ResumeRecord]) -> Vec<&'a ResumeRecord> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}

fn lowercase_terms(value: &str) -> Vec<String> {
    split_list(value).into_iter().map(|term| term.to_lowercase()).collect()
}

fn contains_all(field: &str, terms: &[String]) -> bool {
    let field = field.to_lowercase();
    terms.iter().all(|term| field.contains(term.as_str()))
}

// `+` and `%XX` escapes; malformed escapes are kept as written.
fn decode_component(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'+' => decoded.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                let escaped = std::str::from_utf8(&bytes[i + 1..i + 3])
                    .ok()
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok());
                match escaped {
                    Some(byte) => {
                        decoded.push(byte);
                        i += 2;
                    }
                    None => decoded.push(b'%'),
                }
            }
            byte => decoded.push(byte),
        }
        i += 1;
    }

    String::from_utf8_lossy(&decoded).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::path::PathBuf;

    fn record(experience: u32, skills: &str, education: &str, certifications: &str, location: &str) -> ResumeRecord {
        ResumeRecord {
            id: 1,
            created_at: Utc::now(),
            name: "Test".to_string(),
            email: String::new(),
            phone: String::new(),
            experience,
            skills: skills.to_string(),
            education: education.to_string(),
            job_title: String::new(),
            companies_worked: String::new(),
            certifications: certifications.to_string(),
            location: location.to_string(),
            languages: String::new(),
            file: PathBuf::new(),
        }
    }

    #[test]
    fn test_all_skills_must_match() {
        let filter = ListingFilter::from_pairs([("skills", "python, SQL")]).unwrap();

        assert!(filter.matches(&record(0, "Python, SQL, Docker", "", "", "")));
        assert!(!filter.matches(&record(0, "Python, Docker", "", "", "")));
    }

    #[test]
    fn test_substring_matching() {
        let filter = ListingFilter::from_pairs([("skills", "java"), ("location", "york")]).unwrap();
        assert!(filter.matches(&record(0, "JavaScript", "", "", "New York, United States")));
    }

    #[test]
    fn test_minimum_experience() {
        let filter = ListingFilter::from_pairs([("experience", "3")]).unwrap();

        assert!(filter.matches(&record(3, "", "", "", "")));
        assert!(!filter.matches(&record(2, "", "", "", "")));
    }

    #[test]
    fn test_non_integer_experience_is_rejected() {
        let result = ListingFilter::from_pairs([("experience", "3.5")]);
        assert!(matches!(result, Err(ResumeParserError::InvalidInput(_))));
    }

    #[test]
    fn test_empty_values_are_ignored() {
        let filter = ListingFilter::from_pairs([("experience", ""), ("skills", " "), ("page", "2")]).unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_education_and_certifications() {
        let filter = ListingFilter::from_pairs([("education", "msc"), ("certifications", "aws,pmp")]).unwrap();

        assert!(filter.matches(&record(0, "", "MSc, course in Rust", "AWS Solutions Architect, PMP", "")));
        assert!(!filter.matches(&record(0, "", "MSc", "AWS Solutions Architect", "")));
    }

    #[test]
    fn test_from_query() {
        let filter = ListingFilter::from_query("?skills=Project+Management%2CSQL&experience=2&location=").unwrap();

        assert_eq!(filter.skills, vec!["project management".to_string(), "sql".to_string()]);
        assert_eq!(filter.min_experience, Some(2));
        assert_eq!(filter.location, None);
    }

    #[test]
    fn test_apply() {
        let records = vec![record(1, "Python", "", "", ""), record(5, "Python", "", "", "")];
        let filter = ListingFilter::from_query("experience=4").unwrap();
        assert_eq!(filter.apply(&records).len(), 1);
    }

    #[test]
    fn test_decode_component() {
        assert_eq!(decode_component("a%20b+c"), "a b c");
        assert_eq!(decode_component("100%"), "100%");
        assert_eq!(decode_component("%zz"), "%zz");
    }
}
