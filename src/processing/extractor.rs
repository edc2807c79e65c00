//! Heuristics bound to the active configuration

use crate::config::Config;
use crate::error::Result;
use crate::processing::certifications::extract_certifications;
use crate::processing::contact::{extract_contact_info, ContactInfo};
use crate::processing::education::{extract_education, Education};
use crate::processing::employer::{extract_employer_name_within, DEFAULT_WINDOW};
use crate::processing::employment::{extract_companies_and_job_titles, Employment};
use crate::processing::experience::extract_experience;
use crate::processing::location::{self, Gazetteer, Location};
use crate::processing::skills::SkillMatcher;
use std::borrow::Cow;
use std::collections::BTreeSet;

/// Runs every field heuristic with configured vocabulary and limits
pub struct FieldExtractor {
    skill_matcher: SkillMatcher,
    employer_name_window: usize,
    gazetteer: Cow<'static, Gazetteer>,
}

impl FieldExtractor {
    /// Built-in vocabularies, default window and the process-wide gazetteer
    pub fn new() -> Result<Self> {
        Ok(Self {
            skill_matcher: SkillMatcher::new()?,
            employer_name_window: DEFAULT_WINDOW,
            gazetteer: Cow::Borrowed(location::global()),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let skill_matcher = SkillMatcher::with_custom_skills(
            config.extraction.extra_technical_skills.clone(),
            config.extraction.extra_interpersonal_skills.clone(),
        )?;

        // The shared table may already be installed without the configured places
        let places = &config.location;
        let gazetteer = if places.extra_cities.is_empty() && places.extra_countries.is_empty() {
            Cow::Borrowed(location::global())
        } else {
            Cow::Owned(Gazetteer::with_extras(&places.extra_cities, &places.extra_countries))
        };

        Ok(Self {
            skill_matcher,
            employer_name_window: config.extraction.employer_name_window,
            gazetteer,
        })
    }

    pub fn contact_info(&self, text: &str) -> ContactInfo {
        extract_contact_info(text)
    }

    pub fn experience(&self, text: &str) -> f64 {
        extract_experience(text)
    }

    pub fn education(&self, text: &str) -> Education {
        extract_education(text)
    }

    pub fn skills(&self, text: &str) -> BTreeSet<String> {
        self.skill_matcher.extract(text)
    }

    pub fn companies_and_job_titles(&self, text: &str) -> Vec<Employment> {
        extract_companies_and_job_titles(text)
    }

    pub fn certifications(&self, text: &str) -> Vec<String> {
        extract_certifications(text)
    }

    pub fn location(&self, text: &str) -> Location {
        self.gazetteer.locate(text)
    }

    pub fn employer_name(&self, text: &str) -> Option<String> {
        extract_employer_name_within(text, self.employer_name_window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_window_and_vocabulary() {
        let mut config = Config::default();
        config.extraction.employer_name_window = 1;
        config.extraction.extra_interpersonal_skills = vec!["Mentoring".to_string()];
        let extractor = FieldExtractor::from_config(&config).unwrap();

        let text = "Curriculum Vitae\nName: Ada\nMentoring and Python";
        assert_eq!(extractor.employer_name(text), None);
        assert!(extractor.skills(text).contains("Mentoring"));
        assert!(extractor.skills(text).contains("Python"));
    }

    #[test]
    fn test_configured_places_without_global_init() {
        // Force the shared table into place first
        location::global();

        let mut config = Config::default();
        config.location.extra_cities = vec!["Gotham".to_string()];
        config.location.extra_countries = vec!["Wakanda".to_string()];
        let extractor = FieldExtractor::from_config(&config).unwrap();

        assert_eq!(extractor.location("Based in Gotham, Wakanda").to_string(), "Gotham, Wakanda");
        assert_eq!(extractor.location("Based in Berlin, Germany").to_string(), "Berlin, Germany");
        assert!(FieldExtractor::new().unwrap().location("Based in Gotham").is_unknown());
    }

    #[test]
    fn test_defaults_match_free_functions() {
        let extractor = FieldExtractor::new().unwrap();
        let text = "Name: Ada\nada@example.com\n3 years\nMaster of Science\nBased in Berlin, Germany";

        assert_eq!(extractor.employer_name(text), Some("Ada".to_string()));
        assert_eq!(extractor.contact_info(text).email.as_deref(), Some("ada@example.com"));
        assert_eq!(extractor.experience(text), 3.0);
        assert_eq!(extractor.education(text).highest_degree, "Master");
        assert_eq!(extractor.location(text).to_string(), "Berlin, Germany");
    }
}
