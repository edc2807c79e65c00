//! Companies worked at and the role held at each

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// Needs the connector words and a closing period; anything else is missed.
static EMPLOYMENT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(worked at|experience with|at)\s+(.*?)\s+(as|role|position)\s+(.*?)\.")
        .expect("Invalid employment regex")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employment {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Job Title")]
    pub job_title: String,
}

pub fn extract_companies_and_job_titles(text: &str) -> Vec<Employment> {
    let employments: Vec<Employment> = EMPLOYMENT_REGEX
        .captures_iter(text)
        .map(|caps| Employment {
            company: caps[2].to_string(),
            job_title: caps[4].to_string(),
        })
        .collect();
    debug!("Employment heuristic: {} match(es)", employments.len());
    employments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worked_at_phrases() {
        let text = "Worked at Acme Corp as Senior Engineer. Then experience with Globex role Team Lead.";
        let employments = extract_companies_and_job_titles(text);

        assert_eq!(
            employments,
            vec![
                Employment { company: "Acme Corp".to_string(), job_title: "Senior Engineer".to_string() },
                Employment { company: "Globex".to_string(), job_title: "Team Lead".to_string() },
            ]
        );
    }

    #[test]
    fn test_missing_period_is_not_matched() {
        let text = "worked at Initech as Analyst";
        assert!(extract_companies_and_job_titles(text).is_empty());
    }

    #[test]
    fn test_no_connectors() {
        assert!(extract_companies_and_job_titles("Python developer\nLondon").is_empty());
    }
}
