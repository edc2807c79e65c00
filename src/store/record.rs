//! Flat, persisted form of a parsed resume

use crate::config::EducationJoin;
use crate::parser::ParsedResume;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

pub const LIST_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub id: u64,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Whole years
    pub experience: u32,
    pub skills: String,
    pub education: String,
    pub job_title: String,
    pub companies_worked: String,
    pub certifications: String,
    pub location: String,
    pub languages: String,
    /// Stored copy of the uploaded document
    pub file: PathBuf,
}

impl ResumeRecord {
    pub fn from_parsed(parsed: &ParsedResume, id: u64, file: PathBuf, education_join: EducationJoin) -> Self {
        let job_title = parsed
            .designation
            .clone()
            .filter(|title| !title.trim().is_empty())
            .or_else(|| parsed.companies_worked.first().map(|job| job.job_title.clone()))
            .unwrap_or_default();

        let education = match education_join {
            EducationJoin::Values => parsed.education.values().join(LIST_SEPARATOR),
            EducationJoin::Keys => parsed.education.keys().join(LIST_SEPARATOR),
        };

        Self {
            id,
            created_at: Utc::now(),
            name: parsed.name.clone().unwrap_or_default(),
            email: parsed.email.clone().unwrap_or_default(),
            phone: parsed.phone.clone().unwrap_or_default(),
            experience: parsed.experience_years.max(0.0).trunc() as u32,
            skills: join_list(&parsed.skills),
            education,
            job_title,
            companies_worked: join_list(parsed.companies_worked.iter().map(|job| &job.company)),
            certifications: join_list(&parsed.certifications),
            location: parsed.location.to_string(),
            languages: join_list(&parsed.languages),
            file,
        }
    }

    pub fn skill_set(&self) -> BTreeSet<String> {
        split_list(&self.skills).into_iter().collect()
    }

    pub fn file_name(&self) -> String {
        self.file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

pub fn join_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| item.as_ref().trim().to_string())
        .filter(|item| !item.is_empty())
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

/// Inverse of `join_list`: comma-separated, trimmed, empties dropped
pub fn split_list(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
