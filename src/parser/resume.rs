//! Structured candidate record produced for each uploaded resume

use crate::processing::education::Education;
use crate::processing::employment::Employment;
use crate::processing::location::Location;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    Name,
    Email,
    Phone,
    Experience,
    Skills,
    Education,
    Designation,
    CompaniesWorked,
    Certifications,
    Location,
    Languages,
    EmployerName,
}

impl Field {
    pub const ALL: [Field; 12] = [
        Field::Name,
        Field::Email,
        Field::Phone,
        Field::Experience,
        Field::Skills,
        Field::Education,
        Field::Designation,
        Field::CompaniesWorked,
        Field::Certifications,
        Field::Location,
        Field::Languages,
        Field::EmployerName,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::Experience => "Experience",
            Field::Skills => "Skills",
            Field::Education => "Education",
            Field::Designation => "Designation",
            Field::CompaniesWorked => "Companies Worked",
            Field::Certifications => "Certifications",
            Field::Location => "Location",
            Field::Languages => "Languages",
            Field::EmployerName => "Employer Name",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where an assembled field value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldOrigin {
    Baseline,
    Heuristic,
    Default,
}

impl fmt::Display for FieldOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FieldOrigin::Baseline => "baseline",
            FieldOrigin::Heuristic => "heuristic",
            FieldOrigin::Default => "default",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Email")]
    pub email: Option<String>,
    #[serde(rename = "Phone")]
    pub phone: Option<String>,
    /// Years, fractional when months were counted
    #[serde(rename = "Experience")]
    pub experience_years: f64,
    #[serde(rename = "Skills")]
    pub skills: BTreeSet<String>,
    #[serde(rename = "Education")]
    pub education: Education,
    #[serde(rename = "Designation")]
    pub designation: Option<String>,
    #[serde(rename = "Companies Worked")]
    pub companies_worked: Vec<Employment>,
    #[serde(rename = "Certifications")]
    pub certifications: Vec<String>,
    #[serde(rename = "Location")]
    pub location: Location,
    #[serde(rename = "Languages")]
    pub languages: Vec<String>,
    #[serde(rename = "Employer Name")]
    pub employer_name: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub provenance: BTreeMap<Field, FieldOrigin>,
}

impl ParsedResume {
    pub fn origin(&self, field: Field) -> FieldOrigin {
        self.provenance.get(&field).copied().unwrap_or(FieldOrigin::Default)
    }

    /// Name to show for the candidate, trying the labelled name when nothing else is known
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.employer_name.as_deref())
            .unwrap_or("Unnamed")
    }
}
