//! Baseline parsers: the general-purpose first pass whose values take precedence
//! over the local heuristics

use crate::config::BaselineConfig;
use crate::error::{Result, ResumeParserError};
use crate::processing::contact::extract_contact_info;
use crate::processing::education::{Education, UNKNOWN_DEGREE};
use crate::processing::employment::Employment;
use crate::processing::experience::extract_experience;
use crate::processing::location::{Location, UNKNOWN_PLACE};
use log::{debug, info};
use serde_json::{Map, Value};
use std::path::Path;
use std::process::Command;

/// Values reported by a baseline parser. `None` means the parser had nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaselineRecord {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    pub total_experience: Option<f64>,
    pub skills: Option<Vec<String>>,
    pub education: Option<Education>,
    pub designation: Option<String>,
    pub company_names: Option<Vec<Employment>>,
    pub certifications: Option<Vec<String>>,
    pub location: Option<Location>,
    pub languages: Option<Vec<String>>,
}

pub trait BaselineParser {
    fn name(&self) -> &str;

    /// `text` is the locally extracted document text, for parsers that want it.
    fn parse(&self, path: &Path, text: &str) -> Result<BaselineRecord>;
}

/// Pick the baseline described by the configuration
pub fn from_config(config: &BaselineConfig) -> Box<dyn BaselineParser> {
    if !config.enabled {
        return Box::new(NullBaseline);
    }

    match config.command.split_first() {
        Some((program, args)) => Box::new(CommandBaseline::new(program.clone(), args.to_vec())),
        None => Box::new(LocalBaseline),
    }
}

/// Reports nothing, leaving every field to the heuristics or defaults
pub struct NullBaseline;

impl BaselineParser for NullBaseline {
    fn name(&self) -> &str {
        "none"
    }

    fn parse(&self, _path: &Path, _text: &str) -> Result<BaselineRecord> {
        Ok(BaselineRecord::default())
    }
}

/// In-process baseline covering the identity fields: name, email, phone and
/// total experience.
pub struct LocalBaseline;

const NAME_HEADER_WORDS: [&str; 4] = ["resume", "curriculum vitae", "cv", "biodata"];

impl LocalBaseline {
    /// First short capitalised line near the top that looks like a person's name
    pub fn guess_name(text: &str) -> Option<String> {
        text.lines().take(5).map(str::trim).find_map(|line| {
            if line.is_empty()
                || line.starts_with('-')
                || line.contains('@')
                || line.contains(':')
                || line.chars().any(|c| c.is_ascii_digit())
                || NAME_HEADER_WORDS.contains(&line.to_lowercase().as_str())
            {
                return None;
            }

            let words: Vec<&str> = line.split_whitespace().collect();
            let looks_like_name = (2..=4).contains(&words.len())
                && words.iter().all(|w| w.chars().next().map_or(false, char::is_uppercase));
            looks_like_name.then(|| line.to_string())
        })
    }
}

impl BaselineParser for LocalBaseline {
    fn name(&self) -> &str {
        "local"
    }

    fn parse(&self, _path: &Path, text: &str) -> Result<BaselineRecord> {
        let contact = extract_contact_info(text);
        let experience = extract_experience(text);

        Ok(BaselineRecord {
            name: Self::guess_name(text),
            email: contact.email,
            mobile_number: contact.phone,
            total_experience: (experience > 0.0).then_some(experience),
            ..BaselineRecord::default()
        })
    }
}

/// Runs an external resume parser that prints one JSON object on stdout.
///
/// The resume path is passed as the final argument. Recognised keys are
/// `name`, `email`, `mobile_number`, `total_experience`, `skills`,
/// `education`, `designation`, `company_names`, `certifications`,
/// `location` and `languages`; anything else is ignored.
pub struct CommandBaseline {
    program: String,
    args: Vec<String>,
}

impl CommandBaseline {
    pub fn new(program: String, args: Vec<String>) -> Self {
        Self { program, args }
    }

    pub fn from_json(stdout: &str) -> Result<BaselineRecord> {
        let value: Value = serde_json::from_str(stdout)?;
        let object = value.as_object().ok_or_else(|| {
            ResumeParserError::Baseline("Baseline output is not a JSON object".to_string())
        })?;

        Ok(BaselineRecord {
            name: string_field(object, "name"),
            email: string_field(object, "email"),
            mobile_number: string_field(object, "mobile_number"),
            total_experience: number_field(object, "total_experience"),
            skills: list_field(object, "skills"),
            education: education_field(object, "education"),
            designation: list_field(object, "designation")
                .and_then(|titles| titles.into_iter().next())
                .or_else(|| string_field(object, "designation")),
            company_names: employment_field(object, "company_names"),
            certifications: list_field(object, "certifications"),
            location: location_field(object, "location"),
            languages: list_field(object, "languages"),
        })
    }
}

impl BaselineParser for CommandBaseline {
    fn name(&self) -> &str {
        &self.program
    }

    fn parse(&self, path: &Path, _text: &str) -> Result<BaselineRecord> {
        info!("Running baseline parser '{}' on {}", self.program, path.display());

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .output()
            .map_err(|e| ResumeParserError::Baseline(format!("Failed to start '{}': {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ResumeParserError::Baseline(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!("Baseline parser wrote {} bytes", stdout.len());
        Self::from_json(&stdout)
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn number_field(object: &Map<String, Value>, key: &str) -> Option<f64> {
    match object.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// A list of strings; a single string counts as a one-item list, any other shape as nothing
fn list_field(object: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    match object.get(key)? {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        Value::String(s) if !s.trim().is_empty() => Some(vec![s.trim().to_string()]),
        _ => None,
    }
}

fn education_field(object: &Map<String, Value>, key: &str) -> Option<Education> {
    match object.get(key)? {
        value @ Value::Object(_) => serde_json::from_value(value.clone()).ok(),
        _ => {
            let degrees = list_field(object, key)?;
            let highest_degree = degrees.into_iter().next().unwrap_or_else(|| UNKNOWN_DEGREE.to_string());
            Some(Education {
                highest_degree,
                ..Education::default()
            })
        }
    }
}

fn employment_field(object: &Map<String, Value>, key: &str) -> Option<Vec<Employment>> {
    let items = match object.get(key)? {
        Value::Array(items) => items,
        _ => return None,
    };

    Some(
        items
            .iter()
            .filter_map(|item| match item {
                Value::String(company) => Some(Employment {
                    company: company.trim().to_string(),
                    job_title: String::new(),
                }),
                Value::Object(_) => serde_json::from_value(item.clone()).ok(),
                _ => None,
            })
            .collect(),
    )
}

fn location_field(object: &Map<String, Value>, key: &str) -> Option<Location> {
    match object.get(key)? {
        value @ Value::Object(_) => serde_json::from_value(value.clone()).ok(),
        Value::String(s) => {
            let mut parts = s.split(',').map(str::trim).filter(|p| !p.is_empty());
            let city = parts.next()?.to_string();
            let country = parts.next().unwrap_or(UNKNOWN_PLACE).to_string();
            Some(Location { city, country })
        }
        _ => None,
    }
}
