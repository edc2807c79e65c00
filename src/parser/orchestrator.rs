//! Turns a resume file into a `ParsedResume`

use crate::config::Config;
use crate::error::Result;
use crate::input::InputManager;
use crate::parser::baseline::{self, BaselineParser, BaselineRecord};
use crate::parser::precedence::PrecedenceTable;
use crate::parser::resume::{Field, FieldOrigin, ParsedResume};
use crate::processing::FieldExtractor;
use log::{debug, info, warn};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

pub struct ResumeParser {
    input: InputManager,
    baseline: Box<dyn BaselineParser>,
    extractor: FieldExtractor,
    precedence: PrecedenceTable,
}

impl ResumeParser {
    pub fn new(baseline: Box<dyn BaselineParser>, extractor: FieldExtractor) -> Self {
        Self {
            input: InputManager::new().with_cache(false),
            baseline,
            extractor,
            precedence: PrecedenceTable::default(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            baseline::from_config(&config.baseline),
            FieldExtractor::from_config(config)?,
        ))
    }

    pub fn with_precedence(mut self, precedence: PrecedenceTable) -> Self {
        self.precedence = precedence;
        self
    }

    pub fn baseline_name(&self) -> &str {
        self.baseline.name()
    }

    /// Parse one resume.
    ///
    /// Fails only while reading the file: missing path, unsupported
    /// extension or unreadable content. Every field after that degrades to
    /// its default.
    pub fn parse_resume(&mut self, path: &Path) -> Result<ParsedResume> {
        info!("Parsing resume: {}", path.display());

        let text = self.input.extract_text(path)?;
        debug!("Extracted {} characters", text.len());

        let record = match self.baseline.parse(path, &text) {
            Ok(record) => record,
            Err(e) => {
                warn!(
                    "Baseline parser '{}' failed on {}: {}; continuing with heuristics only",
                    self.baseline.name(),
                    path.display(),
                    e
                );
                BaselineRecord::default()
            }
        };

        let parsed = self.assemble(record, &text);
        info!(
            "Parsed {} ({} skills, {:.1} years)",
            parsed.display_name(),
            parsed.skills.len(),
            parsed.experience_years
        );
        Ok(parsed)
    }

    /// Combine a baseline record with the local heuristics, field by field
    pub fn assemble(&self, record: BaselineRecord, text: &str) -> ParsedResume {
        let table = &self.precedence;
        let extractor = &self.extractor;
        let mut provenance = BTreeMap::new();
        let mut track = |field: Field, origin: FieldOrigin| {
            debug!("{} <- {}", field, origin);
            provenance.insert(field, origin);
        };

        let (name, origin) = table.resolve(Field::Name, record.name.map(Some), || None);
        track(Field::Name, origin);

        let (email, origin) = table.resolve(Field::Email, record.email.map(Some), || {
            extractor.contact_info(text).email
        });
        track(Field::Email, origin);

        let (phone, origin) = table.resolve(Field::Phone, record.mobile_number.map(Some), || {
            extractor.contact_info(text).phone
        });
        track(Field::Phone, origin);

        let (experience_years, origin) = table.resolve(Field::Experience, record.total_experience, || {
            extractor.experience(text)
        });
        track(Field::Experience, origin);

        // Skills are stored comma-joined, so a comma inside one entry makes it several skills
        let baseline_skills = record.skills.map(|skills| {
            skills
                .iter()
                .flat_map(|skill| skill.split(','))
                .map(str::trim)
                .filter(|skill| !skill.is_empty())
                .map(str::to_string)
                .collect::<BTreeSet<String>>()
        });
        let (skills, origin) = table.resolve(Field::Skills, baseline_skills, || extractor.skills(text));
        track(Field::Skills, origin);

        let (education, origin) = table.resolve(Field::Education, record.education, || {
            extractor.education(text)
        });
        track(Field::Education, origin);

        let (designation, origin) = table.resolve(Field::Designation, record.designation.map(Some), || None);
        track(Field::Designation, origin);

        let (companies_worked, origin) = table.resolve(Field::CompaniesWorked, record.company_names, || {
            extractor.companies_and_job_titles(text)
        });
        track(Field::CompaniesWorked, origin);

        let (certifications, origin) = table.resolve(Field::Certifications, record.certifications, || {
            extractor.certifications(text)
        });
        track(Field::Certifications, origin);

        let (location, origin) = table.resolve(Field::Location, record.location, || extractor.location(text));
        track(Field::Location, origin);

        let (languages, origin) = table.resolve(Field::Languages, record.languages, Vec::new);
        track(Field::Languages, origin);

        let (employer_name, origin) = table.resolve(Field::EmployerName, None, || extractor.employer_name(text));
        track(Field::EmployerName, origin);

        ParsedResume {
            name,
            email,
            phone,
            experience_years: experience_years.max(0.0),
            skills,
            education,
            designation,
            companies_worked,
            certifications,
            location,
            languages,
            employer_name,
            provenance,
        }
    }
}
