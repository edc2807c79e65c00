//! Per-field rule deciding between the baseline parser and the local heuristics

use crate::parser::resume::{Field, FieldOrigin};
use crate::processing::education::Education;
use crate::processing::location::Location;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldSource {
    /// Baseline value or the field default; no local fallback
    Baseline,
    /// Baseline value when present, otherwise the local heuristic
    BaselineThenHeuristic,
    /// Local heuristic only
    Heuristic,
}

/// Values that can be missing even when a parser returned them
pub trait Presence {
    fn is_absent(&self) -> bool;
}

impl Presence for String {
    fn is_absent(&self) -> bool {
        self.trim().is_empty()
    }
}

impl Presence for f64 {
    fn is_absent(&self) -> bool {
        !self.is_finite() || *self <= 0.0
    }
}

impl<T> Presence for Vec<T> {
    fn is_absent(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Presence for BTreeSet<T> {
    fn is_absent(&self) -> bool {
        self.is_empty()
    }
}

impl Presence for Education {
    fn is_absent(&self) -> bool {
        self.is_empty()
    }
}

impl Presence for Location {
    fn is_absent(&self) -> bool {
        self.is_unknown()
    }
}

impl<T: Presence> Presence for Option<T> {
    fn is_absent(&self) -> bool {
        self.as_ref().map_or(true, Presence::is_absent)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecedenceTable {
    rules: BTreeMap<Field, FieldSource>,
}

impl Default for PrecedenceTable {
    fn default() -> Self {
        let rules = Field::ALL
            .iter()
            .map(|field| {
                let source = match field {
                    Field::Name
                    | Field::Email
                    | Field::Phone
                    | Field::Experience
                    | Field::Designation
                    | Field::Languages => FieldSource::Baseline,
                    Field::Skills
                    | Field::Education
                    | Field::CompaniesWorked
                    | Field::Certifications
                    | Field::Location => FieldSource::BaselineThenHeuristic,
                    Field::EmployerName => FieldSource::Heuristic,
                };
                (*field, source)
            })
            .collect();

        Self { rules }
    }
}

impl PrecedenceTable {
    pub fn rule(&self, field: Field) -> FieldSource {
        self.rules.get(&field).copied().unwrap_or(FieldSource::Baseline)
    }

    pub fn with_rule(mut self, field: Field, source: FieldSource) -> Self {
        self.rules.insert(field, source);
        self
    }

    /// Pick a field value according to its rule.
    ///
    /// The heuristic closure only runs when the rule can use its result.
    pub fn resolve<T, F>(&self, field: Field, baseline: Option<T>, heuristic: F) -> (T, FieldOrigin)
    where
        T: Presence + Default,
        F: FnOnce() -> T,
    {
        let baseline = baseline.filter(|value| !value.is_absent());

        match (self.rule(field), baseline) {
            (FieldSource::Baseline | FieldSource::BaselineThenHeuristic, Some(value)) => {
                (value, FieldOrigin::Baseline)
            }
            (FieldSource::Baseline, None) => (T::default(), FieldOrigin::Default),
            (FieldSource::BaselineThenHeuristic, None) | (FieldSource::Heuristic, _) => {
                let value = heuristic();
                if value.is_absent() {
                    (value, FieldOrigin::Default)
                } else {
                    (value, FieldOrigin::Heuristic)
                }
            }
        }
    }
}
