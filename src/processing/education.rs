//! Education: school-board percentages, highest degree and extra courses

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Searched in this order; the first one present anywhere in the text wins.
pub const DEGREES: [&str; 6] = ["Bachelor", "Master", "PhD", "BSc", "MSc", "MBA"];

pub const UNKNOWN_DEGREE: &str = "Unknown";

static TENTH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(10th|tenth|ssc)\s*[:\-]?\s*(\d{1,2}[\.,]?\d*%)").expect("Invalid 10th regex")
});

static TWELFTH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(12th|twelfth|hsc)\s*[:\-]?\s*(\d{1,2}[\.,]?\d*%)").expect("Invalid 12th regex")
});

static COURSE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(certification|course in|training in)\s+(.*?)(?:\n|,)").expect("Invalid course regex")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// The keyword that introduced the course, as written in the document
    pub kind: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    #[serde(rename = "10th", default, skip_serializing_if = "Option::is_none")]
    pub tenth: Option<String>,
    #[serde(rename = "12th", default, skip_serializing_if = "Option::is_none")]
    pub twelfth: Option<String>,
    #[serde(rename = "Highest Degree")]
    pub highest_degree: String,
    #[serde(rename = "Courses", default)]
    pub courses: Vec<Course>,
}

impl Default for Education {
    fn default() -> Self {
        Self {
            tenth: None,
            twelfth: None,
            highest_degree: UNKNOWN_DEGREE.to_string(),
            courses: Vec::new(),
        }
    }
}

impl Education {
    pub fn is_empty(&self) -> bool {
        self.tenth.is_none()
            && self.twelfth.is_none()
            && self.courses.is_empty()
            && (self.highest_degree.is_empty() || self.highest_degree == UNKNOWN_DEGREE)
    }

    /// Key names of the education mapping, in insertion order
    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::with_capacity(4);
        if self.tenth.is_some() {
            keys.push("10th");
        }
        if self.twelfth.is_some() {
            keys.push("12th");
        }
        keys.push("Highest Degree");
        keys.push("Courses");
        keys
    }

    /// Human-readable pieces: degree, board percentages, then each course
    pub fn values(&self) -> Vec<String> {
        let mut values = vec![self.highest_degree.clone()];
        if let Some(tenth) = &self.tenth {
            values.push(format!("10th: {}", tenth));
        }
        if let Some(twelfth) = &self.twelfth {
            values.push(format!("12th: {}", twelfth));
        }
        values.extend(
            self.courses
                .iter()
                .map(|course| format!("{} {}", course.kind, course.name).trim().to_string()),
        );
        values
    }
}

pub fn extract_education(text: &str) -> Education {
    let tenth = TENTH_REGEX.captures(text).map(|caps| caps[2].to_string());
    let twelfth = TWELFTH_REGEX.captures(text).map(|caps| caps[2].to_string());

    let lowered = text.to_lowercase();
    let highest_degree = DEGREES
        .iter()
        .find(|degree| lowered.contains(&degree.to_lowercase()))
        .map(|degree| degree.to_string())
        .unwrap_or_else(|| UNKNOWN_DEGREE.to_string());

    let courses: Vec<Course> = COURSE_REGEX
        .captures_iter(text)
        .map(|caps| Course {
            kind: caps[1].to_string(),
            name: caps[2].to_string(),
        })
        .collect();

    debug!(
        "Education heuristic: degree={} 10th={:?} 12th={:?} courses={}",
        highest_degree,
        tenth,
        twelfth,
        courses.len()
    );

    Education {
        tenth,
        twelfth,
        highest_degree,
        courses,
    }
}
