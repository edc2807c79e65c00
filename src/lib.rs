//! Resume parser library
//!
//! Extracts text from PDF and DOCX resumes, derives structured candidate
//! fields from it, and stores and filters the flattened records.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod parser;
pub mod processing;
pub mod store;

pub use config::Config;
pub use error::{Result, ResumeParserError};
pub use parser::{ParsedResume, ResumeParser};
