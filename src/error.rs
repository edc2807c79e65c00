//! Error handling for the resume parser

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeParserError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File does not exist: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("File not readable: {0}")]
    FileNotReadable(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Baseline parser error: {0}")]
    Baseline(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ResumeParserError>;

impl ResumeParserError {
    /// True for the failures that mean the uploaded file itself is unusable
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ResumeParserError::FileNotFound(_)
                | ResumeParserError::FileNotReadable(_)
                | ResumeParserError::UnsupportedFormat(_)
        )
    }
}
