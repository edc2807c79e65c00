//! Input manager for handling different file types

use crate::error::{Result, ResumeParserError};
use crate::input::file_detector::FileType;
use crate::input::normalize::normalize_text;
use crate::input::text_extractor::{DocxExtractor, PdfExtractor, TextExtractor};
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct InputManager {
    cache: HashMap<PathBuf, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Check that a path exists and carries a supported extension.
    ///
    /// Nothing is read from the file.
    pub fn validate(path: &Path) -> Result<FileType> {
        if !path.exists() {
            return Err(ResumeParserError::FileNotFound(path.to_path_buf()));
        }

        match FileType::from_path(path) {
            FileType::Unknown => Err(ResumeParserError::UnsupportedFormat(format!(
                "Only .pdf and .docx resumes are accepted: {}",
                path.display()
            ))),
            file_type => Ok(file_type),
        }
    }

    pub fn extract_text(&mut self, path: &Path) -> Result<String> {
        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(path) {
                debug!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        let file_type = Self::validate(path)?;

        let raw = match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path)?
            }
            FileType::Docx => {
                info!("Extracting text from DOCX: {}", path.display());
                DocxExtractor.extract(path)?
            }
            FileType::Unknown => {
                return Err(ResumeParserError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };
        let text = normalize_text(&raw);
        debug!("Extracted {} characters from {}", text.len(), path.display());

        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), text.clone());
        }

        Ok(text)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
