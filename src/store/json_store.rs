//! Record store backed by a JSON file plus a directory of uploaded documents

use crate::config::{Config, EducationJoin};
use crate::error::{Result, ResumeParserError};
use crate::parser::ParsedResume;
use crate::store::record::ResumeRecord;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// On-disk layout of `records.json`
#[derive(Debug, Default, Serialize, Deserialize)]
struct RecordFile {
    /// Never decreases, so a removed id is not handed out again
    next_id: u64,
    records: Vec<ResumeRecord>,
}

pub struct JsonRecordStore {
    records_path: PathBuf,
    uploads_dir: PathBuf,
    education_join: EducationJoin,
    file: RecordFile,
}

impl JsonRecordStore {
    pub fn open(config: &Config) -> Result<Self> {
        Self::open_at(&config.storage.data_dir, config.storage.education_join)
    }

    /// Open the store rooted at `data_dir`, creating it if needed
    pub fn open_at(data_dir: &Path, education_join: EducationJoin) -> Result<Self> {
        let records_path = data_dir.join("records.json");
        let uploads_dir = data_dir.join("resumes");
        fs::create_dir_all(&uploads_dir)
            .map_err(|e| ResumeParserError::Storage(format!("Failed to create {}: {}", uploads_dir.display(), e)))?;

        let mut file: RecordFile = if records_path.exists() {
            let content = fs::read_to_string(&records_path)?;
            match serde_json::from_str(&content) {
                Ok(file) => file,
                Err(e) => {
                    warn!("Ignoring unreadable record file {}: {}", records_path.display(), e);
                    RecordFile::default()
                }
            }
        } else {
            RecordFile::default()
        };

        let after_last = file.records.iter().map(|r| r.id + 1).max().unwrap_or(1);
        file.next_id = file.next_id.max(after_last);

        debug!(
            "Opened record store with {} record(s), next id {}",
            file.records.len(),
            file.next_id
        );

        Ok(Self {
            records_path,
            uploads_dir,
            education_join,
            file,
        })
    }

    /// Keep a copy of `source` and append its flattened record
    pub fn insert(&mut self, parsed: &ParsedResume, source: &Path) -> Result<ResumeRecord> {
        let id = self.file.next_id;

        let original_name = source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| ResumeParserError::InvalidInput(format!("No file name in {}", source.display())))?;
        let stored = self.uploads_dir.join(format!("{}_{}", id, original_name));
        fs::copy(source, &stored)
            .map_err(|e| ResumeParserError::Storage(format!("Failed to store {}: {}", source.display(), e)))?;

        let record = ResumeRecord::from_parsed(parsed, id, stored, self.education_join);
        self.file.records.push(record.clone());
        self.file.next_id = id + 1;

        if let Err(e) = self.save() {
            self.file.records.pop();
            self.file.next_id = id;
            let _ = fs::remove_file(&record.file);
            return Err(e);
        }

        info!("Stored record {} for {}", id, original_name);
        Ok(record)
    }

    pub fn all(&self) -> &[ResumeRecord] {
        &self.file.records
    }

    pub fn get(&self, id: u64) -> Option<&ResumeRecord> {
        self.file.records.iter().find(|r| r.id == id)
    }

    /// Delete a record and its stored file
    pub fn remove(&mut self, id: u64) -> Result<ResumeRecord> {
        let index = self
            .file
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| ResumeParserError::InvalidInput(format!("No record with id {}", id)))?;

        let record = self.file.records.remove(index);
        self.save()?;

        if record.file.exists() {
            if let Err(e) = fs::remove_file(&record.file) {
                warn!("Failed to delete {}: {}", record.file.display(), e);
            }
        }

        info!("Removed record {}", id);
        Ok(record)
    }

    pub fn len(&self) -> usize {
        self.file.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.file.records.is_empty()
    }

    fn save(&self) -> Result<()> {
        let dir = self
            .records_path
            .parent()
            .ok_or_else(|| ResumeParserError::Storage("Record file has no parent directory".to_string()))?;

        let content = serde_json::to_string_pretty(&self.file)?;
        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(content.as_bytes())?;
        temp.persist(&self.records_path)
            .map_err(|e| ResumeParserError::Storage(format!("Failed to write {}: {}", self.records_path.display(), e)))?;
        Ok(())
    }
}
