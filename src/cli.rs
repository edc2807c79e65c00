//! CLI interface for the resume parser

use crate::config::OutputFormat;
use crate::input::file_detector::FileType;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-parser")]
#[command(about = "Extract structured candidate data from PDF and DOCX resumes")]
#[command(long_about = "Parse resumes into structured fields (contact details, experience, education, skills, employment, certifications, location), store them, and filter the stored records")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a resume and print the extracted fields without storing them
    Parse {
        /// Path to resume file (PDF, DOCX)
        file: PathBuf,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Show where each field value came from
        #[arg(short, long)]
        detailed: bool,
    },

    /// Parse resumes and add them to the record store
    Upload {
        /// Resume files, or directories containing them
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output format for the stored records
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List stored resumes, optionally filtered
    List {
        /// Minimum years of experience
        #[arg(short, long)]
        experience: Option<String>,

        /// Comma-separated skills; all must match
        #[arg(long)]
        skills: Option<String>,

        /// Education substring
        #[arg(long)]
        education: Option<String>,

        /// Comma-separated certifications; all must match
        #[arg(long)]
        certifications: Option<String>,

        /// Location substring
        #[arg(short, long)]
        location: Option<String>,

        /// Raw query string, e.g. "skills=python,sql&experience=3"
        #[arg(short, long)]
        query: Option<String>,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Show one stored record
    Show {
        id: u64,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Remove a stored record and its file
    Remove {
        id: u64,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown, html", format)),
    }
}

/// Expand directories into the resume files they directly contain, sorted by name.
/// Plain file arguments are passed through untouched so they can fail later with
/// a precise error.
pub fn expand_resume_paths(paths: &[PathBuf]) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            let mut entries: Vec<PathBuf> = std::fs::read_dir(path)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| p.is_file() && FileType::from_path(p).is_supported())
                .collect();
            entries.sort();
            files.extend(entries);
        } else {
            files.push(path.clone());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("MD"), Ok(OutputFormat::Markdown));
        assert_eq!(parse_output_format("json"), Ok(OutputFormat::Json));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_list_flags() {
        let cli = Cli::try_parse_from(["resume-parser", "list", "--skills", "python,sql", "-e", "3"]).unwrap();
        match cli.command {
            Commands::List { skills, experience, .. } => {
                assert_eq!(skills.as_deref(), Some("python,sql"));
                assert_eq!(experience.as_deref(), Some("3"));
            }
            _ => panic!("expected list command"),
        }
    }

    #[test]
    fn test_expand_resume_paths() {
        let dir = TempDir::new().unwrap();
        for name in ["b.pdf", "a.DOCX", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        let loose = PathBuf::from("loose.txt");

        let files = expand_resume_paths(&[dir.path().to_path_buf(), loose.clone()]).unwrap();
        assert_eq!(files, vec![dir.path().join("a.DOCX"), dir.path().join("b.pdf"), loose]);
    }
}
