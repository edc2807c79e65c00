//! resume-parser: extract, store and filter structured resume data

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use resume_parser::cli::{self, Cli, Commands, ConfigAction};
use resume_parser::config::{Config, OutputFormat};
use resume_parser::output::{save_output_to_file, OutputGenerator};
use resume_parser::parser::ResumeParser;
use resume_parser::processing::location;
use resume_parser::store::{JsonRecordStore, ListingFilter, ResumeRecord};
use std::path::Path;
use std::process;
use std::time::Duration;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration from {}: {}", config_path.display(), e);
            process::exit(1);
        }
    };

    location::init(&config.location.extra_cities, &config.location.extra_countries);

    // Execute command
    if let Err(e) = run_command(cli.command, config, &config_path) {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Parse { file, output, save, detailed } => {
            let format = output_format(output.as_deref(), &config)?;
            let mut parser = ResumeParser::from_config(&config).context("Failed to set up the parser")?;
            info!("Using baseline parser: {}", parser.baseline_name());

            let parsed = parser
                .parse_resume(&file)
                .with_context(|| format!("Failed to parse {}", file.display()))?;

            let generator = OutputGenerator::with_options(config.output.color_output, detailed || config.output.detailed);
            let rendered = generator.resume(&parsed, format)?;
            emit(&rendered, save.as_deref())?;
        }

        Commands::Upload { paths, output } => {
            let format = output_format(output.as_deref(), &config)?;
            let files = cli::expand_resume_paths(&paths).context("Failed to read upload directory")?;
            if files.is_empty() {
                bail!("No PDF or DOCX files found");
            }

            let mut parser = ResumeParser::from_config(&config).context("Failed to set up the parser")?;
            let mut store = JsonRecordStore::open(&config).context("Failed to open the record store")?;

            let progress = upload_progress(files.len());
            let mut stored: Vec<ResumeRecord> = Vec::new();
            let mut failed = 0usize;

            for file in &files {
                progress.set_message(display_name(file));

                match parser.parse_resume(file) {
                    Ok(parsed) => {
                        let record = store
                            .insert(&parsed, file)
                            .with_context(|| format!("Failed to store {}", file.display()))?;
                        stored.push(record);
                    }
                    Err(e) if e.is_input_error() => {
                        warn!("Skipping {}: {}", file.display(), e);
                        failed += 1;
                    }
                    Err(e) => return Err(e).with_context(|| format!("Failed to parse {}", file.display())),
                }
                progress.inc(1);
            }
            progress.finish_and_clear();

            info!("Stored {} resume(s), {} failed", stored.len(), failed);
            let generator = OutputGenerator::from_config(&config.output);
            let refs: Vec<&ResumeRecord> = stored.iter().collect();
            println!("{}", generator.records(&refs, format)?);

            if stored.is_empty() {
                bail!("None of the {} file(s) could be parsed", files.len());
            }
        }

        Commands::List {
            experience,
            skills,
            education,
            certifications,
            location,
            query,
            output,
            save,
        } => {
            let format = output_format(output.as_deref(), &config)?;

            let filter = match query {
                Some(query) => ListingFilter::from_query(&query)?,
                None => ListingFilter::from_pairs([
                    ("experience", experience.as_deref().unwrap_or_default()),
                    ("skills", skills.as_deref().unwrap_or_default()),
                    ("education", education.as_deref().unwrap_or_default()),
                    ("certifications", certifications.as_deref().unwrap_or_default()),
                    ("location", location.as_deref().unwrap_or_default()),
                ])?,
            };

            let store = JsonRecordStore::open(&config).context("Failed to open the record store")?;
            let records = filter.apply(store.all());
            info!("{} of {} record(s) match", records.len(), store.len());

            let generator = OutputGenerator::from_config(&config.output);
            emit(&generator.records(&records, format)?, save.as_deref())?;
        }

        Commands::Show { id, output } => {
            let format = output_format(output.as_deref(), &config)?;
            let store = JsonRecordStore::open(&config).context("Failed to open the record store")?;
            let record = store.get(id).with_context(|| format!("No record with id {}", id))?;

            let generator = OutputGenerator::with_options(config.output.color_output, true);
            println!("{}", generator.records(&[record], format)?);
        }

        Commands::Remove { id } => {
            let mut store = JsonRecordStore::open(&config).context("Failed to open the record store")?;
            let record = store.remove(id)?;
            println!("Removed #{} ({})", record.id, record.file_name());
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let rendered = toml::to_string_pretty(&config).context("Failed to render configuration")?;
                println!("# {}\n{}", config_path.display(), rendered);
            }

            Some(ConfigAction::Reset) => {
                Config::default().save_to(config_path)?;
                println!("Configuration reset to defaults: {}", config_path.display());
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

fn output_format(requested: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match requested {
        Some(format) => cli::parse_output_format(format).map_err(anyhow::Error::msg),
        None => Ok(config.output.format),
    }
}

fn emit(content: &str, save: Option<&Path>) -> Result<()> {
    match save {
        Some(path) => {
            save_output_to_file(content, path).with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Output saved to {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

fn upload_progress(total: usize) -> ProgressBar {
    if total < 2 {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len}")
            .expect("Invalid progress bar template")
            .progress_chars("=> "),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
