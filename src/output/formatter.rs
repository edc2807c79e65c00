//! Output formatters for parsed resumes and stored record listings

use crate::config::{OutputConfig, OutputFormat};
use crate::error::{Result, ResumeParserError};
use crate::parser::{Field, FieldOrigin, ParsedResume};
use crate::store::ResumeRecord;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

pub trait OutputFormatter {
    fn format_resume(&self, resume: &ParsedResume) -> Result<String>;
    fn format_records(&self, records: &[&ResumeRecord]) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Terminal output with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Picks the formatter for a requested format
pub struct OutputGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

const STYLES: &str = r#"
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; color: #333; max-width: 1000px; margin: 0 auto; padding: 20px; background: #f8f9fa; }
        .container { background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        h1 { color: #007acc; border-bottom: 3px solid #007acc; padding-bottom: 10px; }
        table { border-collapse: collapse; width: 100%; }
        th, td { text-align: left; padding: 8px; border-bottom: 1px solid #e9ecef; vertical-align: top; }
        th { background: #f1f3f5; }
        .origin { color: #6c757d; font-size: 0.85em; }
        .empty { color: #adb5bd; }
"#;

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{{ title }}</title>
    {% if include_styles %}<style>{{ styles|safe }}</style>{% endif %}
</head>
<body>
    <div class="container">
        <h1>{{ title }}</h1>
        <table>
            {% for row in rows %}
            <tr>
                <th>{{ row.label }}</th>
                <td>{% if row.value.is_empty() %}<span class="empty">none</span>{% else %}{{ row.value }}{% endif %}</td>
                {% if show_origin %}<td class="origin">{{ row.origin }}</td>{% endif %}
            </tr>
            {% endfor %}
        </table>
    </div>
</body>
</html>"#,
    ext = "html"
)]
struct ResumeHtml {
    include_styles: bool,
    styles: &'static str,
    title: String,
    show_origin: bool,
    rows: Vec<HtmlField>,
}

struct HtmlField {
    label: String,
    value: String,
    origin: String,
}

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Resumes</title>
    {% if include_styles %}<style>{{ styles|safe }}</style>{% endif %}
</head>
<body>
    <div class="container">
        <h1>Resumes ({{ records.len() }})</h1>
        <table>
            <tr>
                <th>ID</th><th>Name</th><th>Email</th><th>Phone</th><th>Experience</th><th>Skills</th>
                <th>Education</th><th>Job Title</th><th>Companies</th><th>Certifications</th><th>Location</th><th>File</th>
            </tr>
            {% for record in records %}
            <tr>
                <td>{{ record.id }}</td>
                <td>{{ record.name }}</td>
                <td>{{ record.email }}</td>
                <td>{{ record.phone }}</td>
                <td>{{ record.experience }}</td>
                <td>{{ record.skills }}</td>
                <td>{{ record.education }}</td>
                <td>{{ record.job_title }}</td>
                <td>{{ record.companies_worked }}</td>
                <td>{{ record.certifications }}</td>
                <td>{{ record.location }}</td>
                <td>{{ record.file_name() }}</td>
            </tr>
            {% endfor %}
        </table>
    </div>
</body>
</html>"#,
    ext = "html"
)]
struct RecordsHtml<'a> {
    include_styles: bool,
    styles: &'static str,
    records: &'a [&'a ResumeRecord],
}

/// Field label and display text, in record order
fn resume_fields(resume: &ParsedResume) -> Vec<(Field, String)> {
    let companies = resume
        .companies_worked
        .iter()
        .map(|job| {
            if job.job_title.is_empty() {
                job.company.clone()
            } else {
                format!("{} ({})", job.company, job.job_title)
            }
        })
        .collect::<Vec<_>>()
        .join("; ");

    vec![
        (Field::Name, resume.name.clone().unwrap_or_default()),
        (Field::Email, resume.email.clone().unwrap_or_default()),
        (Field::Phone, resume.phone.clone().unwrap_or_default()),
        (Field::Experience, format!("{:.1} years", resume.experience_years)),
        (Field::Skills, resume.skills.iter().cloned().collect::<Vec<_>>().join(", ")),
        (Field::Education, resume.education.values().join(", ")),
        (Field::Designation, resume.designation.clone().unwrap_or_default()),
        (Field::CompaniesWorked, companies),
        (Field::Certifications, resume.certifications.join(", ")),
        (Field::Location, resume.location.to_string()),
        (Field::Languages, resume.languages.join(", ")),
        (Field::EmployerName, resume.employer_name.clone().unwrap_or_default()),
    ]
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "█".blue().bold(), title.blue().bold())
        } else {
            format!("\n# {}\n", title)
        }
    }

    fn origin_color(origin: FieldOrigin) -> Color {
        match origin {
            FieldOrigin::Baseline => Color::Green,
            FieldOrigin::Heuristic => Color::Yellow,
            FieldOrigin::Default => Color::BrightBlack,
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_resume(&self, resume: &ParsedResume) -> Result<String> {
        let mut output = self.format_header(&format!("Resume: {}", resume.display_name()));

        for (field, value) in resume_fields(resume) {
            let value = if value.is_empty() {
                self.colorize("-", Color::BrightBlack)
            } else {
                value
            };
            output.push_str(&format!("{:<17} {}", format!("{}:", field.label()), value));

            if self.detailed {
                let origin = resume.origin(field);
                output.push_str(&format!(
                    " {}",
                    self.colorize(&format!("[{}]", origin), Self::origin_color(origin))
                ));
            }
            output.push('\n');
        }

        if self.detailed && !resume.education.courses.is_empty() {
            output.push_str(&self.format_header("Courses"));
            for course in &resume.education.courses {
                output.push_str(&format!("  • {} {}\n", course.kind, course.name));
            }
        }

        Ok(output)
    }

    fn format_records(&self, records: &[&ResumeRecord]) -> Result<String> {
        let mut output = self.format_header(&format!("Resumes ({})", records.len()));

        if records.is_empty() {
            output.push_str(&self.colorize("No matching resumes\n", Color::Yellow));
            return Ok(output);
        }

        for record in records {
            let name = if record.name.is_empty() { "Unnamed" } else { record.name.as_str() };
            output.push_str(&format!(
                "{} {} {}\n",
                self.colorize(&format!("#{}", record.id), Color::Cyan),
                self.colorize(name, Color::White),
                self.colorize(&format!("({} yrs, {})", record.experience, record.location), Color::BrightBlack)
            ));
            if !record.skills.is_empty() {
                output.push_str(&format!("    Skills: {}\n", record.skills));
            }
            if self.detailed {
                output.push_str(&format!("    Email: {} | Phone: {}\n", record.email, record.phone));
                output.push_str(&format!("    Education: {}\n", record.education));
                output.push_str(&format!("    Job title: {} | Companies: {}\n", record.job_title, record.companies_worked));
                output.push_str(&format!("    Certifications: {}\n", record.certifications));
                output.push_str(&format!(
                    "    File: {} | Added: {}\n",
                    record.file.display(),
                    record.created_at.format("%Y-%m-%d %H:%M UTC")
                ));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_resume(&self, resume: &ParsedResume) -> Result<String> {
        self.to_json(resume)
    }

    fn format_records(&self, records: &[&ResumeRecord]) -> Result<String> {
        self.to_json(records)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_resume(&self, resume: &ParsedResume) -> Result<String> {
        let mut output = format!("# {}\n\n", resume.display_name());

        if self.include_metadata {
            output.push_str("| Field | Value | Source |\n|-------|-------|--------|\n");
        } else {
            output.push_str("| Field | Value |\n|-------|-------|\n");
        }

        for (field, value) in resume_fields(resume) {
            output.push_str(&format!("| {} | {} |", field.label(), Self::cell(&value)));
            if self.include_metadata {
                output.push_str(&format!(" {} |", resume.origin(field)));
            }
            output.push('\n');
        }

        Ok(output)
    }

    fn format_records(&self, records: &[&ResumeRecord]) -> Result<String> {
        let mut output = format!("# Resumes ({})\n\n", records.len());
        output.push_str("| ID | Name | Experience | Skills | Education | Certifications | Location |\n");
        output.push_str("|----|------|------------|--------|-----------|----------------|----------|\n");

        for record in records {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} |\n",
                record.id,
                Self::cell(&record.name),
                record.experience,
                Self::cell(&record.skills),
                Self::cell(&record.education),
                Self::cell(&record.certifications),
                Self::cell(&record.location)
            ));
        }

        if self.include_metadata {
            output.push_str(&format!(
                "\n_Generated {}_\n",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_resume(&self, resume: &ParsedResume) -> Result<String> {
        let rows = resume_fields(resume)
            .into_iter()
            .map(|(field, value)| HtmlField {
                label: field.label().to_string(),
                value,
                origin: resume.origin(field).to_string(),
            })
            .collect();

        let template = ResumeHtml {
            include_styles: self.include_styles,
            styles: STYLES,
            title: resume.display_name().to_string(),
            show_origin: !resume.provenance.is_empty(),
            rows,
        };
        template
            .render()
            .map_err(|e| ResumeParserError::OutputFormatting(e.to_string()))
    }

    fn format_records(&self, records: &[&ResumeRecord]) -> Result<String> {
        let template = RecordsHtml {
            include_styles: self.include_styles,
            styles: STYLES,
            records,
        };
        template
            .render()
            .map_err(|e| ResumeParserError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl OutputGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    pub fn with_options(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(detailed),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::with_options(config.color_output, config.detailed)
    }

    fn formatter(&self, format: OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
            OutputFormat::Html => &self.html_formatter,
        }
    }

    pub fn resume(&self, resume: &ParsedResume, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_resume(resume)
    }

    pub fn records(&self, records: &[&ResumeRecord], format: OutputFormat) -> Result<String> {
        self.formatter(format).format_records(records)
    }
}

impl Default for OutputGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_output_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EducationJoin;
    use crate::processing::employment::Employment;
    use std::path::PathBuf;

    fn resume() -> ParsedResume {
        let mut resume = ParsedResume {
            name: Some("Linus <T>".to_string()),
            email: Some("linus@kernel.org".to_string()),
            experience_years: 12.0,
            skills: ["C++".to_string(), "SQL".to_string()].into_iter().collect(),
            companies_worked: vec![Employment { company: "Transmeta".to_string(), job_title: "Engineer".to_string() }],
            ..ParsedResume::default()
        };
        resume.provenance.insert(Field::Name, FieldOrigin::Baseline);
        resume
    }

    fn record() -> ResumeRecord {
        ResumeRecord::from_parsed(&resume(), 7, PathBuf::from("/data/resumes/7_linus.pdf"), EducationJoin::Values)
    }

    #[test]
    fn test_console_resume_without_colors() {
        let output = ConsoleFormatter::new(false, true).format_resume(&resume()).unwrap();

        assert!(output.contains("# Resume: Linus <T>"));
        assert!(output.contains("Skills:"));
        assert!(output.contains("C++, SQL"));
        assert!(output.contains("Transmeta (Engineer)"));
        assert!(output.contains("[baseline]"));
        assert!(output.contains("[default]"));
    }

    #[test]
    fn test_console_empty_listing() {
        let output = ConsoleFormatter::new(false, false).format_records(&[]).unwrap();
        assert!(output.contains("No matching resumes"));
    }

    #[test]
    fn test_json_resume_uses_field_labels() {
        let output = JsonFormatter::new(false).format_resume(&resume()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["Name"], "Linus <T>");
        assert_eq!(value["Skills"], serde_json::json!(["C++", "SQL"]));
        assert_eq!(value["Location"]["City"], "Unknown");
        assert_eq!(value["provenance"]["Name"], "baseline");
    }

    #[test]
    fn test_json_records() {
        let record = record();
        let output = JsonFormatter::new(true).format_records(&[&record]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value[0]["id"], 7);
        assert_eq!(value[0]["skills"], "C++, SQL");
    }

    #[test]
    fn test_markdown_escapes_pipes() {
        let mut resume = resume();
        resume.certifications = vec!["A|B".to_string()];
        let output = MarkdownFormatter::new(false).format_resume(&resume).unwrap();

        assert!(output.starts_with("# Linus <T>"));
        assert!(output.contains("| Certifications | A\\|B |"));
    }

    #[test]
    fn test_html_escapes_values() {
        let output = HtmlFormatter::new(false).format_resume(&resume()).unwrap();

        assert!(output.contains("Linus &lt;T&gt;"));
        assert!(!output.contains("<style>"));
        assert!(output.contains("baseline"));
    }

    #[test]
    fn test_html_records_table() {
        let record = record();
        let output = HtmlFormatter::new(true).format_records(&[&record]).unwrap();

        assert!(output.contains("<style>"));
        assert!(output.contains("Resumes (1)"));
        assert!(output.contains("7_linus.pdf"));
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = OutputGenerator::with_options(false, false);
        let record = record();

        assert!(generator.records(&[&record], OutputFormat::Json).unwrap().starts_with('['));
        assert!(generator.resume(&resume(), OutputFormat::Markdown).unwrap().starts_with("# "));
        assert_eq!(generator.formatter(OutputFormat::Html).supports_format(), OutputFormat::Html);
    }

    #[test]
    fn test_save_output_creates_parent_dirs() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out").join("list.md");

        save_output_to_file("# Resumes", &path).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# Resumes");
    }
}
