//! Output generation: console, JSON, Markdown and HTML renderings of resumes and listings

pub mod formatter;

pub use formatter::{save_output_to_file, OutputFormatter, OutputGenerator};
