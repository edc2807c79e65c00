//! Parse orchestration: baseline parser, per-field precedence and the assembled record

pub mod baseline;
pub mod orchestrator;
pub mod precedence;
pub mod resume;

pub use orchestrator::ResumeParser;
pub use resume::{Field, FieldOrigin, ParsedResume};
