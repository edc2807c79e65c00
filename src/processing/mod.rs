//! Field heuristics
//! Each module derives one field from plain resume text and degrades to an
//! empty or default value when its pattern is absent.

pub mod certifications;
pub mod contact;
pub mod education;
pub mod employer;
pub mod employment;
pub mod experience;
pub mod extractor;
pub mod location;
pub mod skills;

pub use extractor::FieldExtractor;
