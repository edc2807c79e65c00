//! Persisted records and the listing filter over them

pub mod filter;
pub mod json_store;
pub mod record;

pub use filter::ListingFilter;
pub use json_store::JsonRecordStore;
pub use record::ResumeRecord;
