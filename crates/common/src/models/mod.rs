//! Data models shared across BibGraph crates

mod document;

pub use document::{parse_year, DocumentRecord, DocumentRef, MAX_YEAR, MIN_YEAR};
