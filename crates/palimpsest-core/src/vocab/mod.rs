//! Fixed vocabularies consulted during extraction.
//!
//! Each vocabulary is an immutable value built once and handed to the
//! extractors by reference.

pub mod category;
pub mod tags;

pub use category::CategoryMap;
pub use tags::{TagVocabulary, UNKNOWN_TAG};
