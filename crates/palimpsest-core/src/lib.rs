//! Core domain model for palimpsest.
//!
//! This crate defines the normalized record types produced by every corpus
//! adapter, their identity keys, the fixed vocabularies used while
//! extracting (tag lists, category maps) and the run-level error type.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod model;
pub mod vocab;

pub use error::{Error, Result};
pub use model::{Keyed, RecordKey};
