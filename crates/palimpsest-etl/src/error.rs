//! Per-unit failure and per-field degradation types.
//!
//! Run-aborting errors live in [`palimpsest_core::Error`]. The types here
//! never reach the caller as errors: an [`ExtractError`] turns into a skipped
//! unit and a [`Warning`] travels alongside a record that was still emitted.

use std::fmt;

use thiserror::Error;

/// Why a single source unit produced no record.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("malformed markup: {0}")]
    Markup(#[from] roxmltree::Error),

    #[error("missing element <{0}>")]
    MissingElement(&'static str),

    #[error("missing attribute `{attribute}` on <{element}>")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    /// A category code outside its fixed mapping. No default is guessed.
    #[error("category code {code:?} is not in the {vocabulary} mapping")]
    CategoryMapping {
        code: String,
        vocabulary: &'static str,
    },

    #[error("invalid {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("table error: {0}")]
    Table(#[from] csv::Error),
}

impl ExtractError {
    pub fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            value: value.into(),
        }
    }

    /// Returns `true` when the unit was rejected by a fixed vocabulary.
    pub fn is_category_mapping(&self) -> bool {
        matches!(self, Self::CategoryMapping { .. })
    }
}

/// A field that could not be resolved and was replaced by its documented
/// default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// At least one tag resolved to the unknown-tag sentinel.
    UnknownTag,
    /// At least one token chunk did not split into token and tag.
    MalformedToken,
    /// The target marker was absent; offsets fell back to `[-1, -1]`.
    MissingTargetMarker,
    /// The cross-reference join key could not be built.
    JoinUnavailable { member_id: String, date: String },
    /// An annotator response outside the response vocabulary.
    UnknownResponse { response: String },
    /// An annotation referencing an undeclared category.
    UnknownCategory { category_id: u64 },
    /// No catalogue metadata row for the image.
    MissingMetadata { file_name: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTag => f.write_str("unknown tag"),
            Self::MalformedToken => f.write_str("malformed token"),
            Self::MissingTargetMarker => {
                f.write_str("target marker not found, offsets set to [-1, -1]")
            }
            Self::JoinUnavailable { member_id, date } => write!(
                f,
                "posts could not be fetched for mnis_id: {member_id}, date: {date}"
            ),
            Self::UnknownResponse { response } => {
                write!(f, "unknown annotator response {response:?}")
            }
            Self::UnknownCategory { category_id } => {
                write!(f, "unknown category id {category_id}")
            }
            Self::MissingMetadata { file_name } => {
                write!(f, "no metadata row for {file_name}")
            }
        }
    }
}
