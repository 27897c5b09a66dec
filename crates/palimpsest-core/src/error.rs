use std::path::PathBuf;

use thiserror::Error;

/// Run-aborting errors. Anything in here terminates the extraction run and
/// reaches the caller unmodified.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not found: {entity} at {}", path.display())]
    NotFound { entity: &'static str, path: PathBuf },

    #[error("missing root element <{element}> in {}", path.display())]
    MissingRoot {
        element: &'static str,
        path: PathBuf,
    },

    #[error("missing columns {columns:?} in {}", path.display())]
    MissingColumns { columns: Vec<String>, path: PathBuf },

    #[error("markup error in {}: {message}", path.display())]
    Markup { path: PathBuf, message: String },

    #[error("table error: {0}")]
    Table(#[from] csv::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl Error {
    /// Shorthand for a missing input file or directory.
    pub fn not_found(entity: &'static str, path: impl Into<PathBuf>) -> Self {
        Self::NotFound {
            entity,
            path: path.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = Error::not_found("corpus directory", "/data/clmet");
        assert_eq!(
            err.to_string(),
            "not found: corpus directory at /data/clmet"
        );
    }

    #[test]
    fn test_missing_columns_display() {
        let err = Error::MissingColumns {
            columns: vec!["mnis_id".to_string()],
            path: PathBuf::from("speeches.csv"),
        };
        assert!(err.to_string().contains("mnis_id"));
        assert!(err.to_string().contains("speeches.csv"));
    }
}
