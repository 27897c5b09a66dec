use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::key::{Keyed, RecordKey};

/// Which Old Bailey series a document belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProceedingKind {
    /// Ordinary's Accounts, one pamphlet per file.
    #[serde(rename = "OA")]
    OrdinarysAccount,
    /// Sessions Papers, one court session per file.
    #[serde(rename = "OBP")]
    SessionsPaper,
}

impl ProceedingKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::OrdinarysAccount => "OA",
            Self::SessionsPaper => "OBP",
        }
    }
}

impl fmt::Display for ProceedingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One Old Bailey document: a court session or an Ordinary's Account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proceeding {
    pub id: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: ProceedingKind,
    pub places: Vec<String>,
    pub persons: Vec<String>,
    pub text: String,
}

impl Keyed for Proceeding {
    fn key(&self) -> RecordKey {
        RecordKey::new(self.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_as_code() {
        let json = serde_json::to_string(&ProceedingKind::SessionsPaper).unwrap();
        assert_eq!(json, "\"OBP\"");
        assert_eq!(ProceedingKind::OrdinarysAccount.to_string(), "OA");
    }
}
