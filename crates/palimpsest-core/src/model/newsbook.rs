use serde::{Deserialize, Serialize};

use crate::model::key::{Keyed, RecordKey};

/// A seventeenth-century newsbook issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Newsbook {
    pub id: String,
    pub title: String,
    pub text: String,
    /// Sub-collection the issue was found in (`1654_newsbooks`, ...).
    pub collection: String,
}

impl Keyed for Newsbook {
    fn key(&self) -> RecordKey {
        RecordKey::new(self.id.as_str())
    }
}
