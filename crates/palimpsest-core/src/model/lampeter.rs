use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::key::{Keyed, RecordKey};

/// One Early Modern English tract (1640-1740).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LampeterTract {
    pub id: String,
    pub text: String,
    /// First of January of the publication year.
    pub date: NaiveDate,
    pub genre: String,
    pub head: String,
    pub title: String,
}

impl Keyed for LampeterTract {
    fn key(&self) -> RecordKey {
        RecordKey::new(self.id.as_str())
    }
}
