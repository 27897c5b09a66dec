use serde::{Deserialize, Serialize};

use crate::model::key::{Keyed, RecordKey};

/// Descriptive header shared by every CLMET text, whatever its format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClmetHeader {
    pub id: String,
    pub period: String,
    pub genre: String,
    pub subgenre: String,
    pub decade: String,
    pub quarter_cent: String,
    pub title: String,
    pub notes: String,
    pub comments: String,
    pub author: String,
    pub year: String,
}

/// A CLMET text as one running string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClmetText {
    #[serde(flatten)]
    pub header: ClmetHeader,
    pub text: String,
}

/// A CLMET text as parallel token and tag-index sequences.
///
/// Tag indices point into the vocabulary the text was extracted with; `-1`
/// marks a tag outside that vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClmetTagged {
    #[serde(flatten)]
    pub header: ClmetHeader,
    #[serde(rename = "text")]
    pub tokens: Vec<String>,
    pub pos_tags: Vec<i32>,
}

impl Keyed for ClmetText {
    fn key(&self) -> RecordKey {
        RecordKey::new(self.header.id.as_str())
    }
}

impl Keyed for ClmetTagged {
    fn key(&self) -> RecordKey {
        RecordKey::new(self.header.id.as_str())
    }
}
