use serde::{Deserialize, Serialize};

use crate::model::key::{Keyed, RecordKey};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatorResponse {
    pub id: String,
    pub response: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatorSuggestion {
    pub id: String,
    pub suggestion: String,
}

/// A Dutch newspaper extract with every annotator judgement collected for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentiousExtract {
    pub extract_id: String,
    pub text: String,
    pub target: String,
    pub annotator_responses_english: Vec<AnnotatorResponse>,
    pub annotator_responses_dutch: Vec<AnnotatorResponse>,
    pub annotator_suggestions: Vec<AnnotatorSuggestion>,
}

impl Keyed for ContentiousExtract {
    fn key(&self) -> RecordKey {
        RecordKey::new(self.extract_id.as_str())
    }
}
