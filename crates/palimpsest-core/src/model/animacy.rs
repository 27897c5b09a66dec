use serde::{Deserialize, Serialize};

use crate::model::key::{Keyed, RecordKey};

/// Character span of the target expression, `[start, end]`.
///
/// Measured on the sentence *with* its `***` markers. `[-1, -1]` means the
/// marker was absent.
pub type Offsets = [i32; 2];

/// Sentinel offsets for a sentence whose target marker could not be found.
pub const OFFSETS_NOT_FOUND: Offsets = [-1, -1];

/// A nineteenth-century sentence mentioning a machine, annotated for
/// animacy and humanness of that machine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimacySentence {
    pub id: String,
    /// Sentence text with the target markers removed.
    pub sentence: String,
    /// Surrounding context with separators and markers removed.
    pub context: String,
    pub target: String,
    pub animacy: f32,
    pub humanness: f32,
    pub offsets: Offsets,
    pub date: String,
}

impl Keyed for AnimacySentence {
    fn key(&self) -> RecordKey {
        RecordKey::new(self.id.as_str())
    }
}
