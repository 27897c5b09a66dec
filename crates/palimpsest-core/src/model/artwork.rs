use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::key::{Keyed, RecordKey};

/// A bounding box around one smell-active object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectAnnotation {
    pub id: u64,
    pub category_id: u64,
    /// Category name; empty when the id is not among the declared categories.
    pub category: String,
    /// `[x, y, width, height]` in pixels.
    pub bbox: Vec<f64>,
    pub area: f64,
}

/// A historical artwork image with its object annotations and catalogue
/// metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtworkImage {
    pub id: String,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    pub image_url: String,
    pub annotations: Vec<ObjectAnnotation>,
    /// Catalogue columns keyed by their snake_case name.
    pub metadata: BTreeMap<String, String>,
}

impl Keyed for ArtworkImage {
    fn key(&self) -> RecordKey {
        RecordKey::new(self.id.as_str())
    }
}
