//! Odeuropa smell-related objects: COCO-style bounding boxes on historical
//! artworks, enriched with the image-level catalogue metadata.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use palimpsest_core::model::{ArtworkImage, ObjectAnnotation};
use palimpsest_core::{Error, Result};

use crate::corpus::{Corpus, Outcomes};
use crate::emit::Outcome;
use crate::error::Warning;
use crate::table::{self, ColumnIndex};

pub const ANNOTATIONS_FILE: &str = "annotations.json";
pub const METADATA_FILE: &str = "metadata.csv";

const FILE_NAME_COLUMN: &str = "File Name";
const IMAGE_URL_COLUMN: &str = "Image URL";

#[derive(Debug, Deserialize)]
struct CocoImage {
    id: u64,
    #[serde(default)]
    file_name: String,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
}

#[derive(Debug, Deserialize)]
struct CocoAnnotation {
    id: u64,
    image_id: u64,
    category_id: u64,
    #[serde(default)]
    bbox: Vec<f64>,
    #[serde(default)]
    area: f64,
}

#[derive(Debug, Deserialize)]
struct CocoCategory {
    id: u64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct CocoFile {
    images: Vec<CocoImage>,
    #[serde(default)]
    annotations: Vec<CocoAnnotation>,
    #[serde(default)]
    categories: Vec<CocoCategory>,
}

/// Lower-case a catalogue column name and replace spaces with underscores.
pub fn metadata_field_name(column: &str) -> String {
    column.trim().to_lowercase().replace(' ', "_")
}

#[derive(Debug, Clone, Default)]
struct MetadataRow {
    image_url: String,
    fields: BTreeMap<String, String>,
}

/// Catalogue rows keyed by image file name. The first row for a file wins.
#[derive(Debug, Clone, Default)]
pub struct MetadataTable {
    rows: HashMap<String, MetadataRow>,
}

impl MetadataTable {
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = table::open(path, b',', "artwork metadata table")?;
        let columns = ColumnIndex::from_reader(&mut reader, &[FILE_NAME_COLUMN], path)?;
        let fields: Vec<(String, String)> = columns
            .names()
            .iter()
            .filter(|name| name.as_str() != FILE_NAME_COLUMN && name.as_str() != IMAGE_URL_COLUMN)
            .map(|name| (name.clone(), metadata_field_name(name)))
            .collect();

        let mut rows = HashMap::new();
        for row in reader.records() {
            let row = row?;
            let file_name = columns.get(&row, FILE_NAME_COLUMN).to_string();
            rows.entry(file_name).or_insert_with(|| MetadataRow {
                image_url: columns.get(&row, IMAGE_URL_COLUMN).to_string(),
                fields: fields
                    .iter()
                    .map(|(column, field)| (field.clone(), columns.get(&row, column).to_string()))
                    .collect(),
            });
        }

        log::info!("Loaded metadata for {} images", rows.len());
        Ok(Self { rows })
    }

    fn get(&self, file_name: &str) -> Option<&MetadataRow> {
        self.rows.get(file_name)
    }
}

fn build_image(
    image: CocoImage,
    annotations: Vec<CocoAnnotation>,
    categories: &HashMap<u64, String>,
    metadata: &MetadataTable,
) -> Outcome<ArtworkImage> {
    let mut warnings = Vec::new();

    let annotations = annotations
        .into_iter()
        .map(|annotation| {
            let category = categories
                .get(&annotation.category_id)
                .cloned()
                .unwrap_or_else(|| {
                    warnings.push(Warning::UnknownCategory {
                        category_id: annotation.category_id,
                    });
                    String::new()
                });
            ObjectAnnotation {
                id: annotation.id,
                category_id: annotation.category_id,
                category,
                bbox: annotation.bbox,
                area: annotation.area,
            }
        })
        .collect();

    let (image_url, fields) = match metadata.get(&image.file_name) {
        Some(row) => (row.image_url.clone(), row.fields.clone()),
        None => {
            warnings.push(Warning::MissingMetadata {
                file_name: image.file_name.clone(),
            });
            (String::new(), BTreeMap::new())
        }
    };

    let record = ArtworkImage {
        id: image.id.to_string(),
        file_name: image.file_name,
        width: image.width,
        height: image.height,
        image_url,
        annotations,
        metadata: fields,
    };
    Outcome::with_warnings(record, warnings)
}

#[derive(Debug, Clone)]
pub struct OdeuropaCorpus {
    root: PathBuf,
}

impl OdeuropaCorpus {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn load_annotations(&self) -> Result<CocoFile> {
        let path = self.root.join(ANNOTATIONS_FILE);
        if !path.is_file() {
            return Err(Error::not_found("COCO annotations file", path));
        }
        let file = File::open(&path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

impl Corpus for OdeuropaCorpus {
    type Record = ArtworkImage;

    fn name(&self) -> &'static str {
        "odeuropa"
    }

    fn outcomes(&self) -> Result<Outcomes<'_, ArtworkImage>> {
        let coco = self.load_annotations()?;
        let metadata = MetadataTable::load(&self.root.join(METADATA_FILE))?;

        let categories: HashMap<u64, String> = coco
            .categories
            .into_iter()
            .map(|category| (category.id, category.name))
            .collect();
        let mut by_image: HashMap<u64, Vec<CocoAnnotation>> = HashMap::new();
        for annotation in coco.annotations {
            by_image
                .entry(annotation.image_id)
                .or_default()
                .push(annotation);
        }

        log::info!(
            "{} images, {} categories",
            coco.images.len(),
            categories.len()
        );

        Ok(Box::new(coco.images.into_iter().map(move |image| {
            let annotations = by_image.remove(&image.id).unwrap_or_default();
            Ok(build_image(image, annotations, &categories, &metadata))
        })))
    }
}
