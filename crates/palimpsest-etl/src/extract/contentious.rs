//! Contentious contexts: Dutch newspaper extracts with the judgements of
//! several annotators each.
//!
//! `Extracts.csv` is streamed; `Annotations.csv` is loaded once and grouped
//! by extract id.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use csv::StringRecord;

use palimpsest_core::model::{AnnotatorResponse, AnnotatorSuggestion, ContentiousExtract};
use palimpsest_core::vocab::CategoryMap;
use palimpsest_core::Result;

use crate::config::DEFAULT_CHUNK_SIZE;
use crate::corpus::{Corpus, Outcomes};
use crate::emit::Outcome;
use crate::error::{ExtractError, Warning};
use crate::extract::Extracted;
use crate::table::{self, ChunkedRows, ColumnIndex};

pub const EXTRACTS_FILE: &str = "Extracts.csv";
pub const ANNOTATIONS_FILE: &str = "Annotations.csv";

const EXTRACT_COLUMNS: [&str; 3] = ["extract_id", "text", "target_compound_bolded"];
const ANNOTATION_COLUMNS: [&str; 4] = [
    "extract_id",
    "anonymised_participant_id",
    "response",
    "suggestion",
];

#[derive(Debug, Clone, PartialEq, Eq)]
struct Annotation {
    participant: String,
    response: String,
    suggestion: String,
}

/// Every annotation row, grouped by extract id in file order.
#[derive(Debug, Clone, Default)]
pub struct AnnotationTable {
    by_extract: HashMap<String, Vec<Annotation>>,
}

impl AnnotationTable {
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = table::open(path, b',', "annotations table")?;
        let columns = ColumnIndex::from_reader(&mut reader, &ANNOTATION_COLUMNS, path)?;

        let mut by_extract: HashMap<String, Vec<Annotation>> = HashMap::new();
        for row in reader.records() {
            let row = row?;
            by_extract
                .entry(columns.get(&row, "extract_id").to_string())
                .or_default()
                .push(Annotation {
                    participant: columns.get(&row, "anonymised_participant_id").to_string(),
                    response: columns.get(&row, "response").to_string(),
                    suggestion: columns.get(&row, "suggestion").to_string(),
                });
        }

        log::info!(
            "Loaded annotations for {} extracts from {}",
            by_extract.len(),
            path.display()
        );
        Ok(Self { by_extract })
    }

    fn for_extract(&self, extract_id: &str) -> &[Annotation] {
        self.by_extract
            .get(extract_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Extract one row of `Extracts.csv` with its annotations.
///
/// A response outside `responses` keeps its Dutch form, gets an empty
/// English translation and one warning per distinct value.
pub fn extract_contentious(
    columns: &ColumnIndex,
    row: &StringRecord,
    annotations: &AnnotationTable,
    responses: &CategoryMap,
) -> std::result::Result<Extracted<ContentiousExtract>, ExtractError> {
    let extract_id = columns.get(row, "extract_id");
    if extract_id.trim().is_empty() {
        return Err(ExtractError::invalid("extract_id", extract_id));
    }

    let mut record = ContentiousExtract {
        extract_id: extract_id.to_string(),
        text: columns.get(row, "text").to_string(),
        target: columns.get(row, "target_compound_bolded").to_string(),
        ..ContentiousExtract::default()
    };

    let mut unknown = BTreeSet::new();
    for annotation in annotations.for_extract(extract_id) {
        let english = responses.get(&annotation.response).unwrap_or_else(|| {
            unknown.insert(annotation.response.clone());
            ""
        });
        record.annotator_responses_english.push(AnnotatorResponse {
            id: annotation.participant.clone(),
            response: english.to_string(),
        });
        record.annotator_responses_dutch.push(AnnotatorResponse {
            id: annotation.participant.clone(),
            response: annotation.response.clone(),
        });
        record.annotator_suggestions.push(AnnotatorSuggestion {
            id: annotation.participant.clone(),
            suggestion: annotation.suggestion.clone(),
        });
    }

    let warnings = unknown
        .into_iter()
        .map(|response| Warning::UnknownResponse { response })
        .collect();
    Ok((record, warnings))
}

#[derive(Debug, Clone)]
pub struct ContentiousCorpus {
    root: PathBuf,
    chunk_size: usize,
    responses: CategoryMap,
}

impl ContentiousCorpus {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            chunk_size: DEFAULT_CHUNK_SIZE,
            responses: CategoryMap::contentious_responses(),
        }
    }

    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }
}

impl Corpus for ContentiousCorpus {
    type Record = ContentiousExtract;

    fn name(&self) -> &'static str {
        "contentious"
    }

    fn outcomes(&self) -> Result<Outcomes<'_, ContentiousExtract>> {
        let extracts = self.root.join(EXTRACTS_FILE);
        let mut reader = table::open(&extracts, b',', "extracts table")?;
        let columns = ColumnIndex::from_reader(&mut reader, &EXTRACT_COLUMNS, &extracts)?;
        let annotations = AnnotationTable::load(&self.root.join(ANNOTATIONS_FILE))?;
        let responses = &self.responses;

        Ok(ChunkedRows::new(reader, self.chunk_size).into_outcomes(
            EXTRACTS_FILE,
            move |row| {
                let unit = format!("extract {:?}", columns.get(row, "extract_id"));
                Outcome::from_result(
                    unit,
                    extract_contentious(&columns, row, &annotations, responses),
                )
            },
        ))
    }
}
