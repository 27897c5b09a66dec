//! Atypical animacy: annotated sentences about machines from
//! nineteenth-century newspapers, one row per sentence in a TSV table.

use std::path::PathBuf;

use csv::StringRecord;

use palimpsest_core::model::{AnimacySentence, Offsets, OFFSETS_NOT_FOUND};
use palimpsest_core::Result;

use crate::config::DEFAULT_CHUNK_SIZE;
use crate::corpus::{Corpus, Outcomes};
use crate::emit::Outcome;
use crate::error::{ExtractError, Warning};
use crate::extract::Extracted;
use crate::table::{self, ChunkedRows, ColumnIndex};

pub const ANNOTATIONS_FILE: &str = "LwM-nlp-animacy-annotations-machines19thC.tsv";

/// Surrounds the target expression in the annotated sentence.
pub const TARGET_MARKER: &str = "***";

const SEPARATOR_MARKER: &str = "[SEP]";

const COLUMNS: [&str; 7] = [
    "SentenceId",
    "Sentence",
    "SentenceCtxt",
    "TargetExpression",
    "animacy",
    "humanness",
    "Date",
];

/// Character offsets of `target` in `sentence`.
///
/// `start` is the position of the first target marker, counted on the
/// sentence as it still contains its markers; `end` is `start` plus the
/// target length. Returns `None` when there is no marker.
pub fn target_offsets(sentence: &str, target: &str) -> Option<Offsets> {
    let byte = sentence.find(TARGET_MARKER)?;
    let start = sentence[..byte].chars().count() as i32;
    let end = start + target.chars().count() as i32;
    Some([start, end])
}

fn parse_score(field: &'static str, raw: &str) -> std::result::Result<f32, ExtractError> {
    raw.trim()
        .parse::<f32>()
        .map_err(|_| ExtractError::invalid(field, raw))
}

/// Extract one annotated sentence row.
pub fn extract_sentence(
    columns: &ColumnIndex,
    row: &StringRecord,
) -> std::result::Result<Extracted<AnimacySentence>, ExtractError> {
    let id = columns.get(row, "SentenceId");
    if id.trim().is_empty() {
        return Err(ExtractError::invalid("SentenceId", id));
    }

    let animacy = parse_score("animacy", columns.get(row, "animacy"))?;
    let humanness = parse_score("humanness", columns.get(row, "humanness"))?;

    let marked = columns.get(row, "Sentence");
    let target = columns.get(row, "TargetExpression");
    let mut warnings = Vec::new();
    let offsets = target_offsets(marked, target).unwrap_or_else(|| {
        warnings.push(Warning::MissingTargetMarker);
        OFFSETS_NOT_FOUND
    });

    let context = columns
        .get(row, "SentenceCtxt")
        .replace(SEPARATOR_MARKER, "")
        .replace(TARGET_MARKER, "");

    let record = AnimacySentence {
        id: id.to_string(),
        sentence: marked.replace(TARGET_MARKER, ""),
        context,
        target: target.to_string(),
        animacy,
        humanness,
        offsets,
        date: columns.get(row, "Date").to_string(),
    };
    Ok((record, warnings))
}

#[derive(Debug, Clone)]
pub struct AnimacyCorpus {
    file: PathBuf,
    chunk_size: usize,
}

impl AnimacyCorpus {
    /// Read the annotation table from `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self {
            file: root.join(ANNOTATIONS_FILE),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }
}

impl Corpus for AnimacyCorpus {
    type Record = AnimacySentence;

    fn name(&self) -> &'static str {
        "atypical-animacy"
    }

    fn outcomes(&self) -> Result<Outcomes<'_, AnimacySentence>> {
        let mut reader = table::open(&self.file, b'\t', "animacy annotation table")?;
        let columns = ColumnIndex::from_reader(&mut reader, &COLUMNS, &self.file)?;

        Ok(ChunkedRows::new(reader, self.chunk_size).into_outcomes(
            ANNOTATIONS_FILE,
            move |row| {
                let unit = format!("sentence {:?}", columns.get(row, "SentenceId"));
                Outcome::from_result(unit, extract_sentence(&columns, row))
            },
        ))
    }
}
