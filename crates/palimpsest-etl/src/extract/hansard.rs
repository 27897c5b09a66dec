//! Hansard speeches (v3.1.0), joined with the posts each speaker held on
//! the day of the speech.

use std::path::PathBuf;

use csv::StringRecord;

use palimpsest_core::model::Speech;
use palimpsest_core::Result;

use crate::config::DEFAULT_CHUNK_SIZE;
use crate::corpus::{Corpus, Outcomes};
use crate::emit::Outcome;
use crate::error::ExtractError;
use crate::extract::Extracted;
use crate::join::PostingsTable;
use crate::table::{self, ChunkedRows, ColumnIndex};

pub const SPEECHES_FILE: &str = "hansard-speeches-v310.csv";
pub const POSTS_FILE: &str = "parliamentary_posts.json";

pub const SPEECH_COLUMNS: [&str; 19] = [
    "id",
    "speech",
    "display_as",
    "party",
    "constituency",
    "mnis_id",
    "date",
    "time",
    "colnum",
    "speech_class",
    "major_heading",
    "minor_heading",
    "oral_heading",
    "year",
    "hansard_membership_id",
    "speakerid",
    "person_id",
    "speakername",
    "url",
];

/// Extract one speech row and attach the speaker's posts.
pub fn extract_speech(
    columns: &ColumnIndex,
    row: &StringRecord,
    postings: &PostingsTable,
) -> std::result::Result<Extracted<Speech>, ExtractError> {
    let field = |name: &str| columns.get(row, name).to_string();

    let id = field("id");
    if id.trim().is_empty() {
        return Err(ExtractError::invalid("id", id));
    }

    let (posts, warning) = postings.join(columns.get(row, "mnis_id"), columns.get(row, "date"));

    let speech = Speech {
        id,
        speech: field("speech"),
        display_as: field("display_as"),
        party: field("party"),
        constituency: field("constituency"),
        mnis_id: field("mnis_id"),
        date: field("date"),
        time: field("time"),
        colnum: field("colnum"),
        speech_class: field("speech_class"),
        major_heading: field("major_heading"),
        minor_heading: field("minor_heading"),
        oral_heading: field("oral_heading"),
        year: field("year"),
        hansard_membership_id: field("hansard_membership_id"),
        speakerid: field("speakerid"),
        person_id: field("person_id"),
        speakername: field("speakername"),
        url: field("url"),
        parliamentary_posts: posts.parliamentary,
        government_posts: posts.government,
        opposition_posts: posts.opposition,
    };
    Ok((speech, warning.into_iter().collect()))
}

#[derive(Debug, Clone)]
pub struct HansardCorpus {
    speeches: PathBuf,
    posts: PathBuf,
    chunk_size: usize,
}

impl HansardCorpus {
    /// Both input files are expected directly in `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self {
            speeches: root.join(SPEECHES_FILE),
            posts: root.join(POSTS_FILE),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }
}

impl Corpus for HansardCorpus {
    type Record = Speech;

    fn name(&self) -> &'static str {
        "hansard"
    }

    fn outcomes(&self) -> Result<Outcomes<'_, Speech>> {
        let mut reader = table::open(&self.speeches, b',', "Hansard speeches table")?;
        let columns = ColumnIndex::from_reader(&mut reader, &SPEECH_COLUMNS, &self.speeches)?;
        let postings = PostingsTable::load(&self.posts)?;

        log::info!(
            "Streaming speeches in chunks of {} rows; this is a large dataset",
            self.chunk_size
        );

        Ok(ChunkedRows::new(reader, self.chunk_size).into_outcomes(
            SPEECHES_FILE,
            move |row| {
                let unit = format!("speech {:?}", columns.get(row, "id"));
                Outcome::from_result(unit, extract_speech(&columns, row, &postings))
            },
        ))
    }
}
