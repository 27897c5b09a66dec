//! The Lampeter Corpus of Early Modern English tracts: one XML file that
//! holds every tract as its own `TEI` document.

use std::fmt;
use std::fs;
use std::ops::Range;
use std::path::PathBuf;

use chrono::NaiveDate;
use roxmltree::Node;

use palimpsest_core::model::LampeterTract;
use palimpsest_core::vocab::CategoryMap;
use palimpsest_core::{Error, Result};

use crate::corpus::{Corpus, Outcomes};
use crate::emit::Outcome;
use crate::error::ExtractError;
use crate::extract::markup::{self, element_text, find, find_all, is_element, paragraphs_text, path};
use crate::extract::Extracted;
use crate::locate::Locator;

pub const CORPUS_FILE: &str = "3193.xml";

/// Extract one `TEI` document.
///
/// The title element reads `<id>: <title>`. The genre comes from the first
/// letter of the id and the year from its last four characters.
pub fn extract_tract(
    tei: Node<'_, '_>,
    genres: &CategoryMap,
) -> std::result::Result<Extracted<LampeterTract>, ExtractError> {
    let title_node = path(tei, &["teiHeader", "fileDesc", "titleStmt", "title"])
        .ok_or(ExtractError::MissingElement("title"))?;
    let title_with_id = element_text(title_node);
    let (id, title) = title_with_id
        .split_once(':')
        .ok_or_else(|| ExtractError::invalid("title", title_with_id.as_str()))?;
    let (id, title) = (id.trim(), title.trim());

    let code: String = id.chars().take(1).collect();
    let genre = genres
        .get(&code)
        .ok_or_else(|| ExtractError::CategoryMapping {
            code,
            vocabulary: genres.name(),
        })?;

    let date = year_of(id)
        .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
        .ok_or_else(|| ExtractError::invalid("year", id))?;

    let body = find(tei, "text")
        .and_then(|text| find(text, "body"))
        .ok_or(ExtractError::MissingElement("body"))?;
    let head = find(body, "head").map(element_text).unwrap_or_default();
    let text = paragraphs_text(find_all(body, "p"));

    let tract = LampeterTract {
        id: id.to_string(),
        text,
        date,
        genre: genre.to_string(),
        head,
        title: title.to_string(),
    };
    Ok((tract, Vec::new()))
}

fn year_of(id: &str) -> Option<i32> {
    let count = id.chars().count();
    if count < 4 {
        return None;
    }
    let year: String = id.chars().skip(count - 4).collect();
    year.parse().ok()
}

#[derive(Debug, Clone)]
pub struct LampeterCorpus {
    file: PathBuf,
    genres: CategoryMap,
}

impl LampeterCorpus {
    /// Read [`CORPUS_FILE`] from `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self::from_file(root.join(CORPUS_FILE))
    }

    #[must_use]
    pub fn from_file(file: PathBuf) -> Self {
        Self {
            file,
            genres: CategoryMap::lampeter_genres(),
        }
    }
}

impl Corpus for LampeterCorpus {
    type Record = LampeterTract;

    fn name(&self) -> &'static str {
        "lampeter"
    }

    /// The file is checked up front: one that does not parse, or holds no
    /// `TEI` document, ends the run. Tracts are then extracted one per pull.
    fn outcomes(&self) -> Result<Outcomes<'_, LampeterTract>> {
        let unit = Locator::single_file("Lampeter corpus file", &self.file)?;
        let tracts = TractStream::open(&unit.path, unit.file_name(), &self.genres)?;
        log::debug!("Found {} TEI documents in {}", tracts.remaining(), unit.file_name());
        Ok(Box::new(tracts))
    }
}

/// Parse one `TEI` document standing on its own.
fn extract_document(
    source: &str,
    genres: &CategoryMap,
) -> std::result::Result<Extracted<LampeterTract>, ExtractError> {
    let doc = markup::parse(source)?;
    extract_tract(doc.root_element(), genres)
}

/// Lazily extracted tracts of one corpus file.
///
/// Holds the file text and the byte range of every top-level `TEI`
/// element. Each pull re-parses a single range behind the file's prolog, so
/// DTD entities still resolve, and extracts that tract only.
pub struct TractStream<'g> {
    source: String,
    prolog_end: usize,
    documents: std::vec::IntoIter<Range<usize>>,
    position: usize,
    file_name: String,
    genres: &'g CategoryMap,
}

impl<'g> TractStream<'g> {
    pub fn open(path: &std::path::Path, file_name: String, genres: &'g CategoryMap) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_text(&text, path, file_name, genres)
    }

    fn from_text(
        text: &str,
        path: &std::path::Path,
        file_name: String,
        genres: &'g CategoryMap,
    ) -> Result<Self> {
        let source = markup::strip_declaration(text).to_string();
        let (prolog_end, documents) = {
            let doc = markup::parse(&source).map_err(|e| Error::Markup {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
            let root = doc.root_element();
            let documents: Vec<Range<usize>> = find_all(root, "TEI")
                .filter(|tei| !tei.ancestors().skip(1).any(|node| is_element(node, "TEI")))
                .map(|tei| tei.range())
                .collect();
            (root.range().start, documents)
        };

        if documents.is_empty() {
            return Err(Error::MissingRoot {
                element: "TEI",
                path: path.to_path_buf(),
            });
        }

        Ok(Self {
            source,
            prolog_end,
            documents: documents.into_iter(),
            position: 0,
            file_name,
            genres,
        })
    }

    /// Documents not yet extracted.
    pub fn remaining(&self) -> usize {
        self.documents.len()
    }
}

impl Iterator for TractStream<'_> {
    type Item = Result<Outcome<LampeterTract>>;

    fn next(&mut self) -> Option<Self::Item> {
        let range = self.documents.next()?;
        self.position += 1;

        let mut document = String::with_capacity(self.prolog_end + range.len());
        document.push_str(&self.source[..self.prolog_end]);
        document.push_str(&self.source[range]);

        Some(Ok(Outcome::from_result(
            format!("TEI document {} of {}", self.position, self.file_name),
            extract_document(&document, self.genres),
        )))
    }
}

impl fmt::Debug for TractStream<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TractStream")
            .field("file_name", &self.file_name)
            .field("position", &self.position)
            .field("remaining", &self.documents.len())
            .finish_non_exhaustive()
    }
}
