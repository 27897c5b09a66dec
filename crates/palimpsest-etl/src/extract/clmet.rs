//! CLMET 3.1: html-like text files in three formats.
//!
//! `plain` files carry running text; `pos` and `class` files carry
//! `token_TAG` chunks resolved against the Penn Treebank tags or the
//! simplified Oxford word classes.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use roxmltree::Node;

use palimpsest_core::model::{ClmetHeader, ClmetTagged, ClmetText};
use palimpsest_core::vocab::TagVocabulary;
use palimpsest_core::Result;

use crate::corpus::{Corpus, Outcomes};
use crate::error::ExtractError;
use crate::extract::markup::{self, element_text, find, find_all, paragraphs_text, raw_text};
use crate::extract::tokens::parse_tagged;
use crate::extract::{per_unit, read_utf8, Extracted};
use crate::locate::Locator;

/// Which rendering of the corpus to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClmetFormat {
    Plain,
    Pos,
    Class,
}

impl ClmetFormat {
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Pos => "pos",
            Self::Class => "class",
        }
    }

    /// Name of the corpus adapter reading this rendering.
    #[must_use]
    pub const fn corpus_name(self) -> &'static str {
        match self {
            Self::Plain => "clmet",
            Self::Pos => "clmet-pos",
            Self::Class => "clmet-class",
        }
    }
}

impl fmt::Display for ClmetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for ClmetFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "pos" => Ok(Self::Pos),
            "class" => Ok(Self::Class),
            other => Err(format!(
                "unknown CLMET format {other:?} (expected plain, pos or class)"
            )),
        }
    }
}

/// Directory of one format below the extracted archive root.
fn format_dir(root: &std::path::Path, format: ClmetFormat) -> PathBuf {
    root.join("clmet")
        .join("corpus")
        .join("txt")
        .join(format.dir_name())
}

fn header(root: Node<'_, '_>) -> std::result::Result<ClmetHeader, ExtractError> {
    let required = |name: &'static str| {
        find(root, name)
            .map(element_text)
            .ok_or(ExtractError::MissingElement(name))
    };
    let optional = |name: &str| find(root, name).map(element_text).unwrap_or_default();

    Ok(ClmetHeader {
        id: required("id")?,
        period: required("period")?,
        genre: required("genre")?,
        subgenre: required("subgenre")?,
        decade: required("decade")?,
        quarter_cent: required("quartcent")?,
        title: required("title")?,
        notes: optional("notes"),
        comments: optional("comments"),
        author: required("author")?,
        year: required("year")?,
    })
}

fn body<'a, 'input>(root: Node<'a, 'input>) -> std::result::Result<Node<'a, 'input>, ExtractError> {
    find(root, "text").ok_or(ExtractError::MissingElement("text"))
}

/// Extract one `plain` file.
pub fn extract_plain(text: &str) -> std::result::Result<Extracted<ClmetText>, ExtractError> {
    let wrapped = markup::lenient(text);
    let doc = markup::parse(&wrapped)?;
    let root = doc.root_element();

    let header = header(root)?;
    let text = paragraphs_text(find_all(body(root)?, "p"));

    Ok((ClmetText { header, text }, Vec::new()))
}

/// Extract one `pos` or `class` file against `vocabulary`.
pub fn extract_tagged(
    text: &str,
    vocabulary: &TagVocabulary,
) -> std::result::Result<Extracted<ClmetTagged>, ExtractError> {
    let wrapped = markup::lenient(text);
    let doc = markup::parse(&wrapped)?;
    let root = doc.root_element();

    let header = header(root)?;
    let paragraphs: Vec<String> = find_all(body(root)?, "p").map(raw_text).collect();
    let tagged = parse_tagged(paragraphs.iter().map(String::as_str), vocabulary);
    let warnings = tagged.warnings();

    Ok((
        ClmetTagged {
            header,
            tokens: tagged.tokens,
            pos_tags: tagged.tags,
        },
        warnings,
    ))
}

/// The `plain` rendering.
#[derive(Debug, Clone)]
pub struct ClmetCorpus {
    root: PathBuf,
}

impl ClmetCorpus {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl Corpus for ClmetCorpus {
    type Record = ClmetText;

    fn name(&self) -> &'static str {
        ClmetFormat::Plain.corpus_name()
    }

    fn outcomes(&self) -> Result<Outcomes<'_, ClmetText>> {
        let units = Locator::new()
            .collection(
                ClmetFormat::Plain.dir_name(),
                format_dir(&self.root, ClmetFormat::Plain),
            )
            .units()?;
        Ok(per_unit(units, |unit| extract_plain(&read_utf8(unit)?)))
    }
}

/// The `pos` or `class` rendering.
#[derive(Debug, Clone)]
pub struct ClmetTaggedCorpus {
    root: PathBuf,
    format: ClmetFormat,
    vocabulary: TagVocabulary,
}

impl ClmetTaggedCorpus {
    /// Tokens tagged with Penn Treebank tags.
    #[must_use]
    pub fn pos(root: PathBuf) -> Self {
        Self {
            root,
            format: ClmetFormat::Pos,
            vocabulary: TagVocabulary::penn_treebank(),
        }
    }

    /// Tokens tagged with simplified Oxford word classes.
    #[must_use]
    pub fn class(root: PathBuf) -> Self {
        Self {
            root,
            format: ClmetFormat::Class,
            vocabulary: TagVocabulary::oxford_word_classes(),
        }
    }

    #[must_use]
    pub fn vocabulary(&self) -> &TagVocabulary {
        &self.vocabulary
    }
}

impl Corpus for ClmetTaggedCorpus {
    type Record = ClmetTagged;

    fn name(&self) -> &'static str {
        self.format.corpus_name()
    }

    fn outcomes(&self) -> Result<Outcomes<'_, ClmetTagged>> {
        log::info!(
            "{} tags are as follows: {:?}",
            self.vocabulary.name(),
            self.vocabulary.tags()
        );
        let units = Locator::new()
            .collection(self.format.dir_name(), format_dir(&self.root, self.format))
            .units()?;
        let vocabulary = &self.vocabulary;
        Ok(per_unit(units, move |unit| {
            extract_tagged(&read_utf8(unit)?, vocabulary)
        }))
    }
}
