//! Old Bailey Proceedings: Ordinary's Accounts and Sessions Papers, one XML
//! file per publication.

use std::path::PathBuf;

use roxmltree::Node;

use palimpsest_core::model::{Proceeding, ProceedingKind};
use palimpsest_core::Result;

use crate::corpus::{Corpus, Outcomes};
use crate::error::ExtractError;
use crate::extract::markup::{self, children, fragments, joined_text, normalize_fragment, path};
use crate::extract::{per_unit, read_utf8, Extracted};
use crate::locate::Locator;

/// Sub-directory holding each kind of publication.
pub const fn collection_dir(kind: ProceedingKind) -> &'static str {
    match kind {
        ProceedingKind::OrdinarysAccount => "ordinarysAccounts",
        ProceedingKind::SessionsPaper => "sessionsPapers",
    }
}

const KINDS: [ProceedingKind; 2] = [
    ProceedingKind::OrdinarysAccount,
    ProceedingKind::SessionsPaper,
];

fn kind_of(collection: &str) -> ProceedingKind {
    if collection == ProceedingKind::OrdinarysAccount.code() {
        ProceedingKind::OrdinarysAccount
    } else {
        ProceedingKind::SessionsPaper
    }
}

/// Paragraphs carrying the text: `div0/p` in an Ordinary's Account,
/// `div0/div1/p` in a Sessions Paper.
fn content<'a, 'input>(div0: Node<'a, 'input>, kind: ProceedingKind) -> Vec<Node<'a, 'input>> {
    match kind {
        ProceedingKind::OrdinarysAccount => children(div0, "p").collect(),
        ProceedingKind::SessionsPaper => children(div0, "div1")
            .flat_map(|div1| children(div1, "p"))
            .collect(),
    }
}

pub fn extract_proceeding(
    text: &str,
    kind: ProceedingKind,
) -> std::result::Result<Extracted<Proceeding>, ExtractError> {
    let doc = markup::parse(text)?;
    let div0 = path(doc.root_element(), &["text", "body", "div0"])
        .ok_or(ExtractError::MissingElement("div0"))?;

    let id = div0.attribute("id").ok_or(ExtractError::MissingAttribute {
        element: "div0",
        attribute: "id",
    })?;
    let date = children(div0, "interp")
        .find(|interp| interp.attribute("type") == Some("date"))
        .ok_or(ExtractError::MissingElement("interp"))?
        .attribute("value")
        .ok_or(ExtractError::MissingAttribute {
            element: "interp",
            attribute: "value",
        })?;

    let mut places = Vec::new();
    let mut persons = Vec::new();
    let mut text_parts = Vec::new();
    for paragraph in content(div0, kind) {
        places.extend(
            children(paragraph, "placeName")
                .filter_map(|place| place.text())
                .map(normalize_fragment)
                .filter(|place| !place.is_empty()),
        );
        persons.extend(
            children(paragraph, "persName")
                .map(joined_text)
                .filter(|person| !person.is_empty()),
        );
        text_parts.extend(fragments(paragraph));
    }

    let proceeding = Proceeding {
        id: id.to_string(),
        date: date.to_string(),
        kind,
        places,
        persons,
        text: text_parts.join(" "),
    };
    Ok((proceeding, Vec::new()))
}

#[derive(Debug, Clone)]
pub struct OldBaileyCorpus {
    root: PathBuf,
}

impl OldBaileyCorpus {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl Corpus for OldBaileyCorpus {
    type Record = Proceeding;

    fn name(&self) -> &'static str {
        "old-bailey"
    }

    fn outcomes(&self) -> Result<Outcomes<'_, Proceeding>> {
        let locator = KINDS
            .iter()
            .fold(Locator::new().extension("xml"), |locator, kind| {
                locator.collection(kind.code(), self.root.join(collection_dir(*kind)))
            });
        Ok(per_unit(locator.units()?, |unit| {
            extract_proceeding(&read_utf8(unit)?, kind_of(&unit.collection))
        }))
    }
}
