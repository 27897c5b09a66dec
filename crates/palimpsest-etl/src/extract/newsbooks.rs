//! The Lancaster Newsbooks Corpus: two collections of Latin-1 encoded XML
//! issues.

use std::path::PathBuf;

use palimpsest_core::model::Newsbook;
use palimpsest_core::Result;

use crate::corpus::{Corpus, Outcomes};
use crate::error::ExtractError;
use crate::extract::markup::{self, element_text, find, find_all, paragraphs_text};
use crate::extract::{per_unit, read_latin1, Extracted};
use crate::locate::Locator;

pub const COLLECTIONS: [&str; 2] = ["1654_newsbooks", "mercurius_fumigosus"];

pub fn extract_newsbook(
    text: &str,
    collection: &str,
) -> std::result::Result<Extracted<Newsbook>, ExtractError> {
    let doc = markup::parse(text)?;
    let root = doc.root_element();

    let issue = find(root, "newsbookDoc").ok_or(ExtractError::MissingElement("newsbookDoc"))?;
    let id = issue
        .attribute("id")
        .ok_or(ExtractError::MissingAttribute {
            element: "newsbookDoc",
            attribute: "id",
        })?;
    let title = find(root, "title")
        .map(element_text)
        .ok_or(ExtractError::MissingElement("title"))?;

    let newsbook = Newsbook {
        id: id.to_string(),
        title,
        text: paragraphs_text(find_all(root, "p")),
        collection: collection.to_string(),
    };
    Ok((newsbook, Vec::new()))
}

#[derive(Debug, Clone)]
pub struct NewsbooksCorpus {
    root: PathBuf,
}

impl NewsbooksCorpus {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl Corpus for NewsbooksCorpus {
    type Record = Newsbook;

    fn name(&self) -> &'static str {
        "newsbooks"
    }

    fn outcomes(&self) -> Result<Outcomes<'_, Newsbook>> {
        let locator = COLLECTIONS
            .iter()
            .fold(Locator::new().extension("xml"), |locator, name| {
                locator.collection(*name, self.root.join(name))
            });
        Ok(per_unit(locator.units()?, |unit| {
            extract_newsbook(&read_latin1(unit)?, &unit.collection)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISSUE: &str = r#"<?xml version="1.0" encoding="ISO-8859-1"?>
<newsbookDoc id="MF001">
  <header><title>Mercurius
  Fumigosus</title></header>
  <body>
    <p>Strange newes from <hi>Smithfield</hi>.</p>
    <p>  More newes.  </p>
  </body>
</newsbookDoc>"#;

    #[test]
    fn test_extract_newsbook() {
        let (newsbook, warnings) = extract_newsbook(ISSUE, "mercurius_fumigosus").unwrap();

        assert!(warnings.is_empty());
        assert_eq!(newsbook.id, "MF001");
        assert_eq!(newsbook.title, "Mercurius  Fumigosus");
        assert_eq!(newsbook.text, "Strange newes from Smithfield. More newes.");
        assert_eq!(newsbook.collection, "mercurius_fumigosus");
    }

    #[test]
    fn test_inline_markup_inside_a_word() {
        let issue = "<newsbookDoc id=\"N7\"><title>The <hi>Perfect</hi> Diurnall</title>\
            <p>from Lon<hi>don</hi>, the <hi>S</hi>pring</p></newsbookDoc>";
        let (newsbook, _) = extract_newsbook(issue, "1654_newsbooks").unwrap();
        assert_eq!(newsbook.title, "The Perfect Diurnall");
        assert_eq!(newsbook.text, "from London, the Spring");
    }

    #[test]
    fn test_missing_id() {
        let err = extract_newsbook("<newsbookDoc><title>t</title></newsbookDoc>", "c").unwrap_err();
        assert!(matches!(
            err,
            ExtractError::MissingAttribute {
                element: "newsbookDoc",
                ..
            }
        ));
    }
}
