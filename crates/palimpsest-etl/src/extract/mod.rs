//! Record Extractors, one module per corpus, plus the shared markup and
//! token helpers.

pub mod animacy;
pub mod clmet;
pub mod contentious;
pub mod hansard;
pub mod lampeter;
pub mod markup;
pub mod newsbooks;
pub mod odeuropa;
pub mod old_bailey;
pub mod tokens;

use std::fs;

pub use animacy::AnimacyCorpus;
pub use clmet::{ClmetCorpus, ClmetFormat, ClmetTaggedCorpus};
pub use contentious::ContentiousCorpus;
pub use hansard::HansardCorpus;
pub use lampeter::LampeterCorpus;
pub use newsbooks::NewsbooksCorpus;
pub use odeuropa::OdeuropaCorpus;
pub use old_bailey::OldBaileyCorpus;

use crate::corpus::Outcomes;
use crate::emit::Outcome;
use crate::error::{ExtractError, Warning};
use crate::locate::SourceUnit;

/// What a per-unit extractor returns on success.
pub type Extracted<R> = (R, Vec<Warning>);

/// Read a unit as UTF-8. The file is closed before this returns.
pub(crate) fn read_utf8(unit: &SourceUnit) -> Result<String, ExtractError> {
    Ok(fs::read_to_string(&unit.path)?)
}

/// Read a Latin-1 encoded unit. Every byte maps to the code point of the
/// same value.
pub(crate) fn read_latin1(unit: &SourceUnit) -> Result<String, ExtractError> {
    let bytes = fs::read(&unit.path)?;
    Ok(bytes.iter().copied().map(char::from).collect())
}

/// One outcome per file, extracted only when the caller pulls it.
pub(crate) fn per_unit<'a, R, I, F>(units: I, extract: F) -> Outcomes<'a, R>
where
    R: 'a,
    I: Iterator<Item = SourceUnit> + 'a,
    F: Fn(&SourceUnit) -> Result<Extracted<R>, ExtractError> + 'a,
{
    Box::new(units.map(move |unit| {
        log::debug!("Extracting {}", unit);
        Ok(Outcome::from_result(unit.file_name(), extract(&unit)))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_read_latin1() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("issue.xml");
        fs::write(&path, [b'c', b'a', b'f', 0xe9]).unwrap();

        let unit = SourceUnit::new(path, "1654_newsbooks");
        assert_eq!(read_latin1(&unit).unwrap(), "caf\u{e9}");
        assert!(read_utf8(&unit).is_err());
    }

    #[test]
    fn test_per_unit_turns_failures_into_skips() {
        let units = vec![
            SourceUnit::new(PathBuf::from("good.xml"), "c"),
            SourceUnit::new(PathBuf::from("bad.xml"), "c"),
        ];
        let outcomes: Vec<Outcome<String>> = per_unit(units.into_iter(), |unit| {
            if unit.file_name() == "good.xml" {
                Ok((unit.file_name(), Vec::new()))
            } else {
                Err(ExtractError::MissingElement("p"))
            }
        })
        .map(|outcome| outcome.unwrap())
        .collect();

        assert!(!outcomes[0].is_skipped());
        assert!(outcomes[1].is_skipped());
    }
}
