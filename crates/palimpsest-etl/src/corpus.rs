use serde::Serialize;

use palimpsest_core::{Keyed, Result};

use crate::emit::{Emitter, Outcome};

/// Lazy stream of per-unit outcomes. An `Err` item is fatal for the run.
pub type Outcomes<'a, R> = Box<dyn Iterator<Item = Result<Outcome<R>>> + 'a>;

/// One corpus adapter.
///
/// `outcomes` performs the up-front checks (inputs present, auxiliary tables
/// loaded) and returns the lazy per-unit stream; nothing beyond what the
/// current unit needs is materialized until the caller pulls it.
pub trait Corpus {
    type Record: Keyed + Serialize;

    /// Short name used in logs and on the command line.
    fn name(&self) -> &'static str;

    fn outcomes(&self) -> Result<Outcomes<'_, Self::Record>>;

    /// Forward-only `(key, record)` stream over the whole corpus.
    fn emit(&self) -> Result<Emitter<'_, Self::Record>> {
        log::info!("Starting extraction of {}", self.name());
        Ok(Emitter::new(self.name(), self.outcomes()?))
    }
}
