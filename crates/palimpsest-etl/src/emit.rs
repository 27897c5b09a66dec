//! The Emitter: the caller-facing end of every corpus pipeline.
//!
//! It pulls one outcome at a time, reports skips and warnings, and yields
//! keyed records. A single pass only; there is no way to rewind.

use std::fmt;

use palimpsest_core::{Keyed, RecordKey, Result};

use crate::corpus::Outcomes;
use crate::error::{ExtractError, Warning};

/// What extraction of one unit produced.
#[derive(Debug)]
pub enum Outcome<R> {
    /// A complete record, possibly with degraded fields.
    Extracted { record: R, warnings: Vec<Warning> },
    /// The unit yielded nothing; `unit` identifies it in logs.
    Skipped { unit: String, reason: ExtractError },
}

impl<R> Outcome<R> {
    pub fn extracted(record: R) -> Self {
        Self::Extracted {
            record,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(record: R, warnings: Vec<Warning>) -> Self {
        Self::Extracted { record, warnings }
    }

    pub fn skipped(unit: impl Into<String>, reason: ExtractError) -> Self {
        Self::Skipped {
            unit: unit.into(),
            reason,
        }
    }

    /// Fold a per-unit result into an outcome.
    pub fn from_result(
        unit: impl Into<String>,
        result: std::result::Result<(R, Vec<Warning>), ExtractError>,
    ) -> Self {
        match result {
            Ok((record, warnings)) => Self::with_warnings(record, warnings),
            Err(reason) => Self::skipped(unit, reason),
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

/// Counters kept while emitting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitStats {
    pub emitted: usize,
    pub skipped: usize,
    pub warnings: usize,
}

/// Iterator of `(key, record)` pairs over one corpus.
///
/// Yields a fatal error at most once and is fused afterwards.
pub struct Emitter<'a, R> {
    corpus: &'static str,
    outcomes: Outcomes<'a, R>,
    stats: EmitStats,
    finished: bool,
}

impl<'a, R: Keyed> Emitter<'a, R> {
    pub fn new(corpus: &'static str, outcomes: Outcomes<'a, R>) -> Self {
        Self {
            corpus,
            outcomes,
            stats: EmitStats::default(),
            finished: false,
        }
    }

    pub fn stats(&self) -> EmitStats {
        self.stats
    }

    pub fn corpus(&self) -> &'static str {
        self.corpus
    }
}

impl<R: Keyed> Iterator for Emitter<'_, R> {
    type Item = Result<(RecordKey, R)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            match self.outcomes.next() {
                None => {
                    self.finished = true;
                    log::info!(
                        "Extraction of {} complete: {} records, {} skipped, {} warnings",
                        self.corpus,
                        self.stats.emitted,
                        self.stats.skipped,
                        self.stats.warnings
                    );
                    return None;
                }
                Some(Err(e)) => {
                    self.finished = true;
                    log::error!("Extraction of {} aborted: {}", self.corpus, e);
                    return Some(Err(e));
                }
                Some(Ok(Outcome::Skipped { unit, reason })) => {
                    self.stats.skipped += 1;
                    log::warn!("[{}] {} could not be parsed: {}", self.corpus, unit, reason);
                }
                Some(Ok(Outcome::Extracted { record, warnings })) => {
                    let key = record.key();
                    for warning in &warnings {
                        log::warn!("[{}] {}: {}", self.corpus, key, warning);
                    }
                    self.stats.warnings += warnings.len();
                    self.stats.emitted += 1;
                    return Some(Ok((key, record)));
                }
            }
        }
    }
}

impl<R> fmt::Debug for Emitter<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("corpus", &self.corpus)
            .field("stats", &self.stats)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}
