//! Corpus extraction pipeline for palimpsest.
//!
//! Every corpus adapter follows the same shape: a [`Locator`] enumerates the
//! source units, an extractor turns each unit into an [`Outcome`], and the
//! [`Emitter`] hands `(key, record)` pairs to the caller one at a time.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod corpus;
pub mod emit;
pub mod error;
pub mod extract;
pub mod join;
pub mod locate;
pub mod sink;
pub mod table;

pub use config::Config;
pub use corpus::{Corpus, Outcomes};
pub use emit::{EmitStats, Emitter, Outcome};
pub use error::{ExtractError, Warning};
pub use extract::{
    AnimacyCorpus, ClmetCorpus, ClmetFormat, ClmetTaggedCorpus, ContentiousCorpus, HansardCorpus,
    LampeterCorpus, NewsbooksCorpus, OdeuropaCorpus, OldBaileyCorpus,
};
pub use join::{JoinKey, Postings, PostingsTable};
pub use locate::{Locator, SourceUnit};
pub use sink::{write_corpus, JsonLinesSink};
