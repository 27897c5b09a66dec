pub mod build;
pub mod config;
pub mod corpora;

pub use build::run_build;
pub use corpora::{list_corpora, CorpusName};
