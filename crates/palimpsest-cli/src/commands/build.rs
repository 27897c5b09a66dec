use anyhow::{Context, Result};
use palimpsest_etl::{
    write_corpus, AnimacyCorpus, ClmetCorpus, ClmetFormat, ClmetTaggedCorpus, Config,
    ContentiousCorpus, Corpus, EmitStats, HansardCorpus, LampeterCorpus, NewsbooksCorpus,
    OdeuropaCorpus, OldBaileyCorpus,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use super::CorpusName;

/// Extract `corpus` and write JSON lines to `output` or stdout.
pub fn run_build(
    corpus: CorpusName,
    data_dir: Option<PathBuf>,
    variant: ClmetFormat,
    output: Option<PathBuf>,
    chunk_size: Option<usize>,
) -> Result<()> {
    let config = Config::load()?;
    let root = data_dir.unwrap_or_else(|| config.corpus_dir(corpus.dir_name()));
    let chunk_size = chunk_size.filter(|n| *n > 0).unwrap_or(config.chunk_size);

    log::info!("Reading {:?} from {}", corpus, root.display());

    let writer: Box<dyn Write> = match &output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let stats = match corpus {
        CorpusName::Hansard => build(
            &HansardCorpus::new(root).with_chunk_size(chunk_size),
            writer,
        )?,
        CorpusName::AtypicalAnimacy => build(
            &AnimacyCorpus::new(root).with_chunk_size(chunk_size),
            writer,
        )?,
        CorpusName::Clmet => match variant {
            ClmetFormat::Plain => build(&ClmetCorpus::new(root), writer)?,
            ClmetFormat::Pos => build(&ClmetTaggedCorpus::pos(root), writer)?,
            ClmetFormat::Class => build(&ClmetTaggedCorpus::class(root), writer)?,
        },
        CorpusName::Lampeter => build(&LampeterCorpus::new(root), writer)?,
        CorpusName::Newsbooks => build(&NewsbooksCorpus::new(root), writer)?,
        CorpusName::OldBailey => build(&OldBaileyCorpus::new(root), writer)?,
        CorpusName::Contentious => build(
            &ContentiousCorpus::new(root).with_chunk_size(chunk_size),
            writer,
        )?,
        CorpusName::Odeuropa => build(&OdeuropaCorpus::new(root), writer)?,
    };

    if let Some(path) = output {
        eprintln!(
            "✓ Wrote {} records to {} ({} skipped, {} warnings)",
            stats.emitted,
            path.display(),
            stats.skipped,
            stats.warnings
        );
    }

    Ok(())
}

fn build<C: Corpus>(corpus: &C, writer: Box<dyn Write>) -> Result<EmitStats> {
    write_corpus(corpus, writer).with_context(|| format!("Extraction of {} failed", corpus.name()))
}
