//! JSON-lines output: one `{"key": ..., "record": {...}}` object per line.

use std::io::Write;

use serde::Serialize;

use palimpsest_core::{RecordKey, Result};

use crate::corpus::Corpus;
use crate::emit::EmitStats;

#[derive(Serialize)]
struct Line<'r, R> {
    key: &'r RecordKey,
    record: &'r R,
}

/// Writes keyed records to any [`Write`] target.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    pub fn write<R: Serialize>(&mut self, key: &RecordKey, record: &R) -> Result<()> {
        serde_json::to_writer(&mut self.writer, &Line { key, record })?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Drain a corpus into `writer`. Stops at the first fatal error.
pub fn write_corpus<C: Corpus, W: Write>(corpus: &C, writer: W) -> Result<EmitStats> {
    let mut emitter = corpus.emit()?;
    let mut sink = JsonLinesSink::new(writer);

    for item in emitter.by_ref() {
        let (key, record) = item?;
        sink.write(&key, &record)?;
    }

    sink.finish()?;
    Ok(emitter.stats())
}

#[cfg(test)]
mod tests {
    use super::*;
    use palimpsest_core::model::Newsbook;

    #[test]
    fn test_lines_carry_key_and_record() {
        let mut sink = JsonLinesSink::new(Vec::new());
        let newsbook = Newsbook {
            id: "MF001".to_string(),
            title: "Mercurius Fumigosus".to_string(),
            text: "Strange newes".to_string(),
            collection: "mercurius_fumigosus".to_string(),
        };
        sink.write(&RecordKey::new("MF001"), &newsbook).unwrap();
        sink.write(&RecordKey::from(2_u64), &newsbook).unwrap();
        assert_eq!(sink.written(), 2);

        let output = String::from_utf8(sink.finish().unwrap()).unwrap();
        let lines: Vec<serde_json::Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["key"], "MF001");
        assert_eq!(lines[0]["record"]["collection"], "mercurius_fumigosus");
        assert_eq!(lines[1]["key"], "2");
    }
}
