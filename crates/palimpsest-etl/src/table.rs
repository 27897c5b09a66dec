//! Delimited-table access: a column contract checked once per table and a
//! row stream that reads in bounded chunks.

use std::collections::{HashMap, VecDeque};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use palimpsest_core::{Error, Result};

use crate::corpus::Outcomes;
use crate::emit::Outcome;
use crate::error::ExtractError;

/// Open a delimited table with a header row.
///
/// Rows may be shorter or longer than the header; missing cells read as
/// empty strings.
pub fn open(path: &Path, delimiter: u8, entity: &'static str) -> Result<csv::Reader<File>> {
    if !path.is_file() {
        return Err(Error::not_found(entity, path));
    }
    let reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)?;
    Ok(reader)
}

/// Column name → position, validated against the required columns when the
/// table is opened rather than on every row.
#[derive(Debug, Clone)]
pub struct ColumnIndex {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    pub fn resolve(headers: &StringRecord, required: &[&str], path: &Path) -> Result<Self> {
        let names: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();
        let mut positions = HashMap::with_capacity(names.len());
        for (idx, name) in names.iter().enumerate() {
            positions.entry(name.clone()).or_insert(idx);
        }

        let missing: Vec<String> = required
            .iter()
            .filter(|column| !positions.contains_key(**column))
            .map(|column| (*column).to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingColumns {
                columns: missing,
                path: path.to_path_buf(),
            });
        }

        Ok(Self { names, positions })
    }

    /// Read the header row of `reader` and resolve it.
    pub fn from_reader<R: Read>(
        reader: &mut csv::Reader<R>,
        required: &[&str],
        path: &Path,
    ) -> Result<Self> {
        let headers = reader.headers()?.clone();
        Self::resolve(&headers, required, path)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.positions.contains_key(column)
    }

    /// Header names in file order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Cell of `column` in `row`, or `""` when the row is short or the
    /// column does not exist.
    pub fn get<'r>(&self, row: &'r StringRecord, column: &str) -> &'r str {
        self.positions
            .get(column)
            .and_then(|&idx| row.get(idx))
            .unwrap_or("")
    }
}

/// Streams rows, reading at most `chunk_size` of them ahead.
///
/// Items carry the 1-based data row number.
pub struct ChunkedRows<R> {
    reader: csv::Reader<R>,
    chunk_size: usize,
    buffer: VecDeque<(u64, csv::Result<StringRecord>)>,
    exhausted: bool,
    rows_read: u64,
    chunks_read: usize,
}

impl<R: Read> ChunkedRows<R> {
    pub fn new(reader: csv::Reader<R>, chunk_size: usize) -> Self {
        Self {
            reader,
            chunk_size: chunk_size.max(1),
            buffer: VecDeque::new(),
            exhausted: false,
            rows_read: 0,
            chunks_read: 0,
        }
    }

    fn fill(&mut self) {
        for _ in 0..self.chunk_size {
            let mut record = StringRecord::new();
            match self.reader.read_record(&mut record) {
                Ok(true) => {
                    self.rows_read += 1;
                    self.buffer.push_back((self.rows_read, Ok(record)));
                }
                Ok(false) => {
                    self.exhausted = true;
                    break;
                }
                Err(e) => {
                    self.rows_read += 1;
                    let stop = e.is_io_error();
                    self.buffer.push_back((self.rows_read, Err(e)));
                    if stop {
                        self.exhausted = true;
                        break;
                    }
                }
            }
        }
        self.chunks_read += 1;
        log::debug!(
            "Read chunk {} ({} rows so far)",
            self.chunks_read,
            self.rows_read
        );
    }

    /// Turn the row stream into per-row outcomes.
    ///
    /// I/O failures end the run; any other row error skips that row.
    pub fn into_outcomes<'a, T, F>(self, table: &'static str, mut extract: F) -> Outcomes<'a, T>
    where
        R: 'a,
        T: 'a,
        F: FnMut(&StringRecord) -> Outcome<T> + 'a,
    {
        Box::new(self.map(move |(number, row)| match row {
            Ok(record) => Ok(extract(&record)),
            Err(e) if e.is_io_error() => Err(Error::Table(e)),
            Err(e) => Ok(Outcome::skipped(
                format!("row {number} of {table}"),
                ExtractError::Table(e),
            )),
        }))
    }
}

impl<R: Read> Iterator for ChunkedRows<R> {
    type Item = (u64, csv::Result<StringRecord>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.buffer.is_empty() && !self.exhausted {
            self.fill();
        }
        self.buffer.pop_front()
    }
}

impl<R> std::fmt::Debug for ChunkedRows<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkedRows")
            .field("chunk_size", &self.chunk_size)
            .field("buffered", &self.buffer.len())
            .field("rows_read", &self.rows_read)
            .field("exhausted", &self.exhausted)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(data: &'static str) -> csv::Reader<&'static [u8]> {
        ReaderBuilder::new()
            .flexible(true)
            .from_reader(data.as_bytes())
    }

    #[test]
    fn test_missing_required_columns() {
        let mut rdr = reader("id,speech\n1,hello\n");
        let result = ColumnIndex::from_reader(&mut rdr, &["id", "mnis_id"], Path::new("t.csv"));
        match result {
            Err(Error::MissingColumns { columns, .. }) => assert_eq!(columns, vec!["mnis_id"]),
            other => panic!("expected missing columns, got {other:?}"),
        }
    }

    #[test]
    fn test_short_rows_read_as_empty() {
        let mut rdr = reader("id,speech,party\n1,hello\n");
        let index = ColumnIndex::from_reader(&mut rdr, &["id", "party"], Path::new("t.csv")).unwrap();
        let row = rdr.records().next().unwrap().unwrap();
        assert_eq!(index.get(&row, "speech"), "hello");
        assert_eq!(index.get(&row, "party"), "");
        assert_eq!(index.get(&row, "no_such_column"), "");
    }

    #[test]
    fn test_chunked_rows_yield_every_row_in_order() {
        let rdr = reader("n\n1\n2\n3\n4\n5\n");
        let rows: Vec<String> = ChunkedRows::new(rdr, 2)
            .map(|(_, row)| row.unwrap()[0].to_string())
            .collect();
        assert_eq!(rows, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_chunked_rows_number_rows() {
        let rdr = reader("n\na\nb\n");
        let numbers: Vec<u64> = ChunkedRows::new(rdr, 10).map(|(n, _)| n).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn test_chunked_rows_reads_lazily() {
        let rdr = reader("n\n1\n2\n3\n4\n");
        let mut rows = ChunkedRows::new(rdr, 2);
        assert!(rows.next().is_some());
        assert_eq!(rows.rows_read, 2);
        assert!(rows.next().is_some());
        assert!(rows.next().is_some());
        assert_eq!(rows.rows_read, 4);
    }
}
