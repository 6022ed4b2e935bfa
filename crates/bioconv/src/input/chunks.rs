//! Chunked reading of large delimited files.
//!
//! A `ChunkReader` is a finite lazy sequence of row batches: each item is
//! a `DataTable` of at most `chunk_rows` rows carrying the same header.
//! After the source is fully consumed the iterator returns `None` forever,
//! so at most one chunk is ever held in memory.

use std::io::BufRead;
use std::path::Path;

use crate::error::{BioconvError, Result};

use super::parser::{count_delimiter_in_line, is_vcf_path, SourceStream};
use super::source::DataTable;

/// Delimiters tried when detecting from the header line.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Rows sampled when estimating per-row size.
const SAMPLE_ROWS: usize = 100;

/// Streaming reader that yields fixed-size row chunks.
pub struct ChunkReader {
    headers: Vec<String>,
    records: csv::StringRecordsIntoIter<SourceStream>,
    delimiter: u8,
    chunk_rows: usize,
    done: bool,
}

impl ChunkReader {
    /// Open a file for chunked reading. The header is consumed here;
    /// `.gz` sources stream through a gzip decoder and `.vcf` sources
    /// follow the VCF header convention.
    pub fn open(path: impl AsRef<Path>, chunk_rows: usize, delimiter: Option<u8>) -> Result<Self> {
        let path = path.as_ref();
        let vcf = is_vcf_path(path);
        let mut stream = SourceStream::open(path)?;

        let header_line = read_header_line(&mut stream, vcf, path)?;

        let delimiter = if vcf {
            b'\t'
        } else {
            delimiter.unwrap_or_else(|| detect_from_line(&header_line))
        };

        let headers = parse_header_fields(&header_line, delimiter)?;
        if headers.is_empty() {
            return Err(BioconvError::EmptyData("No columns found".to_string()));
        }

        let records = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(stream)
            .into_records();

        Ok(Self {
            headers,
            records,
            delimiter,
            chunk_rows: chunk_rows.max(1),
            done: false,
        })
    }

    /// Column headers shared by every chunk.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl Iterator for ChunkReader {
    type Item = Result<DataTable>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let expected_cols = self.headers.len();
        let mut rows = Vec::with_capacity(self.chunk_rows);

        while rows.len() < self.chunk_rows {
            match self.records.next() {
                Some(Ok(record)) => {
                    let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
                    while row.len() < expected_cols {
                        row.push(String::new());
                    }
                    row.truncate(expected_cols);
                    rows.push(row);
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
                None => {
                    self.done = true;
                    break;
                }
            }
        }

        if rows.is_empty() {
            return None;
        }
        Some(Ok(DataTable::new(
            self.headers.clone(),
            rows,
            self.delimiter,
        )))
    }
}

/// Read the header line, skipping `##` meta lines and stripping the
/// leading `#` for VCF sources.
fn read_header_line(stream: &mut SourceStream, vcf: bool, path: &Path) -> Result<String> {
    let mut line = String::new();
    loop {
        line.clear();
        let read = stream.read_line(&mut line).map_err(|e| BioconvError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        if read == 0 {
            return Err(BioconvError::EmptyData(format!(
                "No header line in '{}'",
                path.display()
            )));
        }

        if vcf && line.starts_with("##") {
            continue;
        }
        let trimmed = line.trim_end_matches(['\n', '\r']);
        if trimmed.is_empty() {
            continue;
        }

        let header = if vcf {
            trimmed.strip_prefix('#').unwrap_or(trimmed)
        } else {
            trimmed
        };
        return Ok(header.to_string());
    }
}

/// Pick the delimiter with the highest count in the header line.
fn detect_from_line(line: &str) -> u8 {
    let mut best = b'\t';
    let mut best_count = 0;
    for &delim in DELIMITERS {
        let count = count_delimiter_in_line(line, delim);
        if count > best_count {
            best = delim;
            best_count = count;
        }
    }
    best
}

/// Parse the already-consumed header line into fields, respecting quotes.
fn parse_header_fields(line: &str, delimiter: u8) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_reader(line.as_bytes());

    match reader.records().next() {
        Some(record) => Ok(record?.iter().map(|s| s.to_string()).collect()),
        None => Ok(Vec::new()),
    }
}

/// Suggest a chunk size for a file given a memory budget, estimating the
/// per-row byte size from a small sample. Returns `None` when the file
/// fits in the budget and chunking is unnecessary. Advisory only.
pub fn suggest_chunk_rows(path: impl AsRef<Path>, memory_budget_bytes: u64) -> Result<Option<usize>> {
    let path = path.as_ref();

    let size_bytes = std::fs::metadata(path)
        .map_err(|e| BioconvError::Io {
            path: path.to_path_buf(),
            source: e,
        })?
        .len();
    if size_bytes <= memory_budget_bytes {
        return Ok(None);
    }

    let mut reader = ChunkReader::open(path, SAMPLE_ROWS, None)?;
    let sample = match reader.next() {
        Some(chunk) => chunk?,
        None => return Ok(None),
    };

    let total_bytes: usize = sample
        .rows
        .iter()
        .map(|row| row.iter().map(String::len).sum::<usize>() + row.len())
        .sum();
    let per_row = (total_bytes / sample.row_count()).max(1);

    // Parsed rows cost a small multiple of their serialized size, so
    // target a quarter of the budget per chunk.
    let rows = ((memory_budget_bytes / 4) as usize / per_row).max(1);
    Ok(Some(rows))
}
