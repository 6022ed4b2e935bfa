//! Delimited-text parser with delimiter detection, gzip decoding, and
//! VCF header handling.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use sha2::{Digest, Sha256};

use crate::error::{BioconvError, Result};

use super::source::{DataTable, SourceMetadata};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Gzip magic bytes.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Parses tabular data files.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the data table and metadata.
    ///
    /// `.gz` sources (by suffix or magic bytes) are decompressed
    /// transparently; `.vcf` sources are treated as tab-delimited text
    /// after dropping `##` meta lines and the `#` on the `#CHROM` header.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();

        let raw = std::fs::read(path).map_err(|e| BioconvError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let size_bytes = raw.len() as u64;

        // Hash the file as stored, before decompression.
        let mut hasher = Sha256::new();
        hasher.update(&raw);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let gzipped = raw.starts_with(&GZIP_MAGIC);
        let contents = if gzipped {
            let mut decoded = Vec::new();
            GzDecoder::new(raw.as_slice())
                .read_to_end(&mut decoded)
                .map_err(|e| BioconvError::Io {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            decoded
        } else {
            raw
        };

        let vcf = is_vcf_path(path);
        let contents = if vcf {
            strip_vcf_preamble(&contents)
        } else {
            contents
        };

        let delimiter = if vcf {
            b'\t'
        } else {
            match self.config.delimiter {
                Some(d) => d,
                None => detect_delimiter(&contents)?,
            }
        };

        let data_table = self.parse_bytes(&contents, delimiter)?;

        let format = format_name(vcf, delimiter, gzipped);
        let source_metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format,
            data_table.row_count(),
            data_table.column_count(),
        );

        Ok((data_table, source_metadata))
    }

    /// Parse bytes directly.
    pub(crate) fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<DataTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = if self.config.has_header {
            reader.headers()?.iter().map(|s| s.to_string()).collect()
        } else {
            Vec::new()
        };

        let mut rows = Vec::new();
        let mut expected_cols = headers.len();

        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }

            let record = result?;
            let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();

            if expected_cols == 0 {
                expected_cols = row.len();
            }
            // Ragged rows are padded or truncated to the header width.
            while row.len() < expected_cols {
                row.push(String::new());
            }
            row.truncate(expected_cols);

            rows.push(row);
        }

        let headers = if self.config.has_header {
            headers
        } else {
            (0..expected_cols).map(|i| format!("column_{}", i + 1)).collect()
        };

        if headers.is_empty() {
            return Err(BioconvError::EmptyData("No columns found".to_string()));
        }
        if rows.is_empty() {
            return Err(BioconvError::EmptyData("No data rows found".to_string()));
        }

        Ok(DataTable::new(headers, rows, delimiter))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the path names a VCF-convention file (`.vcf` or `.vcf.gz`).
pub(crate) fn is_vcf_path(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    name.ends_with(".vcf") || name.ends_with(".vcf.gz")
}

/// Whether the path names a gzip-compressed file by suffix.
pub(crate) fn is_gzip_path(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
}

/// Drop `##` meta lines and strip the leading `#` of the `#CHROM` header
/// line, leaving plain tab-delimited text.
fn strip_vcf_preamble(contents: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(contents.len());
    for line in contents.split(|&b| b == b'\n') {
        if line.starts_with(b"##") {
            continue;
        }
        if let Some(rest) = line.strip_prefix(b"#") {
            out.extend_from_slice(rest);
        } else {
            out.extend_from_slice(line);
        }
        out.push(b'\n');
    }
    out
}

fn format_name(vcf: bool, delimiter: u8, gzipped: bool) -> String {
    let base = if vcf {
        "vcf"
    } else {
        match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
    };
    if gzipped {
        format!("{}.gz", base)
    } else {
        base.to_string()
    }
}

/// Detect the delimiter by analyzing the first few lines.
pub(crate) fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(BioconvError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        // Consistent count across lines beats raw frequency; tab gets a
        // slight bonus since it rarely appears inside actual data.
        let consistent = counts.iter().all(|&c| c == first_count);
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
pub(crate) fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

/// Byte stream over a possibly gzip-compressed source file.
///
/// An enum rather than a trait object so the chunk reader can hand the
/// stream to `csv::Reader` by value.
pub(crate) enum SourceStream {
    Plain(BufReader<File>),
    Gzip(BufReader<GzDecoder<BufReader<File>>>),
}

impl SourceStream {
    /// Open a file, routing through a gzip decoder when the suffix says so.
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| BioconvError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        if is_gzip_path(path) {
            Ok(SourceStream::Gzip(BufReader::new(GzDecoder::new(
                BufReader::new(file),
            ))))
        } else {
            Ok(SourceStream::Plain(BufReader::new(file)))
        }
    }
}

impl Read for SourceStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            SourceStream::Plain(r) => r.read(buf),
            SourceStream::Gzip(r) => r.read(buf),
        }
    }
}

impl BufRead for SourceStream {
    fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
        match self {
            SourceStream::Plain(r) => r.fill_buf(),
            SourceStream::Gzip(r) => r.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            SourceStream::Plain(r) => r.consume(amt),
            SourceStream::Gzip(r) => r.consume(amt),
        }
    }
}
