//! Writers for standardized tables.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{BioconvError, Result};
use crate::input::DataTable;

/// Destination the conversion engine streams rows into.
///
/// This is the seam for external I/O adapters: anything that can accept a
/// header once and rows in order can receive a conversion.
pub trait TableSink {
    /// Write the column header. Called exactly once, before any row.
    fn write_header(&mut self, headers: &[String]) -> Result<()>;

    /// Append one data row.
    fn write_row(&mut self, row: &[String]) -> Result<()>;

    /// Flush buffered output. Called once, after the last row.
    fn finish(&mut self) -> Result<()>;
}

/// Output format for written tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Tab-separated text (default).
    #[default]
    Tsv,
    /// Comma-separated text.
    Csv,
    /// Columnar binary with snappy block compression.
    #[cfg(feature = "parquet")]
    Parquet,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Tsv => "tsv",
            OutputFormat::Csv => "csv",
            #[cfg(feature = "parquet")]
            OutputFormat::Parquet => "parquet",
        }
    }
}

/// Compression applied to delimited output. Parquet output carries its own
/// block compression and ignores this knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compression {
    #[default]
    None,
    Gzip,
}

/// Options for writing standardized tables.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WriteOptions {
    pub format: OutputFormat,
    pub compression: Compression,
}

/// Writes delimited text, optionally gzip-compressed.
pub struct DelimitedWriter {
    writer: csv::Writer<Box<dyn Write>>,
    path: PathBuf,
}

impl DelimitedWriter {
    /// Create a writer at `path`. Output is gzip-compressed when the path
    /// ends in `.gz`.
    pub fn create(path: impl AsRef<Path>, delimiter: u8) -> Result<Self> {
        let path = path.as_ref();
        let gzip = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("gz"))
            .unwrap_or(false);
        Self::create_with(path, delimiter, gzip)
    }

    /// Create a writer with an explicit gzip choice.
    pub fn create_with(path: impl AsRef<Path>, delimiter: u8, gzip: bool) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| BioconvError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let sink: Box<dyn Write> = if gzip {
            Box::new(GzEncoder::new(file, flate2::Compression::default()))
        } else {
            Box::new(file)
        };

        Ok(Self {
            writer: csv::WriterBuilder::new()
                .delimiter(delimiter)
                .from_writer(sink),
            path: path.to_path_buf(),
        })
    }
}

impl TableSink for DelimitedWriter {
    fn write_header(&mut self, headers: &[String]) -> Result<()> {
        self.writer.write_record(headers)?;
        Ok(())
    }

    fn write_row(&mut self, row: &[String]) -> Result<()> {
        self.writer.write_record(row)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| BioconvError::Io {
            path: self.path.clone(),
            source: e,
        })
    }
}

/// In-memory sink, for buffering small results and for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TableSink for MemorySink {
    fn write_header(&mut self, headers: &[String]) -> Result<()> {
        self.headers = Some(headers.to_vec());
        Ok(())
    }

    fn write_row(&mut self, row: &[String]) -> Result<()> {
        self.rows.push(row.to_vec());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Write a whole table to `path` in one shot.
pub fn write_table(table: &DataTable, path: impl AsRef<Path>, options: &WriteOptions) -> Result<()> {
    let path = path.as_ref();

    #[cfg(feature = "parquet")]
    if options.format == OutputFormat::Parquet {
        return super::parquet::write_parquet(table, path);
    }

    let delimiter = match options.format {
        OutputFormat::Tsv => b'\t',
        OutputFormat::Csv => b',',
        #[cfg(feature = "parquet")]
        OutputFormat::Parquet => unreachable!("handled above"),
    };
    let gzip = options.compression == Compression::Gzip
        || path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("gz"))
            .unwrap_or(false);

    let mut writer = DelimitedWriter::create_with(path, delimiter, gzip)?;
    writer.write_header(&table.headers)?;
    for row in &table.rows {
        writer.write_row(row)?;
    }
    writer.finish()
}

/// Write each converted table under `dir` as `<prefix>_<stem>.<ext>`,
/// where the stem is the source file name with its tabular extensions
/// stripped. Returns the written paths in input order.
pub fn save_results(
    results: &IndexMap<String, DataTable>,
    dir: impl AsRef<Path>,
    prefix: &str,
    options: &WriteOptions,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir).map_err(|e| BioconvError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut written = Vec::with_capacity(results.len());
    for (source, table) in results {
        let stem = source_stem(source);
        let mut name = format!("{}_{}.{}", prefix, stem, options.format.extension());
        if options.compression == Compression::Gzip && !is_binary_format(options.format) {
            name.push_str(".gz");
        }

        let path = dir.join(name);
        write_table(table, &path, options)?;
        written.push(path);
    }
    Ok(written)
}

fn is_binary_format(format: OutputFormat) -> bool {
    #[cfg(feature = "parquet")]
    {
        format == OutputFormat::Parquet
    }
    #[cfg(not(feature = "parquet"))]
    {
        let _ = format;
        false
    }
}

/// File name with the usual tabular extensions stripped, so
/// `data.tsv.gz` becomes `data`.
fn source_stem(source: &str) -> String {
    let mut stem = Path::new(source)
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.to_string());

    loop {
        let lowered = stem.to_lowercase();
        let stripped = ["gz", "tsv", "csv", "txt", "vcf", "parquet"]
            .iter()
            .find_map(|ext| {
                lowered
                    .ends_with(&format!(".{}", ext))
                    .then(|| stem.len() - ext.len() - 1)
            });
        match stripped {
            Some(cut) => stem.truncate(cut),
            None => return stem,
        }
    }
}
