//! Conversion engine: applies a column mapping to tables, streams, and
//! files.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{BioconvError, Result};
use crate::inference::MappingSuggester;
use crate::input::{DataTable, Parser, ParserConfig};
use crate::output::TableSink;
use crate::patterns::PatternRegistry;
use crate::schema::ColumnMapping;

/// Options for a single conversion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Keep columns that matched no canonical field, under their original
    /// names, after the canonical block.
    pub keep_unmatched: bool,
    /// Constant-valued columns appended to every row. A key naming an
    /// existing output column overwrites that column instead.
    pub metadata: Option<IndexMap<String, String>>,
}

/// Applies mappings to produce standardized tables.
///
/// Inputs are never mutated; every conversion builds a new table.
pub struct ConversionEngine {
    parser: Parser,
    suggester: MappingSuggester,
}

impl ConversionEngine {
    /// Create an engine over the given registry with default parsing.
    pub fn new(registry: PatternRegistry) -> Self {
        Self::with_parser(registry, ParserConfig::default())
    }

    /// Create an engine with custom parser configuration.
    pub fn with_parser(registry: PatternRegistry, parser: ParserConfig) -> Self {
        Self {
            parser: Parser::with_config(parser),
            suggester: MappingSuggester::new(registry),
        }
    }

    /// The suggester backing mapping auto-detection.
    pub fn suggester(&self) -> &MappingSuggester {
        &self.suggester
    }

    /// Convert a table. With no mapping supplied, one is computed from the
    /// table's own columns.
    ///
    /// Mapped columns are renamed to their canonical names and emitted in
    /// input-column order; unmatched columns are dropped unless
    /// `keep_unmatched`, in which case they follow the canonical block in
    /// their original relative order. Fails with
    /// [`BioconvError::NoMatch`] when nothing matched and unmatched
    /// columns are being dropped.
    pub fn convert(
        &self,
        table: &DataTable,
        mapping: Option<&ColumnMapping>,
        options: &ConvertOptions,
    ) -> Result<DataTable> {
        let computed;
        let mapping = match mapping {
            Some(m) => m,
            None => {
                computed = self.suggester.suggest_mapping(&table.headers);
                &computed
            }
        };

        // Output plan: (source column index, output name).
        let mut plan: Vec<(usize, String)> = Vec::new();
        let mut unmatched: Vec<(usize, String)> = Vec::new();
        for (index, raw) in table.headers.iter().enumerate() {
            match mapping.canonical_for(raw) {
                Some(canonical) => plan.push((index, canonical.to_string())),
                None => unmatched.push((index, raw.clone())),
            }
        }

        if plan.is_empty() && !options.keep_unmatched {
            return Err(BioconvError::NoMatch {
                columns: table.column_count(),
            });
        }
        if options.keep_unmatched {
            plan.extend(unmatched);
        }

        let mut headers: Vec<String> = plan.iter().map(|(_, name)| name.clone()).collect();
        let mut rows: Vec<Vec<String>> = table
            .rows
            .iter()
            .map(|row| {
                plan.iter()
                    .map(|(index, _)| row.get(*index).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();

        if let Some(metadata) = &options.metadata {
            for (key, value) in metadata {
                match headers.iter().position(|h| h == key) {
                    Some(index) => {
                        for row in &mut rows {
                            row[index] = value.clone();
                        }
                    }
                    None => {
                        headers.push(key.clone());
                        for row in &mut rows {
                            row.push(value.clone());
                        }
                    }
                }
            }
        }

        Ok(DataTable::new(headers, rows, table.delimiter))
    }

    /// Parse and convert a file in one step.
    pub fn convert_file(
        &self,
        path: impl AsRef<Path>,
        mapping: Option<&ColumnMapping>,
        options: &ConvertOptions,
    ) -> Result<DataTable> {
        let (table, _source) = self.parser.parse_file(path)?;
        self.convert(&table, mapping, options)
    }

    /// Convert a stream of chunks into a sink.
    ///
    /// The mapping is fixed after the first chunk (computed from it when
    /// not supplied) and reused unchanged for every later chunk, so the
    /// output schema is stable across the whole stream. A later chunk
    /// whose headers differ from the first chunk's fails with
    /// [`BioconvError::SchemaDrift`]. The header is written to the sink
    /// exactly once, before the first chunk's rows. Returns the total
    /// rows written, which equals the total rows read.
    pub fn convert_streaming<I>(
        &self,
        chunks: I,
        sink: &mut dyn TableSink,
        mapping: Option<&ColumnMapping>,
        options: &ConvertOptions,
    ) -> Result<usize>
    where
        I: IntoIterator<Item = Result<DataTable>>,
    {
        let mut first_headers: Option<Vec<String>> = None;
        let mut computed: Option<ColumnMapping> = None;
        let mut header_written = false;
        let mut total_rows = 0usize;

        for (chunk_number, chunk) in chunks.into_iter().enumerate() {
            let chunk = chunk?;

            match &first_headers {
                None => first_headers = Some(chunk.headers.clone()),
                Some(reference) => {
                    if *reference != chunk.headers {
                        let column = divergent_column(reference, &chunk.headers);
                        return Err(BioconvError::SchemaDrift {
                            chunk: chunk_number + 1,
                            column,
                        });
                    }
                }
            }

            if mapping.is_none() && computed.is_none() {
                computed = Some(self.suggester.suggest_mapping(&chunk.headers));
            }
            let active = mapping
                .or(computed.as_ref())
                .expect("a mapping is supplied or computed from the first chunk");

            let converted = self.convert(&chunk, Some(active), options)?;

            if !header_written {
                sink.write_header(&converted.headers)?;
                header_written = true;
            }
            for row in &converted.rows {
                sink.write_row(row)?;
            }
            total_rows += converted.row_count();
        }

        sink.finish()?;
        Ok(total_rows)
    }
}

/// Name of the first column where two headers diverge.
fn divergent_column(reference: &[String], actual: &[String]) -> String {
    for (expected, got) in reference.iter().zip(actual.iter()) {
        if expected != got {
            return got.clone();
        }
    }
    // Same prefix, different width: name the first extra column.
    if actual.len() > reference.len() {
        actual[reference.len()].clone()
    } else {
        reference[actual.len()].clone()
    }
}
