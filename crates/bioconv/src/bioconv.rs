//! Main Bioconv struct and public API.

use std::path::Path;

use crate::error::Result;
use crate::inference::MappingSuggester;
use crate::input::{ChunkReader, DataTable, Parser, ParserConfig, SourceMetadata};
use crate::output::DelimitedWriter;
use crate::patterns::PatternRegistry;
use crate::schema::{ColumnMapping, OmicsType};
use crate::transform::{BatchOptions, BatchOutcome, ConversionEngine, ConvertOptions};

/// Rows read when sampling a file for mapping suggestion.
const DEFAULT_SAMPLE_ROWS: usize = 100;

/// Configuration for conversions.
#[derive(Debug, Clone)]
pub struct BioconvConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Pattern registry consulted by the matcher.
    pub registry: PatternRegistry,
    /// Options applied by the file-level conversion methods.
    pub convert: ConvertOptions,
    /// Rows sampled by `suggest_mapping`/`detect_omics_type`.
    pub sample_rows: usize,
}

impl Default for BioconvConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            registry: PatternRegistry::builtin(),
            convert: ConvertOptions::default(),
            sample_rows: DEFAULT_SAMPLE_ROWS,
        }
    }
}

/// Result of converting a single file.
#[derive(Debug)]
pub struct ConversionResult {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// The mapping that was applied.
    pub mapping: ColumnMapping,
    /// Omics type inferred from the mapped fields.
    pub omics_type: OmicsType,
    /// Raw columns that matched no canonical field.
    pub unmatched: Vec<String>,
    /// The standardized table.
    pub table: DataTable,
}

/// The main conversion entry point.
///
/// Thin orchestration over the parser, suggester, and conversion engine;
/// each component is also usable on its own.
pub struct Bioconv {
    config: BioconvConfig,
    engine: ConversionEngine,
}

impl Bioconv {
    /// Create a converter with the built-in registry and defaults.
    pub fn new() -> Self {
        Self::with_config(BioconvConfig::default())
    }

    /// Create a converter with custom configuration.
    pub fn with_config(config: BioconvConfig) -> Self {
        let engine =
            ConversionEngine::with_parser(config.registry.clone(), config.parser.clone());
        Self { config, engine }
    }

    /// Replace the pattern registry, keeping other configuration.
    pub fn with_registry(mut self, registry: PatternRegistry) -> Self {
        self.config.registry = registry;
        self.engine = ConversionEngine::with_parser(
            self.config.registry.clone(),
            self.config.parser.clone(),
        );
        self
    }

    /// Set conversion options, builder style.
    pub fn with_convert_options(mut self, convert: ConvertOptions) -> Self {
        self.config.convert = convert;
        self
    }

    /// The suggester backing auto-detection.
    pub fn suggester(&self) -> &MappingSuggester {
        self.engine.suggester()
    }

    /// Suggest a raw→canonical mapping from a sample of the file.
    pub fn suggest_mapping(&self, path: impl AsRef<Path>) -> Result<ColumnMapping> {
        let sample = self.read_sample(path.as_ref())?;
        Ok(self.engine.suggester().suggest_mapping(&sample.headers))
    }

    /// Classify a file's omics type from a sample.
    pub fn detect_omics_type(&self, path: impl AsRef<Path>) -> Result<OmicsType> {
        let sample = self.read_sample(path.as_ref())?;
        Ok(self.engine.suggester().detect_omics_type(&sample.headers))
    }

    /// Convert a whole file. With no mapping supplied, one is computed
    /// from the file's own columns.
    pub fn convert_file(
        &self,
        path: impl AsRef<Path>,
        mapping: Option<&ColumnMapping>,
    ) -> Result<ConversionResult> {
        let path = path.as_ref();
        let parser = Parser::with_config(self.config.parser.clone());
        let (table, source) = parser.parse_file(path)?;

        let mapping = match mapping {
            Some(m) => m.clone(),
            None => self.engine.suggester().suggest_mapping(&table.headers),
        };
        let converted = self
            .engine
            .convert(&table, Some(&mapping), &self.config.convert)?;

        let omics_type = self
            .engine
            .suggester()
            .detect_omics_type(&table.headers);
        let unmatched = table
            .headers
            .iter()
            .filter(|h| mapping.canonical_for(h).is_none())
            .cloned()
            .collect();

        Ok(ConversionResult {
            source,
            mapping,
            omics_type,
            unmatched,
            table: converted,
        })
    }

    /// Convert a file in fixed-size row chunks, writing delimited output
    /// to `output`. The output is tab-delimited (gzip-compressed when the
    /// path ends in `.gz`) and its header matches what single-shot
    /// conversion would produce. Returns the number of rows written.
    pub fn convert_file_streaming(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        chunk_rows: usize,
        mapping: Option<&ColumnMapping>,
    ) -> Result<usize> {
        let chunks = ChunkReader::open(input, chunk_rows, self.config.parser.delimiter)?;
        let mut sink = DelimitedWriter::create(output, b'\t')?;
        self.engine
            .convert_streaming(chunks, &mut sink, mapping, &self.config.convert)
    }

    /// Convert many files independently with partial-failure semantics.
    pub fn convert_many<P: AsRef<Path>>(
        &self,
        files: &[P],
        options: &BatchOptions,
    ) -> BatchOutcome {
        self.engine.convert_many(files, options)
    }

    /// Convert many files using this converter's own options.
    pub fn convert_many_default<P: AsRef<Path>>(&self, files: &[P]) -> BatchOutcome {
        let options = BatchOptions {
            convert: self.config.convert.clone(),
            per_file_metadata: Default::default(),
        };
        self.engine.convert_many(files, &options)
    }

    fn read_sample(&self, path: &Path) -> Result<DataTable> {
        let config = ParserConfig {
            max_rows: Some(self.config.sample_rows),
            ..self.config.parser.clone()
        };
        let parser = Parser::with_config(config);
        let (table, _source) = parser.parse_file(path)?;
        Ok(table)
    }
}

impl Default for Bioconv {
    fn default() -> Self {
        Self::new()
    }
}
