//! Bioconv: column-name standardization for omics tabular files.
//!
//! Bioconv maps the inconsistently named columns of genomics,
//! transcriptomics, proteomics, and metabolomics tables onto a canonical
//! vocabulary, classifies each dataset's omics type from the fields it
//! detects, and applies the resulting rename/select mapping — whole-file,
//! in fixed-size chunks for large files, or batched over many files.
//!
//! # Core Principles
//!
//! - **Deterministic**: matching is exact, case-insensitive synonym
//!   lookup; conflicts resolve by input order, every run alike
//! - **Non-destructive**: source tables are never modified; conversion
//!   produces a new table
//! - **Bounded memory**: chunked conversion holds one row batch at a time
//!
//! # Example
//!
//! ```no_run
//! use bioconv::Bioconv;
//!
//! let bioconv = Bioconv::new();
//! let result = bioconv.convert_file("gwas_sumstats.tsv.gz", None).unwrap();
//!
//! println!("Omics type: {}", result.omics_type);
//! println!("Columns: {:?}", result.table.headers);
//! ```

pub mod error;
pub mod inference;
pub mod input;
pub mod output;
pub mod patterns;
pub mod schema;
pub mod transform;

mod bioconv;

pub use crate::bioconv::{Bioconv, BioconvConfig, ConversionResult};
pub use error::{BioconvError, Result};
pub use inference::{ColumnMatcher, MappingSuggester, OmicsClassifier};
pub use input::{suggest_chunk_rows, ChunkReader, DataTable, Parser, ParserConfig, SourceMetadata};
pub use output::{
    save_results, write_table, Compression, DelimitedWriter, MemorySink, OutputFormat, TableSink,
    WriteOptions,
};
pub use patterns::PatternRegistry;
pub use schema::{CanonicalField, ColumnMapping, OmicsCategory, OmicsType};
pub use transform::{BatchOptions, BatchOutcome, ConversionEngine, ConvertOptions};
