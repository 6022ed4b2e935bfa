//! Output layer: sinks and writers for standardized tables.

#[cfg(feature = "parquet")]
mod parquet;
mod writer;

pub use writer::{
    save_results, write_table, Compression, DelimitedWriter, MemorySink, OutputFormat, TableSink,
    WriteOptions,
};
