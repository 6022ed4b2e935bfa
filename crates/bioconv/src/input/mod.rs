//! Input layer: delimited-text parsing, source metadata, and chunked
//! reading for files too large to hold in memory.

mod chunks;
mod parser;
mod source;

pub use chunks::{suggest_chunk_rows, ChunkReader};
pub use parser::{Parser, ParserConfig};
pub use source::{DataTable, SourceMetadata};
