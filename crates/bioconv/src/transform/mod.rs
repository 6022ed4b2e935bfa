//! Transform layer: the conversion engine and batch mode.

mod batch;
mod engine;

pub use batch::{BatchOptions, BatchOutcome};
pub use engine::{ConversionEngine, ConvertOptions};
