//! Batch conversion over multiple files with partial-failure semantics.

use std::path::Path;

use indexmap::IndexMap;

use crate::error::BioconvError;
use crate::input::DataTable;

use super::engine::{ConversionEngine, ConvertOptions};

/// Options shared across a batch.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Conversion options applied to every file.
    pub convert: ConvertOptions,
    /// Extra constant columns per file, keyed by the file's path string.
    /// Merged over `convert.metadata`, overriding same-named keys.
    pub per_file_metadata: IndexMap<String, IndexMap<String, String>>,
}

/// Result of a batch conversion: one slot per input file.
///
/// A failure on one file never aborts the batch; it lands in `failed`
/// under that file's path while the remaining files continue.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Successfully converted tables, in input order.
    pub converted: IndexMap<String, DataTable>,
    /// Per-file errors, in input order.
    pub failed: IndexMap<String, BioconvError>,
}

impl BatchOutcome {
    /// Whether every file converted.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Total number of input files accounted for.
    pub fn total(&self) -> usize {
        self.converted.len() + self.failed.len()
    }
}

impl ConversionEngine {
    /// Convert each file independently, collecting per-file results.
    ///
    /// Files are processed sequentially; each conversion is side-effect
    /// free and independent of the others, so no state is shared between
    /// slots.
    pub fn convert_many<P: AsRef<Path>>(
        &self,
        files: &[P],
        options: &BatchOptions,
    ) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();

        for file in files {
            let path = file.as_ref();
            let key = path.to_string_lossy().into_owned();

            let mut convert = options.convert.clone();
            if let Some(extra) = options.per_file_metadata.get(&key) {
                let metadata = convert.metadata.get_or_insert_with(IndexMap::new);
                for (k, v) in extra {
                    metadata.insert(k.clone(), v.clone());
                }
            }

            match self.convert_file(path, None, &convert) {
                Ok(table) => {
                    outcome.converted.insert(key, table);
                }
                Err(error) => {
                    outcome.failed.insert(key, error);
                }
            }
        }

        outcome
    }
}
