//! Inference layer: column matching, omics classification, and mapping
//! suggestion.

mod matcher;
mod omics;
mod suggest;

pub use matcher::ColumnMatcher;
pub use omics::OmicsClassifier;
pub use suggest::MappingSuggester;
