//! Standardized column vocabulary: canonical fields, omics types, and the
//! raw-to-canonical column mapping.

mod mapping;
mod types;

pub use mapping::ColumnMapping;
pub use types::{CanonicalField, OmicsCategory, OmicsType};
