//! Raw-to-canonical column mapping.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered mapping from raw column names to canonical field names.
///
/// A raw column absent from the mapping is unmatched. Canonical names are
/// unique within one mapping: inserting a second raw column for an
/// already-claimed canonical field is rejected, so the first raw column
/// (in insertion order, which the matcher makes input-column order) wins.
///
/// A mapping is computed fresh per dataset, or once per sample for chunked
/// processing, and is not persisted between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMapping {
    entries: IndexMap<String, String>,
}

impl ColumnMapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw→canonical entry. Returns `false` (and leaves the
    /// mapping unchanged) if the raw column is already mapped or the
    /// canonical field is already claimed by an earlier raw column.
    pub fn insert(&mut self, raw: impl Into<String>, canonical: impl Into<String>) -> bool {
        let raw = raw.into();
        let canonical = canonical.into();

        if self.entries.contains_key(&raw) || self.contains_canonical(&canonical) {
            return false;
        }
        self.entries.insert(raw, canonical);
        true
    }

    /// Canonical name for a raw column, if mapped.
    pub fn canonical_for(&self, raw: &str) -> Option<&str> {
        self.entries.get(raw).map(String::as_str)
    }

    /// Whether a canonical field is already claimed by some raw column.
    pub fn contains_canonical(&self, canonical: &str) -> bool {
        self.entries.values().any(|c| c == canonical)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(r, c)| (r.as_str(), c.as_str()))
    }

    /// Canonical names present in the mapping, in insertion order.
    pub fn canonical_names(&self) -> Vec<&str> {
        self.entries.values().map(String::as_str).collect()
    }

    /// Number of mapped columns.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no column is mapped.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for ColumnMapping {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut mapping = Self::new();
        for (raw, canonical) in iter {
            mapping.insert(raw, canonical);
        }
        mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let mut mapping = ColumnMapping::new();
        assert!(mapping.insert("CHR", "chr"));
        assert!(mapping.insert("P", "pval"));

        assert_eq!(mapping.canonical_for("CHR"), Some("chr"));
        assert_eq!(mapping.canonical_for("POS"), None);
        assert_eq!(mapping.len(), 2);
    }

    #[test]
    fn test_duplicate_canonical_rejected() {
        let mut mapping = ColumnMapping::new();
        assert!(mapping.insert("CHR", "chr"));
        assert!(!mapping.insert("chromosome", "chr"));

        assert_eq!(mapping.canonical_for("chromosome"), None);
        assert_eq!(mapping.len(), 1);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut mapping = ColumnMapping::new();
        mapping.insert("P", "pval");
        mapping.insert("CHR", "chr");
        mapping.insert("POS", "pos");

        assert_eq!(mapping.canonical_names(), vec!["pval", "chr", "pos"]);
    }
}
