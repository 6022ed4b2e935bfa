//! Column matcher: assigns raw column names to canonical fields.

use indexmap::IndexMap;

use crate::patterns::PatternRegistry;
use crate::schema::ColumnMapping;

/// Matches raw column names against a pattern registry.
///
/// For each raw column, fields are tried in registry order and the first
/// whose synonym set contains the (trimmed, case-folded) name wins. When
/// two raw columns resolve to the same canonical field, only the first by
/// input order is mapped; the later one stays unmatched. Both rules are
/// deterministic and order-dependent.
pub struct ColumnMatcher {
    registry: PatternRegistry,
}

impl ColumnMatcher {
    /// Create a matcher over the given registry.
    pub fn new(registry: PatternRegistry) -> Self {
        Self { registry }
    }

    /// The registry this matcher consults.
    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    /// Produce the raw→canonical mapping for an ordered set of columns.
    pub fn match_mapping<S: AsRef<str>>(&self, raw_columns: &[S]) -> ColumnMapping {
        let mut mapping = ColumnMapping::new();
        for raw in raw_columns {
            let raw = raw.as_ref();
            if let Some(field) = self.registry.match_name(raw) {
                // Rejected when the canonical field is already claimed.
                mapping.insert(raw, field.name.clone());
            }
        }
        mapping
    }

    /// Per-column view of the same assignment: raw name → canonical name
    /// or `None`. Conflict losers report `None`, consistent with
    /// [`match_mapping`](Self::match_mapping).
    pub fn match_columns<S: AsRef<str>>(
        &self,
        raw_columns: &[S],
    ) -> IndexMap<String, Option<String>> {
        let mapping = self.match_mapping(raw_columns);
        raw_columns
            .iter()
            .map(|raw| {
                let raw = raw.as_ref();
                (
                    raw.to_string(),
                    mapping.canonical_for(raw).map(str::to_string),
                )
            })
            .collect()
    }
}
