//! Registry of canonical fields and their synonym patterns.

use indexmap::IndexMap;

use crate::schema::CanonicalField;

use super::builtin::BUILTIN;

/// Ordered collection of canonical fields.
///
/// The registry is an explicit immutable configuration value passed into
/// the matcher and suggester, not module-level mutable state. Custom
/// fields compose by merging: an entry with an existing name replaces the
/// built-in definition in place (keeping its priority position), a new
/// name is appended after the built-ins.
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    fields: IndexMap<String, CanonicalField>,
}

impl PatternRegistry {
    /// Create a registry with no fields.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry of the built-in omics vocabulary.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Add or replace a field, builder style.
    pub fn with_field(mut self, field: CanonicalField) -> Self {
        self.fields.insert(field.name.clone(), field);
        self
    }

    /// Merge fields into the registry. Same-name entries are replaced in
    /// place; new names are appended.
    pub fn extend(&mut self, fields: impl IntoIterator<Item = CanonicalField>) {
        for field in fields {
            self.fields.insert(field.name.clone(), field);
        }
    }

    /// Look up a field by canonical name.
    pub fn field(&self, name: &str) -> Option<&CanonicalField> {
        self.fields.get(name)
    }

    /// Synonym set for a canonical field, in declaration order.
    pub fn synonyms_for(&self, name: &str) -> Option<&[String]> {
        self.fields.get(name).map(|f| f.synonyms.as_slice())
    }

    /// Iterate fields in registry order.
    pub fn all_fields(&self) -> impl Iterator<Item = &CanonicalField> {
        self.fields.values()
    }

    /// First field (in registry order) whose synonym set contains the raw
    /// name, after trimming and case folding.
    pub fn match_name(&self, raw_name: &str) -> Option<&CanonicalField> {
        self.fields.values().find(|f| f.matches(raw_name))
    }

    /// Number of registered fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the registry has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
