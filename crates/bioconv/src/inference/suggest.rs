//! Mapping suggester: one-stop auto-detection for a dataset sample.

use crate::patterns::PatternRegistry;
use crate::schema::{ColumnMapping, OmicsType};

use super::matcher::ColumnMatcher;
use super::omics::OmicsClassifier;

/// Orchestrates the matcher and classifier to produce a ready-to-apply
/// mapping for a dataset sample. Read-only and deterministic given the
/// same input and registry.
pub struct MappingSuggester {
    matcher: ColumnMatcher,
    classifier: OmicsClassifier,
}

impl MappingSuggester {
    /// Create a suggester over the given registry.
    pub fn new(registry: PatternRegistry) -> Self {
        Self {
            matcher: ColumnMatcher::new(registry),
            classifier: OmicsClassifier::new(),
        }
    }

    /// Suggest a raw→canonical mapping for the sample's columns.
    pub fn suggest_mapping<S: AsRef<str>>(&self, sample_columns: &[S]) -> ColumnMapping {
        self.matcher.match_mapping(sample_columns)
    }

    /// Classify the sample's omics type from its detected fields.
    pub fn detect_omics_type<S: AsRef<str>>(&self, sample_columns: &[S]) -> OmicsType {
        let mapping = self.matcher.match_mapping(sample_columns);
        self.classifier.classify(&mapping.canonical_names())
    }

    /// The matcher used for suggestions.
    pub fn matcher(&self) -> &ColumnMatcher {
        &self.matcher
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggest_and_detect_agree() {
        let suggester = MappingSuggester::new(PatternRegistry::builtin());
        let columns = ["CHR", "POS", "SNP", "P", "Study_Notes"];

        let mapping = suggester.suggest_mapping(&columns);
        assert_eq!(mapping.len(), 4);
        assert_eq!(suggester.detect_omics_type(&columns), OmicsType::Genomics);
    }

    #[test]
    fn test_detect_unmatched_sample_is_unknown() {
        let suggester = MappingSuggester::new(PatternRegistry::builtin());
        assert_eq!(
            suggester.detect_omics_type(&["foo", "bar"]),
            OmicsType::Unknown
        );
    }

    #[test]
    fn test_deterministic_for_same_input() {
        let suggester = MappingSuggester::new(PatternRegistry::builtin());
        let columns = ["gene_id", "TPM", "log2FoldChange", "padj"];

        assert_eq!(
            suggester.suggest_mapping(&columns),
            suggester.suggest_mapping(&columns)
        );
        assert_eq!(
            suggester.detect_omics_type(&columns),
            OmicsType::Transcriptomics
        );
    }
}
