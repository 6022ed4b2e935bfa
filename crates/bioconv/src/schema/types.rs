//! Core type definitions for the standardized column vocabulary.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Vocabulary group a canonical field belongs to.
///
/// `Sample` covers cross-omics sample annotation fields (sample id,
/// condition, replicate, ...) that appear alongside any omics type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OmicsCategory {
    Genomics,
    Transcriptomics,
    Proteomics,
    Metabolomics,
    Sample,
}

/// Omics type inferred for a dataset from its detected canonical fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OmicsType {
    Genomics,
    Transcriptomics,
    Proteomics,
    Metabolomics,
    /// No signature field was present.
    Unknown,
}

impl Default for OmicsType {
    fn default() -> Self {
        OmicsType::Unknown
    }
}

impl std::fmt::Display for OmicsType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OmicsType::Genomics => "genomics",
            OmicsType::Transcriptomics => "transcriptomics",
            OmicsType::Proteomics => "proteomics",
            OmicsType::Metabolomics => "metabolomics",
            OmicsType::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// A standardized column name together with the raw names it recognizes.
///
/// Matching is exact and case-insensitive against the synonym set, never
/// substring or fuzzy: the compiled pattern anchors the whole (trimmed)
/// raw name.
#[derive(Debug, Clone)]
pub struct CanonicalField {
    /// Canonical identifier, e.g. `chr`, `pval`, `gene_id`.
    pub name: String,
    /// Vocabulary group this field belongs to.
    pub category: OmicsCategory,
    /// Raw column names recognized for this field, in declaration order.
    pub synonyms: Vec<String>,
    /// Compiled `(?i)^(syn1|syn2|...)$` pattern over the synonyms.
    pattern: Regex,
}

impl CanonicalField {
    /// Build a field from its synonym list. Synonyms are regex-escaped,
    /// so any string is a valid synonym.
    pub fn new<I, S>(name: impl Into<String>, category: OmicsCategory, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let synonyms: Vec<String> = synonyms.into_iter().map(Into::into).collect();

        let alternatives: Vec<String> = synonyms.iter().map(|s| regex::escape(s)).collect();
        let pattern = Regex::new(&format!("(?i)^(?:{})$", alternatives.join("|"))).unwrap();

        Self {
            name,
            category,
            synonyms,
            pattern,
        }
    }

    /// Test whether a raw column name denotes this field. The raw name is
    /// trimmed; case is handled by the pattern.
    pub fn matches(&self, raw_name: &str) -> bool {
        self.pattern.is_match(raw_name.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_matches_case_insensitive() {
        let field = CanonicalField::new(
            "chr",
            OmicsCategory::Genomics,
            ["chr", "chromosome", "chrom"],
        );

        assert!(field.matches("CHR"));
        assert!(field.matches("chr"));
        assert!(field.matches("Chromosome"));
        assert!(field.matches("CHROM"));
        assert!(field.matches("  chr  "));
    }

    #[test]
    fn test_field_match_is_exact_not_substring() {
        let field = CanonicalField::new("chr", OmicsCategory::Genomics, ["chr"]);

        assert!(!field.matches("chr_build"));
        assert!(!field.matches("my_chr"));
        assert!(!field.matches(""));
    }

    #[test]
    fn test_synonyms_with_regex_metacharacters() {
        let field = CanonicalField::new("pval", OmicsCategory::Genomics, ["p-value", "p.value"]);

        assert!(field.matches("P-Value"));
        assert!(field.matches("p.value"));
        // The dot must be literal, not a wildcard.
        assert!(!field.matches("pxvalue"));
    }
}
