//! Omics type classification from detected canonical fields.

use std::collections::HashSet;

use crate::schema::OmicsType;

/// Signature fields per omics type. Order is the tie-break priority.
const SIGNATURES: &[(OmicsType, &[&str])] = &[
    (
        OmicsType::Genomics,
        &["chr", "pos", "rsid", "pval", "beta", "se", "or", "frq"],
    ),
    (
        OmicsType::Transcriptomics,
        &[
            "gene_id",
            "gene_name",
            "transcript_id",
            "fpkm",
            "tpm",
            "counts",
            "log2fc",
            "padj",
        ],
    ),
    (
        OmicsType::Proteomics,
        &["protein_id", "protein_name", "peptide", "abundance", "intensity"],
    ),
    (
        OmicsType::Metabolomics,
        &["metabolite_id", "metabolite_name", "mz", "rt", "concentration", "peak_area"],
    ),
];

/// Classifies a dataset's omics type from the canonical fields present.
///
/// Pure and side-effect-free; callable on a small sample's columns, no
/// file scan involved.
pub struct OmicsClassifier;

impl OmicsClassifier {
    /// Create a classifier over the built-in signatures.
    pub fn new() -> Self {
        Self
    }

    /// Classify from the set of canonical field names present.
    ///
    /// Score = sum of field weights over signature fields present, where a
    /// field unique to one signature weighs twice a field shared between
    /// signatures. Highest nonzero score wins; ties fall to the earlier
    /// signature (genomics > transcriptomics > proteomics > metabolomics);
    /// an all-zero score yields `Unknown`.
    pub fn classify<S: AsRef<str>>(&self, canonical_fields: &[S]) -> OmicsType {
        let present: HashSet<&str> = canonical_fields.iter().map(AsRef::as_ref).collect();

        let mut best = OmicsType::Unknown;
        let mut best_score = 0;

        for (omics_type, signature) in SIGNATURES {
            let score: usize = signature
                .iter()
                .filter(|field| present.contains(**field))
                .map(|field| Self::field_weight(field))
                .sum();

            // Strictly greater, so earlier signatures win ties.
            if score > best_score {
                best = *omics_type;
                best_score = score;
            }
        }

        best
    }

    /// 2 for a field appearing in exactly one signature, 1 otherwise.
    fn field_weight(field: &str) -> usize {
        let occurrences = SIGNATURES
            .iter()
            .filter(|(_, signature)| signature.contains(&field))
            .count();
        if occurrences == 1 { 2 } else { 1 }
    }
}

impl Default for OmicsClassifier {
    fn default() -> Self {
        Self::new()
    }
}
