//! Built-in column-name vocabulary for the four supported omics domains.

use once_cell::sync::Lazy;

use crate::schema::{CanonicalField, OmicsCategory};

use super::registry::PatternRegistry;

/// Built-in registry, compiled once on first use.
pub(super) static BUILTIN: Lazy<PatternRegistry> = Lazy::new(build_builtin);

fn build_builtin() -> PatternRegistry {
    use OmicsCategory::{Genomics, Metabolomics, Proteomics, Sample, Transcriptomics};

    // Registry order matters: when a raw name satisfies more than one
    // field's synonym set, the first field listed here wins.
    let table: &[(&str, OmicsCategory, &[&str])] = &[
        // Genomics (GWAS summary statistics conventions)
        ("chr", Genomics, &["chr", "chromosome", "chrom", "#chrom"]),
        ("pos", Genomics, &["pos", "position", "bp", "base_pair_location"]),
        (
            "rsid",
            Genomics,
            &["rsid", "snp", "snp_id", "variant_id", "rs_number", "markername", "id"],
        ),
        ("ref", Genomics, &["ref", "reference", "a2", "other_allele", "allele2"]),
        ("alt", Genomics, &["alt", "effect_allele", "a1", "allele1", "alternate"]),
        ("pval", Genomics, &["p", "pval", "p_value", "p-value", "pvalue"]),
        ("beta", Genomics, &["beta", "effect", "effect_size", "b"]),
        ("se", Genomics, &["se", "stderr", "standard_error"]),
        ("or", Genomics, &["or", "odds_ratio"]),
        (
            "frq",
            Genomics,
            &["frq", "freq", "maf", "eaf", "effect_allele_frequency", "af"],
        ),
        ("n", Genomics, &["n", "n_samples", "sample_size", "nobs"]),
        ("info", Genomics, &["info", "imputation_quality", "rsq"]),
        // Transcriptomics (RNA-seq / differential expression conventions)
        (
            "gene_id",
            Transcriptomics,
            &["gene_id", "ensembl_id", "ensembl_gene_id", "geneid"],
        ),
        (
            "gene_name",
            Transcriptomics,
            &["gene_name", "gene_symbol", "symbol", "gene", "hgnc_symbol"],
        ),
        (
            "transcript_id",
            Transcriptomics,
            &["transcript_id", "ensembl_transcript_id"],
        ),
        ("expression", Transcriptomics, &["expression", "expr"]),
        ("fpkm", Transcriptomics, &["fpkm"]),
        ("tpm", Transcriptomics, &["tpm"]),
        (
            "counts",
            Transcriptomics,
            &["counts", "count", "read_count", "raw_counts", "basemean"],
        ),
        ("log2fc", Transcriptomics, &["log2fc", "log2foldchange", "lfc", "logfc"]),
        (
            "padj",
            Transcriptomics,
            &["padj", "fdr", "qval", "q_value", "adj_p_val", "adjusted_p_value"],
        ),
        // Proteomics (MaxQuant-style output conventions)
        (
            "protein_id",
            Proteomics,
            &["protein_id", "uniprot", "uniprot_id", "accession"],
        ),
        ("protein_name", Proteomics, &["protein_name", "protein"]),
        ("peptide", Proteomics, &["peptide", "peptide_sequence", "sequence"]),
        ("abundance", Proteomics, &["abundance", "protein_abundance"]),
        ("intensity", Proteomics, &["intensity", "lfq_intensity", "ibaq"]),
        ("ratio", Proteomics, &["ratio", "fold_change"]),
        // Metabolomics (LC-MS conventions)
        ("metabolite_id", Metabolomics, &["metabolite_id", "hmdb", "hmdb_id", "kegg_id"]),
        (
            "metabolite_name",
            Metabolomics,
            &["metabolite_name", "metabolite", "compound", "compound_name"],
        ),
        ("mz", Metabolomics, &["mz", "m/z", "mass"]),
        ("rt", Metabolomics, &["rt", "retention_time"]),
        ("concentration", Metabolomics, &["concentration", "conc"]),
        ("peak_area", Metabolomics, &["peak_area", "area"]),
        // Sample annotation (cross-omics)
        ("sample_id", Sample, &["sample_id", "sample", "sample_name"]),
        ("condition", Sample, &["condition", "group", "treatment"]),
        ("timepoint", Sample, &["timepoint", "time", "time_point"]),
        ("replicate", Sample, &["replicate", "rep"]),
        ("batch", Sample, &["batch"]),
    ];

    let mut registry = PatternRegistry::empty();
    registry.extend(
        table
            .iter()
            .map(|(name, category, synonyms)| {
                CanonicalField::new(*name, *category, synonyms.iter().copied())
            }),
    );
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_nonempty_and_ordered() {
        let registry = PatternRegistry::builtin();
        assert!(registry.len() > 30);

        // Genomics fields come first so GWAS names win ambiguous matches.
        let first = registry.all_fields().next().unwrap();
        assert_eq!(first.name, "chr");
    }

    #[test]
    fn test_builtin_has_all_categories() {
        use crate::schema::OmicsCategory;

        let registry = PatternRegistry::builtin();
        for category in [
            OmicsCategory::Genomics,
            OmicsCategory::Transcriptomics,
            OmicsCategory::Proteomics,
            OmicsCategory::Metabolomics,
            OmicsCategory::Sample,
        ] {
            assert!(
                registry.all_fields().any(|f| f.category == category),
                "missing category {:?}",
                category
            );
        }
    }
}
