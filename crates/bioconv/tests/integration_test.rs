//! Integration tests for bioconv.

use std::io::Write;

use indexmap::IndexMap;
use tempfile::NamedTempFile;

use bioconv::{
    save_results, BatchOptions, Bioconv, BioconvConfig, BioconvError, ColumnMapping,
    ConvertOptions, OmicsType, WriteOptions,
};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

/// Helper to create a gzip-compressed temporary file.
fn create_gzip_file(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(content.as_bytes()).unwrap();
    file.write_all(&encoder.finish().unwrap()).unwrap();
    file.flush().unwrap();
    file
}

const GWAS: &str = "CHR\tPOS\tSNP\tP\tBETA\tCustomField1\n\
                    1\t1000\trs1\t0.001\t0.1\tA\n\
                    2\t2000\trs2\t0.01\t-0.2\tB\n\
                    3\t3000\trs3\t0.1\t0.05\tC\n";

// =============================================================================
// Single-File Conversion
// =============================================================================

#[test]
fn test_convert_gwas_preserves_values() {
    let file = create_test_file(GWAS);

    let bioconv = Bioconv::new();
    let result = bioconv.convert_file(file.path(), None).expect("conversion failed");

    assert_eq!(result.table.headers, vec!["chr", "pos", "rsid", "pval", "beta"]);
    assert_eq!(result.omics_type, OmicsType::Genomics);
    assert_eq!(result.unmatched, vec!["CustomField1"]);

    // Values land unchanged under the canonical names.
    assert_eq!(result.table.column_by_name("chr").unwrap(), vec!["1", "2", "3"]);
    assert_eq!(
        result.table.column_by_name("pval").unwrap(),
        vec!["0.001", "0.01", "0.1"]
    );
}

#[test]
fn test_round_trip_with_keep_unmatched() {
    let file = create_test_file(GWAS);

    let bioconv = Bioconv::new().with_convert_options(ConvertOptions {
        keep_unmatched: true,
        ..Default::default()
    });
    let result = bioconv.convert_file(file.path(), None).unwrap();

    // Every original value survives under its canonical or original name,
    // with row count and order intact.
    assert_eq!(result.table.row_count(), 3);
    for (raw, canonical) in [
        ("CHR", "chr"),
        ("POS", "pos"),
        ("SNP", "rsid"),
        ("P", "pval"),
        ("BETA", "beta"),
        ("CustomField1", "CustomField1"),
    ] {
        let original: Vec<&str> = match raw {
            "CHR" => vec!["1", "2", "3"],
            "POS" => vec!["1000", "2000", "3000"],
            "SNP" => vec!["rs1", "rs2", "rs3"],
            "P" => vec!["0.001", "0.01", "0.1"],
            "BETA" => vec!["0.1", "-0.2", "0.05"],
            _ => vec!["A", "B", "C"],
        };
        assert_eq!(
            result.table.column_by_name(canonical).unwrap(),
            original,
            "column {} -> {}",
            raw,
            canonical
        );
    }
}

#[test]
fn test_convert_with_custom_mapping() {
    let file = create_test_file("SNP_ID\tCHROM\tEFFECT\nrs1\t1\t0.5\n");

    let mut mapping = ColumnMapping::new();
    mapping.insert("SNP_ID", "rsid");
    mapping.insert("CHROM", "chr");
    mapping.insert("EFFECT", "beta");

    let bioconv = Bioconv::new();
    let result = bioconv.convert_file(file.path(), Some(&mapping)).unwrap();

    assert_eq!(result.table.headers, vec!["rsid", "chr", "beta"]);
}

#[test]
fn test_no_match_is_an_error() {
    let file = create_test_file("foo,bar\n1,2\n");

    let bioconv = Bioconv::new();
    let err = bioconv.convert_file(file.path(), None).unwrap_err();

    assert!(matches!(err, BioconvError::NoMatch { columns: 2 }));
}

// =============================================================================
// Metadata Columns
// =============================================================================

#[test]
fn test_metadata_constant_column() {
    let file = create_test_file(GWAS);

    let mut metadata = IndexMap::new();
    metadata.insert("trait".to_string(), "AGA".to_string());
    metadata.insert("n".to_string(), "119185".to_string());

    let bioconv = Bioconv::new().with_convert_options(ConvertOptions {
        keep_unmatched: false,
        metadata: Some(metadata),
    });
    let result = bioconv.convert_file(file.path(), None).unwrap();

    assert_eq!(
        result.table.column_by_name("trait").unwrap(),
        vec!["AGA", "AGA", "AGA"]
    );
    assert_eq!(
        result.table.column_by_name("n").unwrap(),
        vec!["119185", "119185", "119185"]
    );
    // All other columns unchanged.
    assert_eq!(result.table.column_by_name("chr").unwrap(), vec!["1", "2", "3"]);
}

// =============================================================================
// Compressed and VCF Inputs
// =============================================================================

#[test]
fn test_gzip_in_gzip_out() {
    let file = create_gzip_file(GWAS, ".tsv.gz");

    let bioconv = Bioconv::new();
    let result = bioconv.convert_file(file.path(), None).unwrap();
    assert_eq!(result.source.format, "tsv.gz");

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("std.tsv.gz");
    bioconv::write_table(&result.table, &out, &WriteOptions::default()).unwrap();

    // Read the gzipped output back and compare.
    let reparsed = bioconv::Parser::new().parse_file(&out).unwrap().0;
    assert_eq!(reparsed.headers, result.table.headers);
    assert_eq!(reparsed.rows, result.table.rows);
}

#[test]
fn test_vcf_header_convention() {
    let vcf = "##fileformat=VCFv4.2\n\
               ##FILTER=<ID=PASS,Description=\"All filters passed\">\n\
               #CHROM\tPOS\tID\tREF\tALT\n\
               1\t10177\trs367896524\tA\tAC\n\
               1\t10352\trs555500075\tT\tTA\n";
    let file = create_gzip_file(vcf, ".vcf.gz");

    let bioconv = Bioconv::new();
    let result = bioconv.convert_file(file.path(), None).unwrap();

    assert_eq!(result.source.format, "vcf.gz");
    assert_eq!(result.table.headers, vec!["chr", "pos", "rsid", "ref", "alt"]);
    assert_eq!(
        result.table.column_by_name("rsid").unwrap(),
        vec!["rs367896524", "rs555500075"]
    );
    assert_eq!(result.omics_type, OmicsType::Genomics);
}

// =============================================================================
// Chunked Conversion
// =============================================================================

#[test]
fn test_chunked_equals_single_shot_for_every_chunk_size() {
    let file = create_test_file(GWAS);

    let bioconv = Bioconv::new().with_convert_options(ConvertOptions {
        keep_unmatched: true,
        ..Default::default()
    });
    let single = bioconv.convert_file(file.path(), None).unwrap().table;

    for chunk_rows in 1..=3 {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.tsv");
        let written = bioconv
            .convert_file_streaming(file.path(), &out, chunk_rows, None)
            .unwrap();

        assert_eq!(written, 3, "chunk_rows={}", chunk_rows);

        let reparsed = bioconv::Parser::new().parse_file(&out).unwrap().0;
        assert_eq!(reparsed.headers, single.headers, "chunk_rows={}", chunk_rows);
        assert_eq!(reparsed.rows, single.rows, "chunk_rows={}", chunk_rows);
    }
}

#[test]
fn test_chunked_gzip_output() {
    let file = create_test_file(GWAS);

    let bioconv = Bioconv::new();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.tsv.gz");
    let written = bioconv
        .convert_file_streaming(file.path(), &out, 2, None)
        .unwrap();

    assert_eq!(written, 3);
    let reparsed = bioconv::Parser::new().parse_file(&out).unwrap().0;
    assert_eq!(reparsed.headers, vec!["chr", "pos", "rsid", "pval", "beta"]);
    assert_eq!(reparsed.row_count(), 3);
}

#[test]
fn test_chunked_with_precomputed_sample_mapping() {
    let file = create_test_file(GWAS);

    let bioconv = Bioconv::new();
    let mapping = bioconv.suggest_mapping(file.path()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.tsv");
    let written = bioconv
        .convert_file_streaming(file.path(), &out, 2, Some(&mapping))
        .unwrap();

    assert_eq!(written, 3);
}

// =============================================================================
// Batch Conversion
// =============================================================================

#[test]
fn test_convert_many_with_missing_file() {
    let gwas = create_test_file(GWAS);
    let rnaseq = create_test_file("gene_id,TPM,log2FoldChange,padj\nENSG1,5.0,1.2,0.04\n");

    let files = vec![
        gwas.path().to_path_buf(),
        std::path::PathBuf::from("/no/such/file.tsv"),
        rnaseq.path().to_path_buf(),
    ];

    let bioconv = Bioconv::new();
    let outcome = bioconv.convert_many_default(&files);

    assert_eq!(outcome.total(), 3);
    assert_eq!(outcome.converted.len(), 2);
    assert_eq!(outcome.failed.len(), 1);
    assert!(outcome.failed.contains_key("/no/such/file.tsv"));
}

#[test]
fn test_convert_many_with_per_file_metadata_and_save() {
    let gwas = create_test_file(GWAS);
    let key = gwas.path().to_string_lossy().into_owned();

    let mut per_file = IndexMap::new();
    let mut meta = IndexMap::new();
    meta.insert("trait".to_string(), "AGA".to_string());
    per_file.insert(key.clone(), meta);

    let options = BatchOptions {
        convert: ConvertOptions::default(),
        per_file_metadata: per_file,
    };

    let bioconv = Bioconv::new();
    let outcome = bioconv.convert_many(&[gwas.path().to_path_buf()], &options);
    assert!(outcome.is_complete());
    assert_eq!(
        outcome.converted[&key].column_by_name("trait").unwrap(),
        vec!["AGA", "AGA", "AGA"]
    );

    let dir = tempfile::tempdir().unwrap();
    let written = save_results(&outcome.converted, dir.path(), "std", &WriteOptions::default())
        .unwrap();
    assert_eq!(written.len(), 1);
    assert!(written[0].exists());
    assert!(written[0]
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("std_"));
}

// =============================================================================
// Serialization
// =============================================================================

#[test]
fn test_mapping_serializes_as_flat_object() {
    let file = create_test_file(GWAS);

    let mapping = Bioconv::new().suggest_mapping(file.path()).unwrap();
    let json = serde_json::to_string(&mapping).unwrap();

    assert!(json.contains("\"CHR\":\"chr\""));
    let back: ColumnMapping = serde_json::from_str(&json).unwrap();
    assert_eq!(back, mapping);
}

#[test]
fn test_source_metadata_serializes() {
    let file = create_test_file(GWAS);

    let result = Bioconv::new().convert_file(file.path(), None).unwrap();
    let json = serde_json::to_value(&result.source).unwrap();

    assert_eq!(json["row_count"], 3);
    assert!(json["hash"].as_str().unwrap().starts_with("sha256:"));
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_sample_rows_config_is_respected() {
    let mut content = String::from("CHR\tPOS\n");
    for i in 0..500 {
        content.push_str(&format!("{}\t{}\n", i % 22 + 1, i));
    }
    let file = create_test_file(&content);

    let bioconv = Bioconv::with_config(BioconvConfig {
        sample_rows: 10,
        ..Default::default()
    });

    // Sampling caps rows read, not columns seen.
    let mapping = bioconv.suggest_mapping(file.path()).unwrap();
    assert_eq!(mapping.canonical_names(), vec!["chr", "pos"]);
}
