//! Example: Convert a tabular omics file to the standard column schema.
//!
//! Usage:
//!   cargo run --example convert -- <file_path> [output_path]
//!
//! Example:
//!   cargo run --example convert -- gwas_sumstats.tsv.gz std_output.tsv

use std::env;
use std::path::Path;

use bioconv::{Bioconv, ConvertOptions, WriteOptions};

fn main() -> bioconv::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example convert -- <file_path> [output_path]");
        eprintln!("\nExample:");
        eprintln!("  cargo run --example convert -- gwas_sumstats.tsv.gz std_output.tsv");
        std::process::exit(1);
    }

    let file_path = &args[1];
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Error: File not found: {}", file_path);
        std::process::exit(1);
    }

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Bioconv Conversion: {}", file_path);
    println!("{}", separator);
    println!();

    let bioconv = Bioconv::new().with_convert_options(ConvertOptions {
        keep_unmatched: true,
        ..Default::default()
    });

    let result = bioconv.convert_file(path, None)?;

    println!("## Source");
    println!("  File: {}", result.source.file);
    println!("  Format: {}", result.source.format);
    println!("  Rows: {}", result.source.row_count);
    println!("  Columns: {}", result.source.column_count);
    println!("  Omics type: {}", result.omics_type);
    println!();

    println!("## Column Mapping");
    for (raw, canonical) in result.mapping.iter() {
        println!("  {:30} -> {}", raw, canonical);
    }
    for raw in &result.unmatched {
        println!("  {:30} -> (unmatched, kept)", raw);
    }
    println!();

    if let Some(output) = args.get(2) {
        bioconv::write_table(&result.table, output, &WriteOptions::default())?;
        println!("Standardized table written to: {}", output);
    } else {
        println!("## Preview");
        println!("  {}", result.table.headers.join("\t"));
        for row in result.table.rows.iter().take(5) {
            println!("  {}", row.join("\t"));
        }
    }

    Ok(())
}
