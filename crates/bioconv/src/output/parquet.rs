//! Columnar output via Arrow/Parquet with snappy block compression.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression as ParquetCompression;
use parquet::file::properties::WriterProperties;

use crate::error::{BioconvError, Result};
use crate::input::DataTable;

/// Write a table as a snappy-compressed parquet file. All columns are
/// written as UTF-8; typed readers can cast downstream.
pub fn write_parquet(table: &DataTable, path: &Path) -> Result<()> {
    let fields: Vec<Field> = table
        .headers
        .iter()
        .map(|name| Field::new(name, DataType::Utf8, false))
        .collect();
    let schema = Arc::new(Schema::new(fields));

    let columns: Vec<ArrayRef> = (0..table.column_count())
        .map(|index| {
            Arc::new(StringArray::from_iter_values(table.column_values(index))) as ArrayRef
        })
        .collect();

    let batch = RecordBatch::try_new(Arc::clone(&schema), columns)
        .map_err(|e| BioconvError::Parquet(e.to_string()))?;

    let file = File::create(path).map_err(|e| BioconvError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let props = WriterProperties::builder()
        .set_compression(ParquetCompression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(file, schema, Some(props))
        .map_err(|e| BioconvError::Parquet(e.to_string()))?;
    writer
        .write(&batch)
        .map_err(|e| BioconvError::Parquet(e.to_string()))?;
    writer
        .close()
        .map_err(|e| BioconvError::Parquet(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    #[test]
    fn test_parquet_round_trip() {
        let table = DataTable::new(
            vec!["chr".to_string(), "pval".to_string()],
            vec![
                vec!["1".to_string(), "0.001".to_string()],
                vec!["2".to_string(), "0.01".to_string()],
            ],
            b'\t',
        );

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.parquet");
        write_parquet(&table, &path).unwrap();

        let file = File::open(&path).unwrap();
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)
            .unwrap()
            .build()
            .unwrap();
        let batches: Vec<RecordBatch> = reader.map(|b| b.unwrap()).collect();

        assert_eq!(batches.iter().map(RecordBatch::num_rows).sum::<usize>(), 2);
        assert_eq!(batches[0].schema().field(0).name(), "chr");
    }
}
