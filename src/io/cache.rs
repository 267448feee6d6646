//! Parquet scan-cache read/write operations
//!
//! The cache snapshots every scanned file's path, content hash (nullable),
//! and size, plus one metadata row, so a later run can skip re-hashing
//! files whose path and size are unchanged.

use crate::models::{CacheMeta, CacheRecord};
use arrow_array::{Array, ArrayRef, RecordBatch, StringArray, UInt64Array};
use arrow_schema::{DataType, Field, Schema};
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::io::{Error, ErrorKind, Result};
use std::path::Path;
use std::sync::Arc;

/// Return the Arrow schema shared by cache writers and readers.
#[must_use]
pub fn cache_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("path", DataType::Utf8, true),
        Field::new("hash", DataType::Utf8, true),
        Field::new("size", DataType::UInt64, true),
        Field::new("meta_scan_root", DataType::Utf8, true),
        Field::new("meta_scanned_at", DataType::Utf8, true),
        Field::new("meta_hash_algorithm", DataType::Utf8, true),
    ]))
}

/// Write a scan cache to a Parquet file.
pub fn write_cache(path: &str, meta: &CacheMeta, records: &[CacheRecord]) -> Result<()> {
    let file_path = Path::new(path);

    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(file_path)?;
    let schema = cache_schema();
    let props = WriterProperties::builder().build();
    let mut writer =
        ArrowWriter::try_new(file, schema.clone(), Some(props)).map_err(Error::other)?;

    if !records.is_empty() {
        let batch = create_records_batch(&schema, records)?;
        writer.write(&batch).map_err(Error::other)?;
    }

    let metadata_batch = create_metadata_batch(&schema, meta)?;
    writer.write(&metadata_batch).map_err(Error::other)?;

    writer.close().map_err(Error::other)?;
    Ok(())
}

/// Read a scan cache from a Parquet file.
pub fn read_cache(path: &str) -> Result<(CacheMeta, Vec<CacheRecord>)> {
    let file = File::open(path)?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| Error::new(ErrorKind::InvalidData, e))?;

    let mut reader = builder
        .build()
        .map_err(|e| Error::new(ErrorKind::InvalidData, e))?;

    let mut records = Vec::new();
    let mut meta: Option<CacheMeta> = None;

    for batch_result in &mut reader {
        let batch = batch_result.map_err(|e| Error::new(ErrorKind::InvalidData, e))?;

        for row_idx in 0..batch.num_rows() {
            let meta_value = get_string_value(&batch, "meta_scan_root", row_idx)?;
            let path_value = get_string_value(&batch, "path", row_idx)?;

            if meta.is_none() && meta_value.is_some() {
                meta = Some(extract_metadata(&batch, row_idx)?);
                if path_value.is_none() {
                    continue;
                }
            }

            if let Some(path) = path_value
                && !path.is_empty()
            {
                let hash = get_string_value(&batch, "hash", row_idx)?;
                let size = get_u64_value(&batch, "size", row_idx)?
                    .ok_or_else(|| Error::new(ErrorKind::InvalidData, "Missing size"))?;
                records.push(CacheRecord { path, hash, size });
            }
        }
    }

    let meta = meta.ok_or_else(|| Error::new(ErrorKind::InvalidData, "No metadata found"))?;

    Ok((meta, records))
}

fn create_records_batch(schema: &Arc<Schema>, records: &[CacheRecord]) -> Result<RecordBatch> {
    let len = records.len();

    let paths: ArrayRef = Arc::new(StringArray::from(
        records
            .iter()
            .map(|r| Some(r.path.as_str()))
            .collect::<Vec<_>>(),
    ));

    let hashes: ArrayRef = Arc::new(StringArray::from(
        records.iter().map(|r| r.hash.as_deref()).collect::<Vec<_>>(),
    ));

    let sizes: ArrayRef = Arc::new(UInt64Array::from(
        records.iter().map(|r| Some(r.size)).collect::<Vec<_>>(),
    ));

    let meta_roots: ArrayRef = Arc::new(StringArray::from(vec![None::<&str>; len]));
    let meta_scanned: ArrayRef = Arc::new(StringArray::from(vec![None::<&str>; len]));
    let meta_algorithms: ArrayRef = Arc::new(StringArray::from(vec![None::<&str>; len]));

    RecordBatch::try_new(
        schema.clone(),
        vec![
            paths,
            hashes,
            sizes,
            meta_roots,
            meta_scanned,
            meta_algorithms,
        ],
    )
    .map_err(Error::other)
}

fn create_metadata_batch(schema: &Arc<Schema>, meta: &CacheMeta) -> Result<RecordBatch> {
    let paths: ArrayRef = Arc::new(StringArray::from(vec![None::<&str>; 1]));
    let hashes: ArrayRef = Arc::new(StringArray::from(vec![None::<&str>; 1]));
    let sizes: ArrayRef = Arc::new(UInt64Array::from(vec![None::<u64>; 1]));

    let meta_roots: ArrayRef = Arc::new(StringArray::from(vec![Some(meta.scan_root.as_str()); 1]));
    let meta_scanned: ArrayRef =
        Arc::new(StringArray::from(vec![Some(meta.scanned_at.as_str()); 1]));
    let meta_algorithms: ArrayRef = Arc::new(StringArray::from(vec![
        Some(meta.hash_algorithm.as_str());
        1
    ]));

    RecordBatch::try_new(
        schema.clone(),
        vec![
            paths,
            hashes,
            sizes,
            meta_roots,
            meta_scanned,
            meta_algorithms,
        ],
    )
    .map_err(Error::other)
}

fn extract_metadata(batch: &RecordBatch, row: usize) -> Result<CacheMeta> {
    let scan_root = get_string_value(batch, "meta_scan_root", row)?
        .ok_or_else(|| Error::new(ErrorKind::InvalidData, "Missing scan_root"))?;
    let scanned_at = get_string_value(batch, "meta_scanned_at", row)?
        .ok_or_else(|| Error::new(ErrorKind::InvalidData, "Missing scanned_at"))?;
    let hash_algorithm = get_string_value(batch, "meta_hash_algorithm", row)?
        .ok_or_else(|| Error::new(ErrorKind::InvalidData, "Missing hash_algorithm"))?;

    Ok(CacheMeta {
        scan_root,
        scanned_at,
        hash_algorithm,
    })
}

fn get_string_value(batch: &RecordBatch, col_name: &str, row: usize) -> Result<Option<String>> {
    let col = batch.column_by_name(col_name).ok_or_else(|| {
        Error::new(ErrorKind::InvalidData, format!("Missing column: {col_name}"))
    })?;

    let array = col.as_any().downcast_ref::<StringArray>().ok_or_else(|| {
        Error::new(ErrorKind::InvalidData, format!("Invalid type for: {col_name}"))
    })?;

    if array.is_null(row) {
        Ok(None)
    } else {
        Ok(Some(array.value(row).to_string()))
    }
}

fn get_u64_value(batch: &RecordBatch, col_name: &str, row: usize) -> Result<Option<u64>> {
    let col = batch.column_by_name(col_name).ok_or_else(|| {
        Error::new(ErrorKind::InvalidData, format!("Missing column: {col_name}"))
    })?;

    let array = col.as_any().downcast_ref::<UInt64Array>().ok_or_else(|| {
        Error::new(ErrorKind::InvalidData, format!("Invalid type for: {col_name}"))
    })?;

    if array.is_null(row) {
        Ok(None)
    } else {
        Ok(Some(array.value(row)))
    }
}
