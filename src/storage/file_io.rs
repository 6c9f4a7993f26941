//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't leave partial files behind.

use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

use crate::error::ExpenseError;

/// Read JSON from a file, returning an error if file doesn't exist
pub fn read_json_required<T, P>(path: P) -> Result<T, ExpenseError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Err(ExpenseError::Storage(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let file = File::open(path)
        .map_err(|e| ExpenseError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| ExpenseError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write bytes to a file atomically (write to a scratch file, then rename)
///
/// The scratch file is uniquely named inside the destination directory, so
/// concurrent writers never share it. It is removed on every failure path;
/// the destination is either fully written or untouched.
pub fn write_bytes_atomic<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<(), ExpenseError> {
    let path = path.as_ref();

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    fs::create_dir_all(parent).map_err(|e| {
        ExpenseError::Storage(format!(
            "Failed to create directory {}: {}",
            parent.display(),
            e
        ))
    })?;

    let mut scratch = NamedTempFile::new_in(parent)
        .map_err(|e| ExpenseError::Storage(format!("Failed to create temp file: {}", e)))?;

    scratch
        .write_all(bytes)
        .map_err(|e| ExpenseError::Storage(format!("Failed to write data: {}", e)))?;

    scratch
        .flush()
        .map_err(|e| ExpenseError::Storage(format!("Failed to flush data: {}", e)))?;

    // Sync to disk before rename
    scratch
        .as_file()
        .sync_all()
        .map_err(|e| ExpenseError::Storage(format!("Failed to sync data: {}", e)))?;

    scratch.persist(path).map_err(|e| {
        ExpenseError::Storage(format!(
            "Failed to move temp file to {}: {}",
            path.display(),
            e.error
        ))
    })?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote file");

    Ok(())
}
