//! File I/O utilities with atomic writes
//!
//! Catalog files are rewritten whole on every save, so each write goes to a
//! sibling temp file first and is renamed over the target.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::HubError;

/// Read JSON from a file, returning a default value if the file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, HubError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| HubError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| HubError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), HubError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            HubError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| HubError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| HubError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| HubError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| HubError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        HubError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

/// Write `data` only when `path` does not exist yet. Returns whether it wrote.
pub fn write_json_if_absent<T, P>(path: P, data: &T) -> Result<bool, HubError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.exists() {
        return Ok(false);
    }
    write_json_atomic(path, data)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct Listing {
        name: String,
        rate: i64,
    }

    #[test]
    fn test_read_nonexistent_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let data: Listing = read_json(temp_dir.path().join("missing.json")).unwrap();
        assert_eq!(data, Listing::default());
    }

    #[test]
    fn test_write_then_read_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("listing.json");
        let data = Listing {
            name: "Ace Plumbing".into(),
            rate: 5500,
        };

        write_json_atomic(&path, &data).unwrap();

        let loaded: Listing = read_json(&path).unwrap();
        assert_eq!(loaded, data);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_write_if_absent_keeps_existing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("listing.json");
        let first = Listing {
            name: "first".into(),
            rate: 1,
        };
        let second = Listing {
            name: "second".into(),
            rate: 2,
        };

        assert!(write_json_if_absent(&path, &first).unwrap());
        assert!(!write_json_if_absent(&path, &second).unwrap());

        let loaded: Listing = read_json(&path).unwrap();
        assert_eq!(loaded.name, "first");
    }

    #[test]
    fn test_corrupt_file_is_a_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        fs::write(&path, "not json").unwrap();

        let result: Result<Listing, _> = read_json(&path);
        assert!(matches!(result, Err(HubError::Storage(_))));
    }
}
