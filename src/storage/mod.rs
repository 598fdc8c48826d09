//! Workbook and snapshot persistence
//!
//! JSON files with atomic writes (temp file, then rename), so a crash
//! mid-save never corrupts the workbook that drives the next run.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{SyncError, SyncResult};
use crate::grid::Workbook;
use crate::platform::PlatformSnapshot;

/// Read JSON from a file that must exist
pub fn read_json<T, P>(path: P) -> SyncResult<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Err(SyncError::Storage(format!(
            "File not found: {}",
            path.display()
        )));
    }
    let file = File::open(path)
        .map_err(|e| SyncError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| SyncError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> SyncResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            SyncError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // The temp file must live in the same directory for the rename to be
    // atomic.
    let temp_path = path.with_extension("json.tmp");
    let file = File::create(&temp_path)
        .map_err(|e| SyncError::Storage(format!("Failed to create temp file: {}", e)))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| SyncError::Storage(format!("Failed to serialize data: {}", e)))?;
    writer
        .flush()
        .map_err(|e| SyncError::Storage(format!("Failed to flush data: {}", e)))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| SyncError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        SyncError::Storage(format!("Failed to rename temp file: {}", e))
    })
}

pub fn load_workbook(path: &Path) -> SyncResult<Workbook> {
    read_json(path)
}

pub fn save_workbook(path: &Path, workbook: &Workbook) -> SyncResult<()> {
    write_json_atomic(path, workbook)
}

pub fn load_snapshot(path: &Path) -> SyncResult<PlatformSnapshot> {
    read_json(path)
}

pub fn save_snapshot(path: &Path, snapshot: &PlatformSnapshot) -> SyncResult<()> {
    write_json_atomic(path, snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let result: SyncResult<Workbook> = read_json(temp_dir.path().join("absent.json"));
        assert!(matches!(result, Err(SyncError::Storage(_))));
    }

    #[test]
    fn test_workbook_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("workbook.json");

        let workbook =
            Workbook::new().with_tab("KeySheet", vec![vec!["Zone".to_string()]]);
        save_workbook(&path, &workbook).unwrap();

        let loaded = load_workbook(&path).unwrap();
        assert_eq!(loaded.rows("KeySheet"), workbook.rows("KeySheet"));
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("workbook.json");
        save_workbook(&path, &Workbook::new()).unwrap();
        assert!(path.exists());
        assert!(!temp_dir.path().join("workbook.json.tmp").exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("wb.json");
        save_workbook(&path, &Workbook::new()).unwrap();
        assert!(path.exists());
    }
}
