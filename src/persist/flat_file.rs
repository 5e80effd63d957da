//! Flat-file snapshot store.
//!
//! One JSON document per file:
//!
//! ```text
//! { "section": "blockCache", "version": 1, "saved_at": "<rfc3339>",
//!   "checksum": "<sha256d of entries>", "entries": [...] }
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CacheSnapshot, SnapshotStore, SNAPSHOT_VERSION};
use crate::cache::CacheEntry;
use crate::error::PersistError;
use crate::primitives::{sha256d, Hash256};

/// Default snapshot file name.
pub const DEFAULT_SNAPSHOT_FILE: &str = "blockcache.dat";

/// Default logical section name.
pub const DEFAULT_SECTION: &str = "blockCache";

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotFile {
    section: String,
    version: u32,
    saved_at: DateTime<Utc>,
    checksum: Hash256,
    entries: Vec<CacheEntry>,
}

fn checksum(entries: &[CacheEntry]) -> Result<Hash256, PersistError> {
    let bytes = serde_json::to_vec(entries)?;
    Ok(sha256d(&bytes))
}

// == Flat File Store ==
/// Writes snapshots to a single file, replacing it atomically.
#[derive(Debug, Clone)]
pub struct FlatFileStore {
    path: PathBuf,
    section: String,
}

impl FlatFileStore {
    /// Store at `path` using the default section name.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_section(path, DEFAULT_SECTION)
    }

    /// Store at `path` tagged with a custom section name.
    pub fn with_section(path: impl Into<PathBuf>, section: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            section: section.into(),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl SnapshotStore for FlatFileStore {
    fn write(&self, snapshot: &CacheSnapshot) -> Result<(), PersistError> {
        let file = SnapshotFile {
            section: self.section.clone(),
            version: snapshot.version,
            saved_at: Utc::now(),
            checksum: checksum(&snapshot.entries)?,
            entries: snapshot.entries.clone(),
        };
        let bytes = serde_json::to_vec(&file)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.tmp_path();
        let mut out = File::create(&tmp)?;
        out.write_all(&bytes)?;
        out.sync_all()?;
        drop(out);
        fs::rename(&tmp, &self.path)?;

        debug!(
            "Snapshot written to {} ({} entries, {} bytes)",
            self.path.display(),
            snapshot.len(),
            bytes.len()
        );
        Ok(())
    }

    fn read(&self) -> Result<Option<CacheSnapshot>, PersistError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let file: SnapshotFile = serde_json::from_slice(&bytes)?;

        if file.section != self.section {
            return Err(PersistError::SectionMismatch {
                expected: self.section.clone(),
                found: file.section,
            });
        }
        if file.version != SNAPSHOT_VERSION {
            return Err(PersistError::UnsupportedVersion {
                expected: SNAPSHOT_VERSION,
                found: file.version,
            });
        }
        if checksum(&file.entries)? != file.checksum {
            return Err(PersistError::ChecksumMismatch);
        }

        Ok(Some(CacheSnapshot {
            version: file.version,
            entries: file.entries,
        }))
    }

    fn location(&self) -> String {
        format!("{} [{}]", self.path.display(), self.section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn snapshot(n: u8) -> CacheSnapshot {
        CacheSnapshot::new(
            (0..n)
                .map(|i| CacheEntry::new(Hash256([i; 32]), Hash256([i ^ 0xaa; 32])))
                .collect(),
        )
    }

    #[test]
    fn test_missing_file_reads_none() {
        let dir = tempdir().unwrap();
        let store = FlatFileStore::new(dir.path().join("blockcache.dat"));
        assert!(store.read().unwrap().is_none());
    }

    #[test]
    fn test_write_then_read_preserves_order() {
        let dir = tempdir().unwrap();
        let store = FlatFileStore::new(dir.path().join("nested/blockcache.dat"));

        store.write(&snapshot(5)).unwrap();
        let loaded = store.read().unwrap().unwrap();

        assert_eq!(loaded, snapshot(5));
        assert!(!store.tmp_path().exists());
    }

    #[test]
    fn test_tampered_entries_fail_checksum() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blockcache.dat");
        let store = FlatFileStore::new(&path);
        store.write(&snapshot(2)).unwrap();

        let mut doc: serde_json::Value =
            serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        doc["entries"][0]["pow_hash"] = serde_json::json!("00".repeat(32));
        fs::write(&path, serde_json::to_vec(&doc).unwrap()).unwrap();

        assert!(matches!(store.read(), Err(PersistError::ChecksumMismatch)));
    }

    #[test]
    fn test_section_and_version_checked() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blockcache.dat");
        FlatFileStore::with_section(&path, "other").write(&snapshot(1)).unwrap();

        let store = FlatFileStore::new(&path);
        assert!(matches!(
            store.read(),
            Err(PersistError::SectionMismatch { .. })
        ));

        let mut old = snapshot(1);
        old.version = SNAPSHOT_VERSION + 1;
        store.write(&old).unwrap();
        let err = store.read().unwrap_err();
        assert!(matches!(
            err,
            PersistError::UnsupportedVersion { found, .. } if found == SNAPSHOT_VERSION + 1
        ));
        assert!(!err.is_corruption());
    }

    #[test]
    fn test_rewrite_replaces_whole_file() {
        let dir = tempdir().unwrap();
        let store = FlatFileStore::new(dir.path().join("blockcache.dat"));

        store.write(&snapshot(50)).unwrap();
        store.write(&snapshot(3)).unwrap();

        assert_eq!(store.read().unwrap().unwrap(), snapshot(3));
        assert!(!store.tmp_path().exists());
    }

    #[test]
    fn test_garbage_file_is_serialization_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blockcache.dat");
        fs::write(&path, b"not json").unwrap();
        assert!(matches!(
            FlatFileStore::new(&path).read(),
            Err(PersistError::Serialization(_))
        ));
    }
}
