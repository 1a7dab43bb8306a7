//! JSON file snapshot store.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::PharmacyError;
use crate::store::{Snapshot, SnapshotStore};

/// Default snapshot file name.
pub const DEFAULT_SNAPSHOT_FILE: &str = "pharmacy_data.json";

/// Snapshot store backed by a single JSON file.
///
/// Saves go to a temporary file in the same directory which is then
/// renamed over the target, so a crash mid-write leaves the previous
/// snapshot intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Option<Snapshot>, PharmacyError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no snapshot on disk");
                return Ok(None);
            }
            Err(e) => {
                return Err(PharmacyError::Io(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )))
            }
        };

        let snapshot: Snapshot = serde_json::from_str(&content).map_err(|e| {
            PharmacyError::Serialization(format!("failed to parse {}: {e}", self.path.display()))
        })?;
        debug!(
            path = %self.path.display(),
            products = snapshot.products.len(),
            "snapshot loaded"
        );
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), PharmacyError> {
        let dir = self.dir();
        fs::create_dir_all(dir)
            .map_err(|e| PharmacyError::Io(format!("failed to create {}: {e}", dir.display())))?;

        let data = serde_json::to_vec_pretty(snapshot)?;

        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| {
            PharmacyError::Io(format!("failed to create temp file in {}: {e}", dir.display()))
        })?;
        temp.write_all(&data)
            .and_then(|_| temp.as_file().sync_all())
            .map_err(|e| PharmacyError::Io(format!("failed to write snapshot temp file: {e}")))?;
        temp.persist(&self.path).map_err(|e| {
            PharmacyError::Io(format!(
                "failed to persist snapshot to {}: {e}",
                self.path.display()
            ))
        })?;

        debug!(path = %self.path.display(), bytes = data.len(), "snapshot saved");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
