//! Snapshot file provider.
//!
//! Reads a [`FleetSnapshot`] from a JSON export and re-reads it whenever
//! the file's mtime changes, so an exporter rewriting the file in place
//! behaves like a slow live feed. A failed re-read keeps the last good
//! snapshot; the viewer shows the error and stale data beats no data.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, warn};

use crate::model::FleetSnapshot;

use super::{FleetProvider, ProviderError};

/// File-backed snapshot source.
#[derive(Debug)]
pub struct SnapshotFile {
    path: PathBuf,
    snapshot: Option<FleetSnapshot>,
    /// mtime of the last successfully parsed read.
    loaded_mtime: Option<SystemTime>,
}

impl SnapshotFile {
    /// Opens and eagerly parses the export; the initial read must succeed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ProviderError> {
        let mut provider = SnapshotFile {
            path: path.as_ref().to_path_buf(),
            snapshot: None,
            loaded_mtime: None,
        };
        let mtime = provider.read_mtime()?;
        provider.load(mtime)?;
        Ok(provider)
    }

    fn read_mtime(&self) -> Result<SystemTime, ProviderError> {
        std::fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .map_err(|e| ProviderError::Io(format!("{}: {e}", self.path.display())))
    }

    /// Parses the file and installs the result; only a full success
    /// replaces the current snapshot.
    fn load(&mut self, mtime: SystemTime) -> Result<(), ProviderError> {
        let data = std::fs::read_to_string(&self.path)
            .map_err(|e| ProviderError::Io(format!("{}: {e}", self.path.display())))?;
        let snapshot: FleetSnapshot = serde_json::from_str(&data)
            .map_err(|e| ProviderError::Parse(format!("{}: {e}", self.path.display())))?;

        debug!(
            path = %self.path.display(),
            resources = snapshot.resources.len(),
            generated_at = snapshot.generated_at,
            "snapshot loaded"
        );
        self.snapshot = Some(snapshot);
        self.loaded_mtime = Some(mtime);
        Ok(())
    }
}

impl FleetProvider for SnapshotFile {
    fn current(&self) -> Option<&FleetSnapshot> {
        self.snapshot.as_ref()
    }

    fn refresh(&mut self) -> Result<bool, ProviderError> {
        let mtime = self.read_mtime()?;
        if Some(mtime) == self.loaded_mtime {
            return Ok(false);
        }
        match self.load(mtime) {
            Ok(()) => Ok(true),
            Err(e) => {
                warn!(error = %e, "snapshot reload failed, keeping previous data");
                Err(e)
            }
        }
    }

    fn describe(&self) -> String {
        format!("snapshot {}", self.path.display())
    }

    fn is_live(&self) -> bool {
        false
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
