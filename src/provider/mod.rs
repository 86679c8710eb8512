//! Provider abstraction for fleet snapshot sources.
//!
//! The viewer works against the [`FleetProvider`] trait so the same TUI
//! runs from a backend JSON export ([`SnapshotFile`]) or the built-in
//! deterministic fleet ([`DemoFleet`]).

mod demo;
mod file;

pub use demo::DemoFleet;
pub use file::SnapshotFile;

use crate::model::FleetSnapshot;

/// Errors a snapshot source can surface.
#[derive(Debug, Clone)]
pub enum ProviderError {
    /// I/O error while reading snapshot data.
    Io(String),
    /// Snapshot data exists but does not parse.
    Parse(String),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::Io(msg) => write!(f, "I/O error: {}", msg),
            ProviderError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Abstraction over fleet snapshot sources.
///
/// Object-safe; the viewer holds a `Box<dyn FleetProvider>` and polls
/// [`refresh`](FleetProvider::refresh) on every tick.
pub trait FleetProvider {
    /// Returns the current snapshot, if one has been loaded.
    fn current(&self) -> Option<&FleetSnapshot>;

    /// Polls the source for new data. Returns `true` when the snapshot
    /// changed. On failure the previous snapshot stays in place; callers
    /// surface the error and keep rendering stale data.
    fn refresh(&mut self) -> Result<bool, ProviderError>;

    /// Human description of the source for the header line.
    fn describe(&self) -> String;

    /// Whether the source produces new data between refreshes.
    fn is_live(&self) -> bool;
}
