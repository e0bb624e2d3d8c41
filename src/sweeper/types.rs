// Types shared by the region workers and the engine
use serde::{Deserialize, Serialize};

/// Worker lifecycle. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Scanning,
    Stopped,
}

/// Absolute screen coordinate of a dispatched (or candidate) click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClickPoint {
    pub x: i32,
    pub y: i32,
}

impl ClickPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for ClickPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// What a worker did before it stopped
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkerReport {
    pub region: String,
    /// Loop passes, including ones that failed to capture
    pub iterations: u64,
    pub capture_failures: u64,
    pub clicks: u64,
    pub click_failures: u64,
    /// Detections skipped because the ledger already held their point
    pub duplicates: u64,
    /// Detections skipped because they overlapped a hazard
    pub hazard_skips: u64,
}

impl WorkerReport {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            ..Self::default()
        }
    }
}

impl std::fmt::Display for WorkerReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} iterations, {} clicks ({} failed), {} duplicates, {} hazard skips, {} capture failures",
            self.region,
            self.iterations,
            self.clicks,
            self.click_failures,
            self.duplicates,
            self.hazard_skips,
            self.capture_failures
        )
    }
}
