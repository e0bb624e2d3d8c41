// Capture and input seams consumed by the region workers
use crate::sweeper::match_image::ScreenRegion;
use image::RgbaImage;

use super::error::{CaptureResult, InputResult};

/// Source of colour snapshots for a screen rectangle.
///
/// Implementations are called from the blocking pool, one call per worker
/// iteration, so they may take a few milliseconds without stalling the runtime.
pub trait ScreenCapture: Send + Sync {
    /// Snapshot the given absolute rectangle. A transient failure should be
    /// reported as an error rather than a partially filled frame.
    fn capture(&self, region: &ScreenRegion) -> CaptureResult<RgbaImage>;
}

/// Synthetic pointer injection at absolute screen coordinates.
///
/// Like capture, clicks are issued from the blocking pool, so a backend may
/// open its connection per call.
pub trait PointerInjector: Send + Sync {
    /// Press then release the primary button at `(x, y)`.
    fn click(&self, x: i32, y: i32) -> InputResult<()>;
}
