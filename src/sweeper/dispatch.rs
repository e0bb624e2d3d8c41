//! Click dispatch

use super::match_image::{BoundingBox, ScreenRegion};
use super::types::ClickPoint;
use crate::screen::{InputError, InputResult, PointerInjector};
use std::sync::Arc;
use tokio::time::{Duration, sleep};

/// Global click target for a box found inside `region`'s frame
pub fn click_point(region: &ScreenRegion, bbox: &BoundingBox) -> ClickPoint {
    let (cx, cy) = bbox.center();
    region.to_global(cx, cy)
}

/// Issues clicks through the pointer backend, pausing briefly after each one
/// so back-to-back synthetic events do not flood the input subsystem.
#[derive(Clone)]
pub struct Dispatcher {
    pointer: Arc<dyn PointerInjector>,
    settle: Duration,
}

impl Dispatcher {
    pub fn new(pointer: Arc<dyn PointerInjector>, settle: Duration) -> Self {
        Self { pointer, settle }
    }

    /// Press and release at `point` on the blocking pool, then wait the
    /// settle delay
    pub async fn click(&self, point: ClickPoint) -> InputResult<()> {
        let pointer = Arc::clone(&self.pointer);
        tokio::task::spawn_blocking(move || pointer.click(point.x, point.y))
            .await
            .map_err(|e| InputError::TaskFailed {
                x: point.x,
                y: point.y,
                description: e.to_string(),
            })??;
        sleep(self.settle).await;
        Ok(())
    }
}
