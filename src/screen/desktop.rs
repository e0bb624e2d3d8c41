//! Desktop backends: `xcap` for pixels, `enigo` for the pointer.
//!
//! Coordinates are taken as-is; on scaled (HiDPI) displays the capture area
//! has to be configured in the same pixel space the monitor reports.

use super::error::{CaptureError, CaptureResult, InputError, InputResult};
use super::types::{PointerInjector, ScreenCapture};
use crate::sweeper::match_image::ScreenRegion;
use enigo::{Button, Coordinate, Direction, Enigo, Mouse, Settings};
use image::RgbaImage;
use xcap::Monitor;

/// Captures the monitor that contains the region origin and crops it.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopCapture;

impl DesktopCapture {
    pub fn new() -> Self {
        Self
    }
}

impl ScreenCapture for DesktopCapture {
    fn capture(&self, region: &ScreenRegion) -> CaptureResult<RgbaImage> {
        let monitor = Monitor::from_point(region.x, region.y).map_err(|_| CaptureError::NoMonitor {
            x: region.x,
            y: region.y,
        })?;
        let monitor_x = monitor.x().map_err(CaptureError::backend)?;
        let monitor_y = monitor.y().map_err(CaptureError::backend)?;

        let screen = monitor.capture_image().map_err(CaptureError::backend)?;

        let left = region.x - monitor_x;
        let top = region.y - monitor_y;
        if left < 0
            || top < 0
            || left as u32 + region.width > screen.width()
            || top as u32 + region.height > screen.height()
        {
            return Err(CaptureError::OutOfBounds {
                region: region.name.clone(),
            });
        }

        let frame =
            image::imageops::crop_imm(&screen, left as u32, top as u32, region.width, region.height)
                .to_image();
        Ok(frame)
    }
}

/// Left-button clicks through a short-lived `Enigo` connection per click.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopPointer;

impl DesktopPointer {
    pub fn new() -> Self {
        Self
    }
}

impl PointerInjector for DesktopPointer {
    fn click(&self, x: i32, y: i32) -> InputResult<()> {
        let mut enigo = Enigo::new(&Settings::default()).map_err(|e| InputError::Unavailable {
            description: e.to_string(),
        })?;

        let event_failed = |e: enigo::InputError| InputError::EventFailed {
            x,
            y,
            description: e.to_string(),
        };
        enigo.move_mouse(x, y, Coordinate::Abs).map_err(event_failed)?;
        enigo.button(Button::Left, Direction::Press).map_err(event_failed)?;
        enigo.button(Button::Left, Direction::Release).map_err(event_failed)?;
        Ok(())
    }
}
