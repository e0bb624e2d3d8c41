//! Screen rectangles scanned by the region workers

use crate::sweeper::types::ClickPoint;
use serde::{Deserialize, Serialize};

/// Absolute screen rectangle with a display name used in logs and reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenRegion {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub name: String,
}

impl ScreenRegion {
    pub fn new(x: i32, y: i32, width: u32, height: u32, name: impl Into<String>) -> Self {
        Self {
            x,
            y,
            width,
            height,
            name: name.into(),
        }
    }

    /// Translate a point local to this region into screen coordinates
    pub fn to_global(&self, local_x: i32, local_y: i32) -> ClickPoint {
        ClickPoint::new(self.x + local_x, self.y + local_y)
    }

    /// Split into four equal quadrants: top-left, top-right, bottom-left,
    /// bottom-right. Sizes are halved with integer division, so an odd
    /// trailing column or row is left out of every quadrant.
    pub fn quadrants(&self) -> [ScreenRegion; 4] {
        let half_w = self.width / 2;
        let half_h = self.height / 2;
        let mid_x = self.x + half_w as i32;
        let mid_y = self.y + half_h as i32;

        [
            ScreenRegion::new(self.x, self.y, half_w, half_h, "top_left"),
            ScreenRegion::new(mid_x, self.y, half_w, half_h, "top_right"),
            ScreenRegion::new(self.x, mid_y, half_w, half_h, "bottom_left"),
            ScreenRegion::new(mid_x, mid_y, half_w, half_h, "bottom_right"),
        ]
    }
}

impl std::fmt::Display for ScreenRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}[{},{},{},{}]",
            self.name, self.x, self.y, self.width, self.height
        )
    }
}
