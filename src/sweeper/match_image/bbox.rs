//! Pixel-space boxes and scored detections

use serde::Serialize;

/// Axis-aligned box with integer corners. `x2 > x1` and `y2 > y1` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BoundingBox {
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
}

impl BoundingBox {
    /// Create a box from its corners, `None` if it would be degenerate
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Option<Self> {
        (x2 > x1 && y2 > y1).then_some(Self { x1, y1, x2, y2 })
    }

    /// Create a box from its top-left corner and a non-zero size
    pub fn from_origin(x: i32, y: i32, width: u32, height: u32) -> Option<Self> {
        Self::new(x, y, x + width as i32, y + height as i32)
    }

    pub fn x1(&self) -> i32 {
        self.x1
    }

    pub fn y1(&self) -> i32 {
        self.y1
    }

    pub fn x2(&self) -> i32 {
        self.x2
    }

    pub fn y2(&self) -> i32 {
        self.y2
    }

    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    /// Centre point, rounded towards the top-left corner
    pub fn center(&self) -> (i32, i32) {
        (self.x1 + self.width() / 2, self.y1 + self.height() / 2)
    }

    /// Area counting both edge rows and columns as covered pixels.
    pub fn inclusive_area(&self) -> i64 {
        (self.width() as i64 + 1) * (self.height() as i64 + 1)
    }

    /// Inclusive-pixel intersection area, 0 when the boxes are apart
    pub fn inclusive_intersection(&self, other: &BoundingBox) -> i64 {
        let w = (self.x2.min(other.x2) - self.x1.max(other.x1) + 1).max(0) as i64;
        let h = (self.y2.min(other.y2) - self.y1.max(other.y1) + 1).max(0) as i64;
        w * h
    }

    /// Share of this box's own area covered by `other`
    pub fn overlap_ratio(&self, other: &BoundingBox) -> f32 {
        (self.inclusive_intersection(other) as f64 / self.inclusive_area() as f64) as f32
    }

    /// Exact open-interval rectangle intersection (touching edges do not count)
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.x1 < other.x2 && other.x1 < self.x2 && self.y1 < other.y2 && other.y1 < self.y2
    }
}

/// A candidate box together with the correlation score that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Detection {
    pub bbox: BoundingBox,
    /// Zero-mean normalized correlation in [-1, 1]
    pub score: f32,
    /// Scale factor the template was resized by
    pub scale: f32,
}

impl Detection {
    pub fn new(bbox: BoundingBox, score: f32, scale: f32) -> Self {
        Self { bbox, score, scale }
    }
}
