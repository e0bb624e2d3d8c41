//! Hazard exclusion
//!
//! With the default edge test a candidate is hazardous when one
//! of its vertical edges lies strictly inside the hazard's x-span and one of
//! its horizontal edges lies strictly inside the hazard's y-span. Candidates
//! that fully enclose a hazard, or only share an edge with it, pass.

use super::bbox::BoundingBox;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardOverlap {
    /// Strict-inequality edge test
    #[default]
    EdgeInside,
    /// Any positive-area rectangle intersection
    Intersects,
}

impl HazardOverlap {
    pub fn overlaps(self, candidate: &BoundingBox, hazard: &BoundingBox) -> bool {
        match self {
            HazardOverlap::EdgeInside => {
                let x_edge = strictly_inside(candidate.x1(), hazard.x1(), hazard.x2())
                    || strictly_inside(candidate.x2(), hazard.x1(), hazard.x2());
                let y_edge = strictly_inside(candidate.y1(), hazard.y1(), hazard.y2())
                    || strictly_inside(candidate.y2(), hazard.y1(), hazard.y2());
                x_edge && y_edge
            }
            HazardOverlap::Intersects => candidate.intersects(hazard),
        }
    }
}

fn strictly_inside(value: i32, low: i32, high: i32) -> bool {
    low < value && value < high
}

/// Check a single candidate against every hazard box
pub fn overlaps_hazard(candidate: &BoundingBox, hazards: &[BoundingBox], mode: HazardOverlap) -> bool {
    hazards.iter().any(|hazard| mode.overlaps(candidate, hazard))
}

/// Keep the candidates that no hazard box catches, using the edge test.
pub fn exclude_hazards(candidates: &[BoundingBox], hazards: &[BoundingBox]) -> Vec<BoundingBox> {
    candidates
        .iter()
        .filter(|candidate| !overlaps_hazard(candidate, hazards, HazardOverlap::EdgeInside))
        .copied()
        .collect()
}
