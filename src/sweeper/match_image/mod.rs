//! Image matching for the sweeper
//!
//! This module provides the detection half of the engine: multi-scale
//! correlation matching, greedy non-maximum suppression, hazard exclusion,
//! and the geometry types shared with the region workers.

pub mod bbox;
pub mod config;
pub mod detector;
pub mod hazard;
pub mod region;
pub mod suppress;
pub mod template;


// Re-export main types and functions
pub use bbox::{BoundingBox, Detection};
pub use config::{MatchConfig, SuppressionOrder};
pub use detector::{FrameScan, TargetHits, analyze_frame, boxes, correlation_surface, detect};
pub use hazard::{HazardOverlap, exclude_hazards, overlaps_hazard};
pub use region::ScreenRegion;
pub use suppress::{suppress, suppress_detections};
pub use template::{Template, TemplatePaths, TemplateSet};
