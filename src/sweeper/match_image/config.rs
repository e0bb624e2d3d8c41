//! Configuration for image matching operations

use super::hazard::HazardOverlap;
use serde::{Deserialize, Serialize};

/// How the suppressor ranks candidates before the greedy pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuppressionOrder {
    /// Highest correlation first, bottom edge breaks ties
    #[default]
    Score,
    /// Lowest-on-screen box first, scores ignored
    BottomEdge,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Template resize factors, matched in order
    pub scale_factors: Vec<f32>,
    /// Minimum correlation for a location to become a candidate (-1.0 to 1.0)
    pub score_threshold: f32,
    /// Suppress a candidate once this share of its area is covered by a kept box
    pub overlap_threshold: f32,
    pub suppression_order: SuppressionOrder,
    pub hazard_overlap: HazardOverlap,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            scale_factors: vec![1.0, 0.9, 0.8, 1.1],
            score_threshold: 0.8,
            overlap_threshold: 0.3,
            suppression_order: SuppressionOrder::Score,
            hazard_overlap: HazardOverlap::EdgeInside,
        }
    }
}

impl MatchConfig {
    /// Single-scale matching, useful for fixed-size UI assets
    pub fn single_scale() -> Self {
        Self {
            scale_factors: vec![1.0],
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_config_defaults() {
        let config = MatchConfig::default();

        assert_eq!(config.scale_factors, vec![1.0, 0.9, 0.8, 1.1]);
        assert_eq!(config.score_threshold, 0.8);
        assert_eq!(config.overlap_threshold, 0.3);
        assert_eq!(config.suppression_order, SuppressionOrder::Score);
        assert_eq!(config.hazard_overlap, HazardOverlap::EdgeInside);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: MatchConfig =
            serde_json::from_str(r#"{"score_threshold": 0.9, "suppression_order": "bottom_edge"}"#)
                .unwrap();

        assert_eq!(config.score_threshold, 0.9);
        assert_eq!(config.suppression_order, SuppressionOrder::BottomEdge);
        assert_eq!(config.scale_factors.len(), 4);
    }
}
