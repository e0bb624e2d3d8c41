//! Runtime configuration
//!
//! Every field has a default, so a config file only needs to name what it
//! changes. Durations are given in milliseconds.

use crate::sweeper::error::{ConfigError, ConfigResult};
use crate::sweeper::ledger::DEFAULT_LEDGER_CAPACITY;
use crate::sweeper::match_image::{MatchConfig, ScreenRegion, TemplatePaths};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Waits used by the region workers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pacing {
    /// Pause after each full pass over the templates
    pub tick_interval_ms: u64,
    /// Pause after every dispatched click
    pub click_settle_ms: u64,
    /// Pause after a failed capture before trying again
    pub capture_retry_ms: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            tick_interval_ms: 50,
            click_settle_ms: 10,
            capture_retry_ms: 50,
        }
    }
}

impl Pacing {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn click_settle(&self) -> Duration {
        Duration::from_millis(self.click_settle_ms)
    }

    pub fn capture_retry(&self) -> Duration {
        Duration::from_millis(self.capture_retry_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweeperConfig {
    /// Screen area split into four quadrants, one worker each
    pub capture_area: ScreenRegion,
    pub templates: TemplatePaths,
    pub matching: MatchConfig,
    pub pacing: Pacing,
    /// Most recent distinct click points remembered for deduplication
    pub ledger_capacity: usize,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            capture_area: ScreenRegion::new(770, 222, 375, 605, "capture_area"),
            templates: TemplatePaths::default(),
            matching: MatchConfig::default(),
            pacing: Pacing::default(),
            ledger_capacity: DEFAULT_LEDGER_CAPACITY,
        }
    }
}

impl SweeperConfig {
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: SweeperConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> ConfigResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> ConfigResult<()> {
        let area = &self.capture_area;
        if area.width < 2 || area.height < 2 {
            return Err(ConfigError::invalid(format!(
                "capture area {area} is too small to split into quadrants"
            )));
        }

        let matching = &self.matching;
        if matching.scale_factors.is_empty() {
            return Err(ConfigError::invalid("at least one scale factor is required"));
        }
        if let Some(scale) = matching
            .scale_factors
            .iter()
            .find(|s| !s.is_finite() || **s <= 0.0)
        {
            return Err(ConfigError::invalid(format!(
                "scale factor {scale} must be a positive number"
            )));
        }
        if !(matching.score_threshold > 0.0 && matching.score_threshold <= 1.0) {
            return Err(ConfigError::invalid(format!(
                "score threshold {} must be in (0, 1]",
                matching.score_threshold
            )));
        }
        if !(0.0..=1.0).contains(&matching.overlap_threshold) {
            return Err(ConfigError::invalid(format!(
                "overlap threshold {} must be in [0, 1]",
                matching.overlap_threshold
            )));
        }

        if self.ledger_capacity == 0 {
            return Err(ConfigError::invalid("ledger capacity must be at least 1"));
        }
        if self.templates.targets.is_empty() {
            return Err(ConfigError::invalid("at least one target template is required"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweeper::match_image::SuppressionOrder;

    #[test]
    fn test_defaults_are_valid() {
        let config = SweeperConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.capture_area, ScreenRegion::new(770, 222, 375, 605, "capture_area"));
        assert_eq!(config.ledger_capacity, 100);
        assert_eq!(config.pacing.tick_interval(), Duration::from_millis(50));
        assert_eq!(config.pacing.click_settle(), Duration::from_millis(10));
    }

    #[test]
    fn test_empty_json_is_default() {
        let config = SweeperConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SweeperConfig::default());
    }

    #[test]
    fn test_json_overrides() {
        let config = SweeperConfig::from_json_str(
            r#"{
                "capture_area": {"x": 0, "y": 0, "width": 800, "height": 600},
                "matching": {"scale_factors": [1.0], "suppression_order": "bottom_edge"},
                "pacing": {"tick_interval_ms": 20},
                "ledger_capacity": 10,
                "templates": {"hazard": "assets/bomb.png", "targets": ["assets/coin.png"]}
            }"#,
        )
        .unwrap();

        assert_eq!(config.capture_area.width, 800);
        assert_eq!(config.capture_area.name, "");
        assert_eq!(config.matching.scale_factors, vec![1.0]);
        assert_eq!(config.matching.suppression_order, SuppressionOrder::BottomEdge);
        assert_eq!(config.matching.score_threshold, 0.8);
        assert_eq!(config.pacing.tick_interval_ms, 20);
        assert_eq!(config.pacing.click_settle_ms, 10);
        assert_eq!(config.ledger_capacity, 10);
        assert_eq!(config.templates.targets.len(), 1);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let cases = [
            r#"{"matching": {"scale_factors": []}}"#,
            r#"{"matching": {"scale_factors": [1.0, -0.5]}}"#,
            r#"{"matching": {"score_threshold": 0.0}}"#,
            r#"{"matching": {"overlap_threshold": 1.5}}"#,
            r#"{"ledger_capacity": 0}"#,
            r#"{"capture_area": {"x": 0, "y": 0, "width": 1, "height": 100}}"#,
            r#"{"templates": {"hazard": "bomb.png", "targets": []}}"#,
        ];

        for json in cases {
            let err = SweeperConfig::from_json_str(json).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { .. }), "{json}: {err}");
        }
    }

    #[test]
    fn test_target_count() {
        assert_eq!(SweeperConfig::default().templates.targets.len(), 2);

        let single = SweeperConfig::from_json_str(
            r#"{"templates": {"hazard": "bomb.png", "targets": ["coins.png"]}}"#,
        )
        .unwrap();
        assert_eq!(single.templates.targets.len(), 1);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = SweeperConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = SweeperConfig::from_json_file(Path::new("no/such/sweeper.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
