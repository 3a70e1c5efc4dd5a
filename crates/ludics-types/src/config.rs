// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Ludics Kernel Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{LudicsError, LudicsResult};

/// Runtime configuration for the Ludics Kernel.
///
/// Every long-running computation is bounded by a field here.
/// Hitting a bound is an inconclusive result, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LudicsConfig {
    /// Maximum pairs recorded by one interaction before it is cut off.
    /// Default: 1024.
    pub max_pairs: usize,

    /// Maximum acts visited while extracting chronicles from one design.
    /// Default: 4096.
    pub chronicle_max_steps: usize,

    /// Maximum rounds of view extraction during saturation closure.
    /// Default: 16.
    pub saturation_max_iterations: usize,

    /// Report saturation as inferred when innocence already holds.
    /// Default: true.
    pub shortcut_saturation: bool,

    /// Fixed confidence attached to structural type inference.
    /// Default: 0.6.
    pub structural_confidence: f64,

    /// Confidence floor for behavioural inference against an empty-ish corpus.
    /// Default: 0.75.
    pub behavioural_base_confidence: f64,

    /// Depth of the universal arena (root has depth 1).
    /// Default: 4.
    pub arena_max_depth: usize,

    /// Children per arena address.
    /// Default: 2.
    pub arena_max_branching: u32,

    /// Per-game move cap; reaching it ends the game in a draw.
    /// Default: 64.
    pub max_moves: usize,

    /// Per-game wall-clock cap in milliseconds; reaching it is a draw.
    /// Default: 1000.
    pub timeout_ms: u64,

    /// Default number of games in a batch run.
    /// Default: 10.
    pub game_count: usize,

    /// Base seed for simulation RNGs.
    /// Default: 42.
    pub seed: u64,
}

impl Default for LudicsConfig {
    fn default() -> Self {
        Self {
            max_pairs: 1024,
            chronicle_max_steps: 4096,
            saturation_max_iterations: 16,
            shortcut_saturation: true,
            structural_confidence: 0.6,
            behavioural_base_confidence: 0.75,
            arena_max_depth: 4,
            arena_max_branching: 2,
            max_moves: 64,
            timeout_ms: 1000,
            game_count: 10,
            seed: 42,
        }
    }
}

impl LudicsConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> LudicsResult<()> {
        if self.max_pairs == 0 {
            return Err(LudicsError::Config("max_pairs must be >= 1".to_string()));
        }
        if self.chronicle_max_steps == 0 {
            return Err(LudicsError::Config(
                "chronicle_max_steps must be >= 1".to_string(),
            ));
        }
        if self.saturation_max_iterations == 0 {
            return Err(LudicsError::Config(
                "saturation_max_iterations must be >= 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.structural_confidence) {
            return Err(LudicsError::Config(format!(
                "structural_confidence must be in [0, 1], got {}",
                self.structural_confidence
            )));
        }
        if !(0.0..=1.0).contains(&self.behavioural_base_confidence) {
            return Err(LudicsError::Config(format!(
                "behavioural_base_confidence must be in [0, 1], got {}",
                self.behavioural_base_confidence
            )));
        }
        if self.structural_confidence >= self.behavioural_base_confidence {
            return Err(LudicsError::Config(format!(
                "structural_confidence ({}) must be below behavioural_base_confidence ({})",
                self.structural_confidence, self.behavioural_base_confidence
            )));
        }
        if self.arena_max_depth == 0 {
            return Err(LudicsError::Config(
                "arena_max_depth must be >= 1".to_string(),
            ));
        }
        if self.arena_max_branching == 0 {
            return Err(LudicsError::Config(
                "arena_max_branching must be >= 1".to_string(),
            ));
        }
        if self.max_moves == 0 {
            return Err(LudicsError::Config("max_moves must be >= 1".to_string()));
        }
        if self.timeout_ms == 0 {
            return Err(LudicsError::Config("timeout_ms must be > 0".to_string()));
        }
        Ok(())
    }

    /// Load from JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> LudicsResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| LudicsError::Config(format!("JSON parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(LudicsConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_max_pairs_rejected() {
        let config = LudicsConfig {
            max_pairs: 0,
            ..LudicsConfig::default()
        };
        assert!(matches!(config.validate(), Err(LudicsError::Config(_))));
    }

    #[test]
    fn test_confidence_ordering_enforced() {
        let config = LudicsConfig {
            structural_confidence: 0.9,
            behavioural_base_confidence: 0.8,
            ..LudicsConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("structural_confidence"));
    }

    #[test]
    fn test_confidence_out_of_range() {
        let config = LudicsConfig {
            behavioural_base_confidence: 1.5,
            ..LudicsConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_partial() {
        let config = LudicsConfig::from_json(r#"{"max_pairs": 8, "seed": 7}"#).unwrap();
        assert_eq!(config.max_pairs, 8);
        assert_eq!(config.seed, 7);
        assert_eq!(config.game_count, 10);
    }

    #[test]
    fn test_from_json_invalid() {
        let err = LudicsConfig::from_json("{not json").unwrap_err();
        assert!(err.to_string().contains("JSON parse error"));
    }

    #[test]
    fn test_from_json_validates() {
        assert!(LudicsConfig::from_json(r#"{"timeout_ms": 0}"#).is_err());
    }
}
