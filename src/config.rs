//! Configuration management for the emotion estimation pipeline.
//!
//! Every hand-tuned rule threshold lives here in one serializable
//! structure, so future tuning touches data rather than control flow.
//! Confidence formula coefficients and caps stay fixed in the classifier.

use crate::constants::DEFAULT_SMOOTHING_WINDOW;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pipeline configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rule trigger thresholds
    pub rules: RuleThresholds,

    /// Temporal smoothing configuration
    pub smoothing: SmoothingConfig,

    /// Emit per-frame feature values while processing (diagnostic only,
    /// no effect on results)
    pub debug: bool,
}

/// Trigger thresholds for the emotion rules.
///
/// All values compare against dimensionless feature ratios. The defaults
/// are the hand-tuned constants the rules were calibrated with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleThresholds {
    /// Mouth curvature below this (corners raised) reads as a smile
    pub smile_curvature: f32,
    /// Minimum mouth width for a smile
    pub smile_width: f32,

    /// Minimum brow raise for surprise
    pub surprise_brow_raise: f32,
    /// Minimum eye openness for surprise
    pub surprise_eye_openness: f32,
    /// Maximum mouth height for surprise
    pub surprise_mouth_height: f32,
    /// Maximum brow angle for surprise
    pub surprise_brow_angle: f32,
    /// Fallback: brow angle above this with an extreme raise is surprise
    pub surprise_fallback_brow_angle: f32,
    /// Fallback: minimum brow raise
    pub surprise_fallback_brow_raise: f32,

    /// Minimum brow angle for anger
    pub anger_brow_angle: f32,
    /// Maximum eye openness for anger
    pub anger_eye_openness: f32,
    /// Minimum brow raise for anger
    pub anger_brow_raise: f32,

    /// Minimum mouth curvature (drooping corners) for sadness
    pub sad_curvature: f32,
    /// Droopy-eye openness band for sadness
    pub sad_eye_openness_min: f32,
    pub sad_eye_openness_max: f32,

    /// Fear trigger thresholds
    pub fear_brow_raise: f32,
    pub fear_eye_openness: f32,
    pub fear_mouth_width: f32,
    pub fear_mouth_height: f32,

    /// Disgust trigger thresholds
    pub disgust_nostril_flare: f32,
    pub disgust_eye_openness: f32,
    pub disgust_curvature: f32,

    /// Contempt trigger thresholds
    pub contempt_asymmetry: f32,
    pub contempt_mouth_width: f32,
    pub contempt_eye_openness: f32,
}

/// Temporal smoothing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Enable majority-vote smoothing
    pub enabled: bool,

    /// Window size in frames
    pub window: usize,
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self {
            smile_curvature: -0.02,
            smile_width: 0.22,
            surprise_brow_raise: 0.025,
            surprise_eye_openness: 0.055,
            surprise_mouth_height: 0.006,
            surprise_brow_angle: 1.2,
            surprise_fallback_brow_angle: 1.0,
            surprise_fallback_brow_raise: 0.28,
            anger_brow_angle: 0.5,
            anger_eye_openness: 0.15,
            anger_brow_raise: 0.1,
            sad_curvature: 0.01,
            sad_eye_openness_min: 0.065,
            sad_eye_openness_max: 0.085,
            fear_brow_raise: 0.018,
            fear_eye_openness: 0.013,
            fear_mouth_width: 0.032,
            fear_mouth_height: 0.005,
            disgust_nostril_flare: 0.022,
            disgust_eye_openness: 0.011,
            disgust_curvature: 0.0005,
            contempt_asymmetry: 0.002,
            contempt_mouth_width: 0.025,
            contempt_eye_openness: 0.013,
        }
    }
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            window: DEFAULT_SMOOTHING_WINDOW,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid field found.
    pub fn validate(&self) -> Result<()> {
        if self.smoothing.window == 0 {
            return Err(Error::ConfigError(
                "Smoothing window size must be greater than 0".to_string(),
            ));
        }

        let t = &self.rules;
        if t.smile_curvature >= 0.0 {
            return Err(Error::ConfigError(
                "Smile curvature threshold must be negative (corners above lip center)".to_string(),
            ));
        }
        if t.smile_width <= 0.0 {
            return Err(Error::ConfigError("Smile width threshold must be positive".to_string()));
        }
        if t.sad_eye_openness_min > t.sad_eye_openness_max {
            return Err(Error::ConfigError(
                "Sad eye openness band is inverted (min above max)".to_string(),
            ));
        }
        if t.anger_eye_openness <= 0.0 {
            return Err(Error::ConfigError(
                "Anger eye openness threshold must be positive".to_string(),
            ));
        }
        if t.surprise_brow_angle <= 0.0 {
            return Err(Error::ConfigError(
                "Surprise brow angle threshold must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Facial Emotion Estimation Configuration

# Rule trigger thresholds (dimensionless feature ratios)
rules:
  smile_curvature: -0.02
  smile_width: 0.22
  surprise_brow_raise: 0.025
  surprise_eye_openness: 0.055
  surprise_mouth_height: 0.006
  surprise_brow_angle: 1.2
  surprise_fallback_brow_angle: 1.0
  surprise_fallback_brow_raise: 0.28
  anger_brow_angle: 0.5
  anger_eye_openness: 0.15
  anger_brow_raise: 0.1
  sad_curvature: 0.01
  sad_eye_openness_min: 0.065
  sad_eye_openness_max: 0.085
  fear_brow_raise: 0.018
  fear_eye_openness: 0.013
  fear_mouth_width: 0.032
  fear_mouth_height: 0.005
  disgust_nostril_flare: 0.022
  disgust_eye_openness: 0.011
  disgust_curvature: 0.0005
  contempt_asymmetry: 0.002
  contempt_mouth_width: 0.025
  contempt_eye_openness: 0.013

# Temporal smoothing
smoothing:
  enabled: false
  window: 5

# Per-frame diagnostic logging
debug: false
"#;
