//! Detection strategies and mode dispatch.
//!
//! Two interchangeable strategies sit behind [`EmotionDetector`]: the
//! geometric rule engine over landmark sets, and an adapter around an
//! external deep expression model that consumes opaque video frames. The
//! adapter trusts the model's output as-is and degrades to a sentinel
//! result when the backend cannot load or run, so a scanning loop never
//! sees a panic or an error from either strategy.

use crate::classifier::{EmotionClassifier, EmotionLabel, EmotionResult};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::features::extract_features;
use crate::landmarks::Point;
use crate::smoother::EmotionSmoother;
use log::warn;
use std::str::FromStr;

/// Which detection strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionMode {
    /// Geometric rule engine over face-mesh landmarks
    Rule,
    /// External deep expression model over raw frames
    Deep,
}

impl FromStr for DetectionMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "rule" => Ok(Self::Rule),
            "deep" => Ok(Self::Deep),
            other => Err(Error::DetectorError(format!("Unknown detection mode: {other}"))),
        }
    }
}

/// An opaque captured video frame, handed through to the deep backend.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub width: u32,
    pub height: u32,
    /// Packed RGB pixel data
    pub data: Vec<u8>,
}

/// Per-frame input, one variant per strategy.
#[derive(Debug, Clone, Copy)]
pub enum ScanInput<'a> {
    Landmarks(&'a [Point]),
    Frame(&'a VideoFrame),
}

/// Trait for all emotion detection strategies
pub trait EmotionDetector: Send {
    /// Produce a result for one captured frame. Never fails: every failure
    /// mode is encoded as a sentinel result.
    fn detect(&mut self, input: &ScanInput<'_>) -> EmotionResult;

    /// Reset per-session state (smoothing history)
    fn reset(&mut self);

    /// Get strategy name
    fn name(&self) -> &str;
}

/// Geometric rule-engine strategy: extraction, classification, optional
/// smoothing.
#[derive(Debug, Clone)]
pub struct RuleDetector {
    classifier: EmotionClassifier,
    smoother: Option<EmotionSmoother>,
}

impl RuleDetector {
    /// Build from configuration; smoothing is attached when enabled there.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let smoother = config
            .smoothing
            .enabled
            .then(|| EmotionSmoother::new(config.smoothing.window));
        Self {
            classifier: EmotionClassifier::new(config.rules.clone()),
            smoother,
        }
    }

    /// Classify one landmark set.
    ///
    /// Extraction failures ("no face", "unknown") bypass the smoother so a
    /// dropout is reported immediately rather than voted away.
    pub fn predict(&mut self, landmarks: &[Point]) -> EmotionResult {
        match extract_features(landmarks) {
            Ok(features) => {
                let result = self.classifier.classify(&features);
                match &mut self.smoother {
                    Some(smoother) => smoother.push(result),
                    None => result,
                }
            }
            Err(failure) => failure.into(),
        }
    }
}

impl Default for RuleDetector {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl EmotionDetector for RuleDetector {
    fn detect(&mut self, input: &ScanInput<'_>) -> EmotionResult {
        match input {
            ScanInput::Landmarks(landmarks) => self.predict(landmarks),
            ScanInput::Frame(_) => {
                warn!("rule detector received a raw frame, no landmarks to measure");
                EmotionResult::no_face()
            }
        }
    }

    fn reset(&mut self) {
        if let Some(smoother) = &mut self.smoother {
            smoother.reset();
        }
    }

    fn name(&self) -> &str {
        "rule"
    }
}

/// One expression probability reported by a deep backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionScore {
    /// Backend's expression name, e.g. "happy"
    pub expression: String,
    /// Probability in `[0, 1]`
    pub probability: f32,
}

/// Boundary to an external deep face-expression model.
///
/// Implementations wrap whatever inference backend the embedding
/// application links in. Loading is lazy and may fail; both failure paths
/// are absorbed by [`DeepDetector`].
pub trait ExpressionModel: Send {
    /// Load model weights if not already loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is missing or its weights cannot be
    /// loaded.
    fn ensure_loaded(&mut self) -> Result<()>;

    /// Score expressions for one frame. An empty score list means no face
    /// was found in the frame.
    ///
    /// # Errors
    ///
    /// Returns an error if inference fails.
    fn predict(&mut self, frame: &VideoFrame) -> Result<Vec<ExpressionScore>>;

    /// Get backend name
    fn name(&self) -> &str;
}

/// Placeholder backend used when no deep model is wired into the build.
/// Always reports the model as unavailable.
pub struct UnavailableModel;

impl ExpressionModel for UnavailableModel {
    fn ensure_loaded(&mut self) -> Result<()> {
        Err(Error::ModelError(
            "no deep expression backend is linked into this build".to_string(),
        ))
    }

    fn predict(&mut self, _frame: &VideoFrame) -> Result<Vec<ExpressionScore>> {
        Err(Error::ModelError(
            "no deep expression backend is linked into this build".to_string(),
        ))
    }

    fn name(&self) -> &str {
        "unavailable"
    }
}

/// Adapter strategy around an [`ExpressionModel`].
pub struct DeepDetector<M: ExpressionModel> {
    model: M,
}

impl<M: ExpressionModel> DeepDetector<M> {
    #[must_use]
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Run the deep backend on one frame and map its output into an
    /// [`EmotionResult`].
    ///
    /// Backend failures map to the "Deep model not available" sentinel;
    /// an empty score list maps to "no face"; an expression name outside
    /// the vocabulary maps to "unknown".
    pub fn predict(&mut self, frame: &VideoFrame) -> EmotionResult {
        if let Err(e) = self.model.ensure_loaded() {
            warn!("deep expression model failed to load: {e}");
            return EmotionResult::deep_model_unavailable();
        }

        let scores = match self.model.predict(frame) {
            Ok(scores) => scores,
            Err(e) => {
                warn!("deep expression model inference failed: {e}");
                return EmotionResult::deep_model_unavailable();
            }
        };

        let best = scores.iter().max_by(|a, b| {
            a.probability
                .partial_cmp(&b.probability)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        match best {
            Some(score) => {
                let label = EmotionLabel::from_name(&score.expression).unwrap_or(EmotionLabel::Unknown);
                let confidence = (score.probability * 100.0).round().clamp(0.0, 100.0);
                EmotionResult::new(label, confidence)
            }
            None => EmotionResult::no_face(),
        }
    }
}

impl<M: ExpressionModel> EmotionDetector for DeepDetector<M> {
    fn detect(&mut self, input: &ScanInput<'_>) -> EmotionResult {
        match input {
            ScanInput::Frame(frame) => self.predict(frame),
            ScanInput::Landmarks(_) => {
                warn!("deep detector received landmarks, expected a raw frame");
                EmotionResult::no_face()
            }
        }
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        "deep"
    }
}

/// Create a detector by mode.
///
/// Deep mode is backed by [`UnavailableModel`] unless the caller wires in
/// a real backend via [`DeepDetector::new`]; its results then carry the
/// unavailability sentinel, which the UI reacts to by suggesting a mode
/// switch.
#[must_use]
pub fn create_detector(mode: DetectionMode, config: &Config) -> Box<dyn EmotionDetector> {
    match mode {
        DetectionMode::Rule => Box::new(RuleDetector::new(config)),
        DetectionMode::Deep => Box::new(DeepDetector::new(UnavailableModel)),
    }
}

/// One-shot dispatch with default configuration and no smoothing.
#[must_use]
pub fn detect_face_emotion(mode: DetectionMode, input: &ScanInput<'_>) -> EmotionResult {
    create_detector(mode, &Config::default()).detect(input)
}
