//! Rule-based emotion classification over extracted facial features.
//!
//! The classifier is an ordered battery of independent predicate rules.
//! Every rule is evaluated unconditionally against the feature vector and
//! may emit a candidate; resolution happens afterwards in two stages.
//! Candidates at or above the resolution floor are ordered by a fixed
//! emotion priority (confidence only breaks ties), which keeps a weak
//! secondary match from overriding a strong primary one. If nothing
//! qualifies, the single most confident candidate is returned, so the
//! classifier always produces a decision.

use crate::config::RuleThresholds;
use crate::constants::{
    CONFIDENCE_MAX, NEUTRAL_CONFIDENCE, RESOLUTION_CONFIDENCE_FLOOR, WEAK_CANDIDATE_FLOOR,
};
use crate::features::{ExtractionFailure, FeatureVector};
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Confidence caps and formula coefficients, fixed per rule.
mod caps {
    pub const HAPPY: f32 = 95.0;
    pub const SURPRISED: f32 = 85.0;
    pub const SURPRISED_FALLBACK: f32 = 88.0;
    pub const ANGRY_MIN: f32 = 50.0;
    pub const ANGRY_MAX: f32 = 95.0;
    pub const SAD: f32 = 84.0;
    pub const FEARFUL: f32 = 78.0;
    pub const DISGUSTED: f32 = 75.0;
    pub const CONTEMPT: f32 = 72.0;
}

/// Output vocabulary of the detection pipeline.
///
/// The first eight variants are classifiable emotions; the rest are
/// sentinel outcomes the UI layer reacts to. Serialized forms match the
/// product's wire strings exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmotionLabel {
    #[serde(rename = "happy")]
    Happy,
    #[serde(rename = "sad")]
    Sad,
    #[serde(rename = "angry")]
    Angry,
    #[serde(rename = "surprised")]
    Surprised,
    #[serde(rename = "fearful")]
    Fearful,
    #[serde(rename = "disgusted")]
    Disgusted,
    #[serde(rename = "contempt")]
    Contempt,
    #[serde(rename = "neutral")]
    Neutral,
    #[serde(rename = "no face")]
    NoFace,
    #[serde(rename = "unknown")]
    Unknown,
    #[serde(rename = "Deep model not available")]
    DeepUnavailable,
}

/// Resolution priority among qualifying candidates, highest first.
pub const RESOLUTION_PRIORITY: [EmotionLabel; 8] = [
    EmotionLabel::Sad,
    EmotionLabel::Happy,
    EmotionLabel::Angry,
    EmotionLabel::Surprised,
    EmotionLabel::Fearful,
    EmotionLabel::Disgusted,
    EmotionLabel::Contempt,
    EmotionLabel::Neutral,
];

impl EmotionLabel {
    /// Wire string for this label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Angry => "angry",
            Self::Surprised => "surprised",
            Self::Fearful => "fearful",
            Self::Disgusted => "disgusted",
            Self::Contempt => "contempt",
            Self::Neutral => "neutral",
            Self::NoFace => "no face",
            Self::Unknown => "unknown",
            Self::DeepUnavailable => "Deep model not available",
        }
    }

    /// Parse a label from an external model's expression name.
    ///
    /// Matching is case-insensitive; names outside the vocabulary return
    /// `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "happy" => Some(Self::Happy),
            "sad" => Some(Self::Sad),
            "angry" => Some(Self::Angry),
            "surprised" => Some(Self::Surprised),
            "fearful" => Some(Self::Fearful),
            "disgusted" => Some(Self::Disgusted),
            "contempt" => Some(Self::Contempt),
            "neutral" => Some(Self::Neutral),
            "no face" => Some(Self::NoFace),
            _ => None,
        }
    }

    /// Position in [`RESOLUTION_PRIORITY`], if this label is classifiable.
    #[must_use]
    pub fn priority_index(&self) -> Option<usize> {
        RESOLUTION_PRIORITY.iter().position(|label| label == self)
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rule's vote: a label and a confidence in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmotionCandidate {
    pub label: EmotionLabel,
    pub confidence: f32,
}

/// Resolved output of the classifier or smoother.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionResult {
    #[serde(rename = "emotion")]
    pub label: EmotionLabel,
    pub confidence: f32,
}

impl EmotionResult {
    #[must_use]
    pub fn new(label: EmotionLabel, confidence: f32) -> Self {
        Self { label, confidence }
    }

    /// Sentinel for absent or degenerate landmarks.
    #[must_use]
    pub fn no_face() -> Self {
        Self::new(EmotionLabel::NoFace, 0.0)
    }

    /// Sentinel for an internal processing fault, distinct from "no face".
    #[must_use]
    pub fn unknown() -> Self {
        Self::new(EmotionLabel::Unknown, 0.0)
    }

    /// Sentinel for a deep expression backend that failed to load or run.
    #[must_use]
    pub fn deep_model_unavailable() -> Self {
        Self::new(EmotionLabel::DeepUnavailable, 0.0)
    }
}

impl From<ExtractionFailure> for EmotionResult {
    fn from(failure: ExtractionFailure) -> Self {
        match failure {
            ExtractionFailure::NoFace => Self::no_face(),
            ExtractionFailure::Invalid => Self::unknown(),
        }
    }
}

/// Deterministic rule-based emotion classifier.
///
/// Pure and side-effect free: the same feature vector always resolves to
/// the same result. Trigger thresholds come from [`RuleThresholds`] so
/// tuning never touches control flow.
#[derive(Debug, Clone, Default)]
pub struct EmotionClassifier {
    thresholds: RuleThresholds,
}

impl EmotionClassifier {
    #[must_use]
    pub fn new(thresholds: RuleThresholds) -> Self {
        Self { thresholds }
    }

    /// Classify a feature vector into a single emotion result.
    #[must_use]
    pub fn classify(&self, features: &FeatureVector) -> EmotionResult {
        let candidates = self.candidates(features);
        resolve(&candidates)
    }

    /// Run every rule and collect the raw candidate list.
    ///
    /// A frame can satisfy several rules at once; the list preserves rule
    /// evaluation order. When no candidate reaches the weak-candidate
    /// floor, a neutral default is appended.
    #[must_use]
    pub fn candidates(&self, features: &FeatureVector) -> Vec<EmotionCandidate> {
        let mut candidates = Vec::new();

        candidates.extend(self.rule_happy(features));
        candidates.extend(self.rule_surprised(features));
        candidates.extend(self.rule_surprised_fallback(features));
        candidates.extend(self.rule_angry(features));
        candidates.extend(self.rule_sad(features));
        candidates.extend(self.rule_fearful(features));
        candidates.extend(self.rule_disgusted(features));
        candidates.extend(self.rule_contempt(features));

        if candidates.iter().all(|c| c.confidence < WEAK_CANDIDATE_FLOOR) {
            debug!("no strong emotion candidate, defaulting to neutral");
            candidates.push(EmotionCandidate {
                label: EmotionLabel::Neutral,
                confidence: NEUTRAL_CONFIDENCE,
            });
        }

        candidates
    }

    /// Smile: corners raised above the lip center and a wide mouth.
    fn rule_happy(&self, f: &FeatureVector) -> Option<EmotionCandidate> {
        let t = &self.thresholds;
        if f.mouth_curvature < t.smile_curvature && f.mouth_width > t.smile_width {
            let confidence =
                (60.0 + f.mouth_curvature.abs() * 1000.0 + f.mouth_width * 200.0).min(caps::HAPPY);
            debug!("rule happy matched, confidence {confidence:.1}");
            return Some(EmotionCandidate {
                label: EmotionLabel::Happy,
                confidence,
            });
        }
        None
    }

    /// Raised brows with wide eyes and a closed-but-tense mouth.
    fn rule_surprised(&self, f: &FeatureVector) -> Option<EmotionCandidate> {
        let t = &self.thresholds;
        if f.brow_raise > t.surprise_brow_raise
            && f.eye_openness > t.surprise_eye_openness
            && f.mouth_height < t.surprise_mouth_height
            && f.brow_angle < t.surprise_brow_angle
        {
            let confidence =
                (55.0 + f.brow_raise * 1500.0 + f.eye_openness * 1200.0).min(caps::SURPRISED);
            debug!("rule surprised matched, confidence {confidence:.1}");
            return Some(EmotionCandidate {
                label: EmotionLabel::Surprised,
                confidence,
            });
        }
        None
    }

    /// Extreme brow raise with a steep brow angle reads as surprise even
    /// when the primary rule's eye/mouth conditions fail.
    fn rule_surprised_fallback(&self, f: &FeatureVector) -> Option<EmotionCandidate> {
        let t = &self.thresholds;
        if f.brow_angle > t.surprise_fallback_brow_angle && f.brow_raise > t.surprise_fallback_brow_raise
        {
            debug!("rule surprised (fallback) matched");
            return Some(EmotionCandidate {
                label: EmotionLabel::Surprised,
                confidence: caps::SURPRISED_FALLBACK,
            });
        }
        None
    }

    /// Furrowed, angled brows over narrowed eyes.
    fn rule_angry(&self, f: &FeatureVector) -> Option<EmotionCandidate> {
        let t = &self.thresholds;
        if f.brow_angle > t.anger_brow_angle
            && f.eye_openness < t.anger_eye_openness
            && f.brow_raise > t.anger_brow_raise
        {
            let mut confidence = 40.0;

            confidence += (f.brow_angle * 300.0).min(30.0);

            if f.brow_raise < 0.0 {
                confidence += (f.brow_raise.abs() * 200.0).min(20.0);
            } else if f.brow_raise < 0.01 {
                confidence += 15.0;
            }

            if f.eye_openness < 0.08 {
                confidence += 20.0;
            } else if f.eye_openness < 0.12 {
                confidence += 10.0;
            }

            if f.brow_angle > 0.12 && f.eye_openness < 0.06 {
                confidence += 15.0;
            }

            let confidence = confidence.clamp(caps::ANGRY_MIN, caps::ANGRY_MAX);
            debug!("rule angry matched, confidence {confidence:.1}");
            return Some(EmotionCandidate {
                label: EmotionLabel::Angry,
                confidence,
            });
        }
        None
    }

    /// Drooping mouth corners with droopy eyes.
    fn rule_sad(&self, f: &FeatureVector) -> Option<EmotionCandidate> {
        let t = &self.thresholds;
        if f.mouth_curvature > t.sad_curvature
            && f.eye_openness >= t.sad_eye_openness_min
            && f.eye_openness <= t.sad_eye_openness_max
        {
            let confidence = (55.0 + f.mouth_curvature * 4000.0).min(caps::SAD);
            debug!("rule sad matched, confidence {confidence:.1}");
            return Some(EmotionCandidate {
                label: EmotionLabel::Sad,
                confidence,
            });
        }
        None
    }

    /// Raised brows and open eyes over a small, tense mouth.
    fn rule_fearful(&self, f: &FeatureVector) -> Option<EmotionCandidate> {
        let t = &self.thresholds;
        if f.brow_raise > t.fear_brow_raise
            && f.eye_openness > t.fear_eye_openness
            && f.mouth_width < t.fear_mouth_width
            && f.mouth_height < t.fear_mouth_height
        {
            let confidence =
                (40.0 + f.brow_raise * 1000.0 + f.eye_openness * 1000.0).min(caps::FEARFUL);
            debug!("rule fearful matched, confidence {confidence:.1}");
            return Some(EmotionCandidate {
                label: EmotionLabel::Fearful,
                confidence,
            });
        }
        None
    }

    /// Flared nostrils, narrowed eyes, raised upper lip.
    fn rule_disgusted(&self, f: &FeatureVector) -> Option<EmotionCandidate> {
        let t = &self.thresholds;
        if f.nostril_flare > t.disgust_nostril_flare
            && f.eye_openness < t.disgust_eye_openness
            && f.mouth_curvature > t.disgust_curvature
        {
            let confidence =
                (40.0 + f.nostril_flare * 600.0 + f.nose_wrinkle * 800.0).min(caps::DISGUSTED);
            debug!("rule disgusted matched, confidence {confidence:.1}");
            return Some(EmotionCandidate {
                label: EmotionLabel::Disgusted,
                confidence,
            });
        }
        None
    }

    /// One-sided mouth raise.
    fn rule_contempt(&self, f: &FeatureVector) -> Option<EmotionCandidate> {
        let t = &self.thresholds;
        if f.mouth_asymmetry > t.contempt_asymmetry
            && f.mouth_width > t.contempt_mouth_width
            && f.eye_openness < t.contempt_eye_openness
        {
            let confidence = (35.0 + f.mouth_asymmetry * 8000.0).min(caps::CONTEMPT);
            debug!("rule contempt matched, confidence {confidence:.1}");
            return Some(EmotionCandidate {
                label: EmotionLabel::Contempt,
                confidence,
            });
        }
        None
    }
}

/// Resolve a candidate list into the final result.
///
/// Stage one: among candidates at or above the resolution floor, the
/// [`RESOLUTION_PRIORITY`] order decides, with descending confidence as the
/// tie-break within equal priority. Stage two: with no qualifying
/// candidate, the single most confident candidate wins. An empty list
/// resolves to neutral. The returned confidence is clamped to `[0, 100]`.
#[must_use]
pub fn resolve(candidates: &[EmotionCandidate]) -> EmotionResult {
    let chosen = candidates
        .iter()
        .filter(|c| c.confidence >= RESOLUTION_CONFIDENCE_FLOOR)
        .min_by(|a, b| compare_by_priority(a, b))
        .or_else(|| {
            candidates
                .iter()
                .max_by(|a, b| a.confidence.partial_cmp(&b.confidence).unwrap_or(Ordering::Equal))
        });

    match chosen {
        Some(c) => EmotionResult::new(c.label, c.confidence.clamp(0.0, CONFIDENCE_MAX)),
        None => EmotionResult::new(EmotionLabel::Neutral, NEUTRAL_CONFIDENCE),
    }
}

fn compare_by_priority(a: &EmotionCandidate, b: &EmotionCandidate) -> Ordering {
    let rank_a = a.label.priority_index().unwrap_or(usize::MAX);
    let rank_b = b.label.priority_index().unwrap_or(usize::MAX);
    rank_a
        .cmp(&rank_b)
        .then_with(|| b.confidence.partial_cmp(&a.confidence).unwrap_or(Ordering::Equal))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(label: EmotionLabel, confidence: f32) -> EmotionCandidate {
        EmotionCandidate { label, confidence }
    }

    #[test]
    fn test_happy_rule_and_cap() {
        let classifier = EmotionClassifier::default();
        let features = FeatureVector {
            mouth_curvature: -0.03,
            mouth_width: 0.30,
            ..FeatureVector::default()
        };

        let result = classifier.classify(&features);
        assert_eq!(result.label, EmotionLabel::Happy);
        // 60 + 30 + 60 exceeds the cap
        assert_eq!(result.confidence, 95.0);
    }

    #[test]
    fn test_surprised_rule() {
        let classifier = EmotionClassifier::default();
        let features = FeatureVector {
            brow_raise: 0.03,
            eye_openness: 0.06,
            mouth_height: 0.004,
            brow_angle: 0.3,
            ..FeatureVector::default()
        };

        let result = classifier.classify(&features);
        assert_eq!(result.label, EmotionLabel::Surprised);
        // 55 + 45 + 72 capped at 85
        assert_eq!(result.confidence, 85.0);
    }

    #[test]
    fn test_surprised_fallback_rule() {
        let classifier = EmotionClassifier::default();
        let features = FeatureVector {
            brow_angle: 1.3,
            brow_raise: 0.30,
            // Eyes too narrow for the primary surprise rule
            eye_openness: 0.02,
            mouth_height: 0.05,
            ..FeatureVector::default()
        };

        let candidates = classifier.candidates(&features);
        assert!(candidates
            .iter()
            .any(|c| c.label == EmotionLabel::Surprised && c.confidence == 88.0));
    }

    #[test]
    fn test_angry_rule_confidence_composition() {
        let classifier = EmotionClassifier::default();
        let features = FeatureVector {
            brow_angle: 0.6,
            eye_openness: 0.05,
            brow_raise: 0.2,
            ..FeatureVector::default()
        };

        let result = classifier.classify(&features);
        assert_eq!(result.label, EmotionLabel::Angry);
        // 40 + min(30, 180) + 20 (narrow eyes) + 15 (combo) = 105, clamped to 95
        assert_eq!(result.confidence, 95.0);
    }

    #[test]
    fn test_sad_rule() {
        let classifier = EmotionClassifier::default();
        let features = FeatureVector {
            mouth_curvature: 0.02,
            eye_openness: 0.075,
            ..FeatureVector::default()
        };

        let result = classifier.classify(&features);
        assert_eq!(result.label, EmotionLabel::Sad);
        // 55 + 80 capped at 84
        assert_eq!(result.confidence, 84.0);
    }

    #[test]
    fn test_fearful_rule() {
        let classifier = EmotionClassifier::default();
        let features = FeatureVector {
            brow_raise: 0.02,
            eye_openness: 0.014,
            mouth_width: 0.02,
            mouth_height: 0.004,
            ..FeatureVector::default()
        };

        let result = classifier.classify(&features);
        assert_eq!(result.label, EmotionLabel::Fearful);
        let expected = 40.0 + 0.02 * 1000.0 + 0.014 * 1000.0;
        assert!((result.confidence - expected).abs() < 1e-3);
        assert!(result.confidence <= 78.0);
    }

    #[test]
    fn test_disgusted_rule() {
        let classifier = EmotionClassifier::default();
        let features = FeatureVector {
            nostril_flare: 0.03,
            eye_openness: 0.01,
            mouth_curvature: 0.001,
            nose_wrinkle: 0.05,
            ..FeatureVector::default()
        };

        let candidates = classifier.candidates(&features);
        let disgusted = candidates
            .iter()
            .find(|c| c.label == EmotionLabel::Disgusted)
            .expect("disgusted candidate");
        let expected = 40.0 + 0.03 * 600.0 + 0.05 * 800.0;
        assert!((disgusted.confidence - expected).abs() < 1e-3);
        assert!(disgusted.confidence <= 75.0);
    }

    #[test]
    fn test_contempt_rule() {
        let classifier = EmotionClassifier::default();
        let features = FeatureVector {
            mouth_asymmetry: 0.004,
            mouth_width: 0.03,
            eye_openness: 0.01,
            ..FeatureVector::default()
        };

        let candidates = classifier.candidates(&features);
        let contempt = candidates
            .iter()
            .find(|c| c.label == EmotionLabel::Contempt)
            .expect("contempt candidate");
        assert!((contempt.confidence - 67.0).abs() < 1e-3);
    }

    #[test]
    fn test_neutral_fallback() {
        let classifier = EmotionClassifier::default();
        let result = classifier.classify(&FeatureVector::default());
        assert_eq!(result.label, EmotionLabel::Neutral);
        assert_eq!(result.confidence, 75.0);
    }

    #[test]
    fn test_determinism() {
        let classifier = EmotionClassifier::default();
        let features = FeatureVector {
            mouth_curvature: -0.025,
            mouth_width: 0.24,
            ..FeatureVector::default()
        };

        let first = classifier.classify(&features);
        for _ in 0..10 {
            assert_eq!(classifier.classify(&features), first);
        }
    }

    #[test]
    fn test_priority_beats_confidence_among_qualified() {
        let candidates = vec![
            candidate(EmotionLabel::Happy, 70.0),
            candidate(EmotionLabel::Sad, 65.0),
        ];
        let result = resolve(&candidates);
        assert_eq!(result.label, EmotionLabel::Sad);
        assert_eq!(result.confidence, 65.0);
    }

    #[test]
    fn test_best_effort_below_floor() {
        let candidates = vec![
            candidate(EmotionLabel::Fearful, 45.0),
            candidate(EmotionLabel::Contempt, 55.0),
        ];
        let result = resolve(&candidates);
        assert_eq!(result.label, EmotionLabel::Contempt);
        assert_eq!(result.confidence, 55.0);
    }

    #[test]
    fn test_empty_candidates_resolve_to_neutral() {
        let result = resolve(&[]);
        assert_eq!(result.label, EmotionLabel::Neutral);
        assert_eq!(result.confidence, 75.0);
    }

    #[test]
    fn test_equal_priority_resolves_by_confidence() {
        let candidates = vec![
            candidate(EmotionLabel::Surprised, 62.0),
            candidate(EmotionLabel::Surprised, 88.0),
        ];
        let result = resolve(&candidates);
        assert_eq!(result.confidence, 88.0);
    }

    #[test]
    fn test_all_confidences_bounded() {
        let classifier = EmotionClassifier::default();
        // Extreme synthetic features push every formula past its cap
        let features = FeatureVector {
            mouth_curvature: 0.9,
            mouth_width: 0.9,
            mouth_height: 0.0,
            mouth_asymmetry: 0.9,
            eye_openness: 0.08,
            brow_raise: 0.9,
            brow_angle: 0.9,
            nostril_flare: 0.9,
            nose_wrinkle: 0.9,
            ..FeatureVector::default()
        };

        for c in classifier.candidates(&features) {
            assert!(c.confidence >= 0.0 && c.confidence <= 100.0, "{c:?}");
        }
        let result = classifier.classify(&features);
        assert!(result.confidence >= 0.0 && result.confidence <= 100.0);
    }

    #[test]
    fn test_label_wire_strings() {
        assert_eq!(EmotionLabel::Happy.as_str(), "happy");
        assert_eq!(EmotionLabel::NoFace.as_str(), "no face");
        assert_eq!(EmotionLabel::DeepUnavailable.as_str(), "Deep model not available");
        assert_eq!(
            serde_json::to_string(&EmotionLabel::DeepUnavailable).unwrap(),
            "\"Deep model not available\""
        );
    }

    #[test]
    fn test_label_from_name_is_case_insensitive() {
        assert_eq!(EmotionLabel::from_name("Happy"), Some(EmotionLabel::Happy));
        assert_eq!(EmotionLabel::from_name("NEUTRAL"), Some(EmotionLabel::Neutral));
        assert_eq!(EmotionLabel::from_name("bored"), None);
    }
}
