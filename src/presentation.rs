//! Presentation helpers mapping results to display glyphs and buckets.
//!
//! Pure lookups. Callers depend on the exact intensity bucket boundaries
//! (80/60/40), so they are part of the contract, not styling.

use crate::classifier::{EmotionLabel, EmotionResult};
use crate::constants::{INTENSITY_HIGH, INTENSITY_LOW, INTENSITY_MEDIUM};
use serde::Serialize;
use std::fmt;

/// Emoji glyph for a label.
#[must_use]
pub fn emoji(label: EmotionLabel) -> &'static str {
    match label {
        EmotionLabel::Happy => "😄",
        EmotionLabel::Sad => "😢",
        EmotionLabel::Angry => "😠",
        EmotionLabel::Disgusted => "🤢",
        EmotionLabel::Surprised => "😲",
        EmotionLabel::Fearful => "😨",
        EmotionLabel::Contempt => "😤",
        EmotionLabel::Neutral => "😐",
        EmotionLabel::NoFace => "❌",
        EmotionLabel::Unknown | EmotionLabel::DeepUnavailable => "🤖",
    }
}

/// Human-readable description for a label.
#[must_use]
pub fn description(label: EmotionLabel) -> &'static str {
    match label {
        EmotionLabel::Happy => "Showing joy and positive feelings",
        EmotionLabel::Sad => "Expressing sorrow or disappointment",
        EmotionLabel::Angry => "Displaying anger or frustration",
        EmotionLabel::Surprised => "Reacting with surprise or shock",
        EmotionLabel::Fearful => "Showing fear or anxiety",
        EmotionLabel::Disgusted => "Expressing disgust or distaste",
        EmotionLabel::Contempt => "Showing contempt or disdain",
        EmotionLabel::Neutral => "Calm and composed expression",
        EmotionLabel::NoFace | EmotionLabel::Unknown | EmotionLabel::DeepUnavailable => {
            "Unknown emotional state"
        }
    }
}

/// Confidence intensity bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Intensity {
    High,
    Medium,
    Low,
    VeryLow,
}

impl Intensity {
    /// Bucket a confidence value at the 80/60/40 boundaries.
    #[must_use]
    pub fn from_confidence(confidence: f32) -> Self {
        if confidence >= INTENSITY_HIGH {
            Self::High
        } else if confidence >= INTENSITY_MEDIUM {
            Self::Medium
        } else if confidence >= INTENSITY_LOW {
            Self::Low
        } else {
            Self::VeryLow
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::VeryLow => "Very Low",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A result decorated for display.
#[derive(Debug, Clone, Serialize)]
pub struct DetailedAnalysis {
    #[serde(flatten)]
    pub result: EmotionResult,
    pub emoji: &'static str,
    pub description: &'static str,
    pub intensity: Intensity,
}

impl DetailedAnalysis {
    #[must_use]
    pub fn from_result(result: EmotionResult) -> Self {
        Self {
            result,
            emoji: emoji(result.label),
            description: description(result.label),
            intensity: Intensity::from_confidence(result.confidence),
        }
    }
}
