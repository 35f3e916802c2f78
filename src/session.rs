//! Scanning sessions: a timeline of per-frame results plus a summary.
//!
//! The product samples one frame per second during a face scan and shows a
//! running timeline. A session owns its detector (and with it any
//! smoothing history), so concurrent sessions never share state and
//! discarding the session discards the history.

use crate::classifier::{EmotionLabel, EmotionResult};
use crate::config::Config;
use crate::detector::{EmotionDetector, RuleDetector};
use crate::landmarks::Point;
use crate::presentation::emoji;
use serde::Serialize;

/// One sampled frame in a scan timeline.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineEntry {
    /// Sample time label, e.g. "3s"
    pub time: String,
    #[serde(rename = "emotion")]
    pub label: EmotionLabel,
    pub emoji: &'static str,
    /// Rounded to a whole percentage for display
    pub confidence: u8,
}

/// Aggregate view of a finished (or running) scan.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    /// Most frequent label across the timeline; ties go to the earliest
    /// encountered. Neutral when the timeline is empty.
    pub dominant: EmotionLabel,
    /// Average confidence over the frames carrying the dominant label
    pub average_confidence: f32,
    /// Total frames recorded
    pub frames: usize,
}

/// One face-scanning session.
pub struct ScanSession {
    detector: RuleDetector,
    timeline: Vec<TimelineEntry>,
}

impl ScanSession {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            detector: RuleDetector::new(config),
            timeline: Vec::new(),
        }
    }

    /// Record one sampled frame.
    ///
    /// `None` means the landmark detector saw no face this frame.
    pub fn record(&mut self, landmarks: Option<&[Point]>) -> TimelineEntry {
        let result = match landmarks {
            Some(landmarks) => self.detector.predict(landmarks),
            None => EmotionResult::no_face(),
        };

        let entry = TimelineEntry {
            time: format!("{}s", self.timeline.len() + 1),
            label: result.label,
            emoji: emoji(result.label),
            confidence: result.confidence.round().clamp(0.0, 100.0) as u8,
        };
        self.timeline.push(entry.clone());
        entry
    }

    /// Frames recorded so far.
    #[must_use]
    pub fn timeline(&self) -> &[TimelineEntry] {
        &self.timeline
    }

    /// Summarize the session so far.
    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        let mut counts: Vec<(EmotionLabel, usize)> = Vec::new();
        for entry in &self.timeline {
            match counts.iter_mut().find(|(label, _)| *label == entry.label) {
                Some((_, count)) => *count += 1,
                None => counts.push((entry.label, 1)),
            }
        }

        // Strictly-greater keeps the earliest label on ties
        let dominant = counts
            .iter()
            .fold(None::<(EmotionLabel, usize)>, |best, &candidate| match best {
                Some(b) if candidate.1 > b.1 => Some(candidate),
                Some(b) => Some(b),
                None => Some(candidate),
            })
            .map_or(EmotionLabel::Neutral, |(label, _)| label);

        let matching: Vec<f32> = self
            .timeline
            .iter()
            .filter(|e| e.label == dominant)
            .map(|e| f32::from(e.confidence))
            .collect();
        let average_confidence = if matching.is_empty() {
            0.0
        } else {
            matching.iter().sum::<f32>() / matching.len() as f32
        };

        SessionSummary {
            dominant,
            average_confidence,
            frames: self.timeline.len(),
        }
    }

    /// Discard the timeline and the detector's smoothing history.
    pub fn reset(&mut self) {
        self.timeline.clear();
        self.detector.reset();
    }
}
