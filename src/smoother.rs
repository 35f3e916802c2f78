//! Temporal smoothing of per-frame emotion results.
//!
//! Raw per-frame classification is noisy: single-frame landmark jitter
//! flips labels. A short majority-vote window trades a little latency for
//! much more stable output. One smoother instance belongs to one scanning
//! session; concurrent sessions each own their own.

use crate::classifier::{EmotionLabel, EmotionResult};
use crate::constants::DEFAULT_SMOOTHING_WINDOW;
use std::collections::VecDeque;

/// Majority-vote smoother over a bounded FIFO window of results.
#[derive(Debug, Clone)]
pub struct EmotionSmoother {
    window_size: usize,
    window: VecDeque<EmotionResult>,
}

impl EmotionSmoother {
    /// Create a smoother with the given window size.
    ///
    /// A zero window size is treated as 1 (pass-through).
    #[must_use]
    pub fn new(window_size: usize) -> Self {
        let window_size = window_size.max(1);
        Self {
            window_size,
            window: VecDeque::with_capacity(window_size),
        }
    }

    /// Push a per-frame result and return the stabilized window result.
    ///
    /// The oldest entry is evicted once the window is full. The output
    /// label is the most frequent label in the window; frequency ties are
    /// broken by the fixed resolution priority order (never by map
    /// iteration order), with labels outside that order losing to ones in
    /// it and resolving among themselves by window arrival. The output
    /// confidence averages only the entries carrying the winning label.
    pub fn push(&mut self, result: EmotionResult) -> EmotionResult {
        if self.window.len() >= self.window_size {
            self.window.pop_front();
        }
        self.window.push_back(result);

        // Label counts in window arrival order
        let mut counts: Vec<(EmotionLabel, usize)> = Vec::new();
        for entry in &self.window {
            match counts.iter_mut().find(|(label, _)| *label == entry.label) {
                Some((_, count)) => *count += 1,
                None => counts.push((entry.label, 1)),
            }
        }

        let mut mode = counts[0];
        for &candidate in &counts[1..] {
            let better_count = candidate.1 > mode.1;
            let better_rank = candidate.1 == mode.1
                && candidate.0.priority_index().unwrap_or(usize::MAX)
                    < mode.0.priority_index().unwrap_or(usize::MAX);
            if better_count || better_rank {
                mode = candidate;
            }
        }

        let matching: Vec<f32> = self
            .window
            .iter()
            .filter(|r| r.label == mode.0)
            .map(|r| r.confidence)
            .collect();
        let confidence = matching.iter().sum::<f32>() / matching.len() as f32;

        EmotionResult::new(mode.0, confidence)
    }

    /// Clear the window.
    pub fn reset(&mut self) {
        self.window.clear();
    }

    /// Number of results currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.window.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Configured window size.
    #[must_use]
    pub fn window_size(&self) -> usize {
        self.window_size
    }
}

impl Default for EmotionSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTHING_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(label: EmotionLabel, confidence: f32) -> EmotionResult {
        EmotionResult::new(label, confidence)
    }

    #[test]
    fn test_majority_vote_and_mode_only_average() {
        let mut smoother = EmotionSmoother::new(5);

        smoother.push(result(EmotionLabel::Happy, 80.0));
        smoother.push(result(EmotionLabel::Happy, 90.0));
        smoother.push(result(EmotionLabel::Sad, 70.0));
        smoother.push(result(EmotionLabel::Happy, 70.0));
        let out = smoother.push(result(EmotionLabel::Neutral, 75.0));

        assert_eq!(out.label, EmotionLabel::Happy);
        // Mean of the three happy confidences, the sad/neutral entries do
        // not contribute
        assert!((out.confidence - 80.0).abs() < 1e-4);
    }

    #[test]
    fn test_eviction_beyond_window() {
        let mut smoother = EmotionSmoother::new(5);

        // Five sad frames fill the window
        for _ in 0..5 {
            smoother.push(result(EmotionLabel::Sad, 80.0));
        }
        // Four happy frames evict four sad ones; happy should win 4:1
        let mut out = result(EmotionLabel::Neutral, 0.0);
        for _ in 0..4 {
            out = smoother.push(result(EmotionLabel::Happy, 60.0));
        }

        assert_eq!(smoother.len(), 5);
        assert_eq!(out.label, EmotionLabel::Happy);
        assert!((out.confidence - 60.0).abs() < 1e-4);
    }

    #[test]
    fn test_single_entry_passthrough() {
        let mut smoother = EmotionSmoother::new(5);
        let out = smoother.push(result(EmotionLabel::Angry, 72.0));
        assert_eq!(out, result(EmotionLabel::Angry, 72.0));
    }

    #[test]
    fn test_tie_break_uses_priority_order() {
        let mut smoother = EmotionSmoother::new(4);

        // 2x happy then 2x sad: sad outranks happy in the priority order
        smoother.push(result(EmotionLabel::Happy, 90.0));
        smoother.push(result(EmotionLabel::Happy, 90.0));
        smoother.push(result(EmotionLabel::Sad, 60.0));
        let out = smoother.push(result(EmotionLabel::Sad, 70.0));

        assert_eq!(out.label, EmotionLabel::Sad);
        assert!((out.confidence - 65.0).abs() < 1e-4);
    }

    #[test]
    fn test_reset_clears_history() {
        let mut smoother = EmotionSmoother::new(5);
        smoother.push(result(EmotionLabel::Happy, 90.0));
        smoother.push(result(EmotionLabel::Happy, 90.0));
        smoother.reset();
        assert!(smoother.is_empty());

        let out = smoother.push(result(EmotionLabel::Sad, 62.0));
        assert_eq!(out.label, EmotionLabel::Sad);
    }

    #[test]
    fn test_zero_window_acts_as_passthrough() {
        let mut smoother = EmotionSmoother::new(0);
        smoother.push(result(EmotionLabel::Happy, 90.0));
        let out = smoother.push(result(EmotionLabel::Sad, 64.0));
        assert_eq!(out.label, EmotionLabel::Sad);
        assert_eq!(smoother.len(), 1);
    }
}
