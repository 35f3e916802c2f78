//! Constants used throughout the library

/// Number of facial landmarks in a full face mesh
pub const NUM_FACE_LANDMARKS: usize = 468;

/// Default smoothing window size in frames
pub const DEFAULT_SMOOTHING_WINDOW: usize = 5;

/// Confidence scale upper bound
pub const CONFIDENCE_MAX: f32 = 100.0;

/// Confidence reported for the neutral fallback
pub const NEUTRAL_CONFIDENCE: f32 = 75.0;

/// Candidates below this confidence count as "no strong emotion"
pub const WEAK_CANDIDATE_FLOOR: f32 = 40.0;

/// Candidates at or above this confidence qualify for priority resolution
pub const RESOLUTION_CONFIDENCE_FLOOR: f32 = 60.0;

/// Intensity bucket boundaries
pub const INTENSITY_HIGH: f32 = 80.0;
pub const INTENSITY_MEDIUM: f32 = 60.0;
pub const INTENSITY_LOW: f32 = 40.0;
