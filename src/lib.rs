//! Facial emotion estimation library for landmark-based expression analysis.
//!
//! This library classifies facial emotion from 468-point face-mesh
//! landmark sets using:
//! - Scale-invariant geometric feature extraction (mouth, eye, brow, nose
//!   and cheek ratios)
//! - A deterministic rule battery with two-stage priority resolution
//! - Optional majority-vote temporal smoothing over a sliding window
//!
//! The pipeline runs once per captured video frame:
//! 1. An external face-mesh detector produces the landmark set
//! 2. Feature extraction normalizes raw geometry into dimensionless ratios
//! 3. The rule classifier resolves the ratios into an emotion + confidence
//! 4. An optional smoother stabilizes the per-frame stream
//!
//! Failures never cross the public boundary as errors: missing faces,
//! degenerate geometry and unavailable deep backends all surface as
//! sentinel results, so a scanning loop cannot be aborted by one bad
//! frame.
//!
//! # Examples
//!
//! ## Classifying a single frame
//!
//! ```
//! use face_emotion_estimation::detector::{detect_face_emotion, DetectionMode, ScanInput};
//! use face_emotion_estimation::landmarks::Point;
//!
//! // A landmark set with every point coincident has zero face scale
//! let landmarks = vec![Point::new(0.5, 0.5, 0.0); 468];
//! let result = detect_face_emotion(DetectionMode::Rule, &ScanInput::Landmarks(&landmarks));
//! assert_eq!(result.label.as_str(), "no face");
//! assert_eq!(result.confidence, 0.0);
//! ```
//!
//! ## Smoothing a noisy stream
//!
//! ```
//! use face_emotion_estimation::classifier::{EmotionLabel, EmotionResult};
//! use face_emotion_estimation::smoother::EmotionSmoother;
//!
//! let mut smoother = EmotionSmoother::new(5);
//! smoother.push(EmotionResult::new(EmotionLabel::Happy, 90.0));
//! smoother.push(EmotionResult::new(EmotionLabel::Sad, 70.0));
//! let stable = smoother.push(EmotionResult::new(EmotionLabel::Happy, 80.0));
//!
//! assert_eq!(stable.label, EmotionLabel::Happy);
//! assert_eq!(stable.confidence, 85.0);
//! ```
//!
//! ## Running a scan session
//!
//! ```
//! use face_emotion_estimation::config::Config;
//! use face_emotion_estimation::session::ScanSession;
//!
//! let mut config = Config::default();
//! config.smoothing.enabled = true;
//!
//! let mut session = ScanSession::new(&config);
//! session.record(None); // frame without a detected face
//! let summary = session.summary();
//! assert_eq!(summary.frames, 1);
//! ```

/// Landmark types, named face-mesh indices and geometry primitives
pub mod landmarks;

/// Geometric feature extraction from landmark sets
pub mod features;

/// Rule-based emotion classification and result types
pub mod classifier;

/// Temporal smoothing of per-frame results
pub mod smoother;

/// Detection strategies and rule/deep mode dispatch
pub mod detector;

/// Display helpers: emoji, descriptions, intensity buckets
pub mod presentation;

/// Scan sessions with timelines and summaries
pub mod session;

/// Error types and result handling
pub mod error;

/// Frame-replay application
pub mod app;

/// Constants used throughout the library
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
