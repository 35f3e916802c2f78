//! Geometric feature extraction from face-mesh landmarks.
//!
//! Converts a raw 468-point landmark set into a small set of named,
//! dimensionless ratios. Every ratio is normalized by face width
//! (cheek to cheek) or face height (brow center to chin), which is what
//! lets fixed numeric thresholds generalize across face sizes and
//! distances from the camera.

use crate::constants::NUM_FACE_LANDMARKS;
use crate::landmarks::{distance, index, Point};

/// Named geometric ratios derived from one landmark set.
///
/// All values are dimensionless. Signs follow image coordinates (y grows
/// downward): negative `mouth_curvature` means the mouth corners sit above
/// the lip center, i.e. a smile shape; positive means drooping.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FeatureVector {
    pub mouth_width: f32,
    pub mouth_height: f32,
    pub mouth_curvature: f32,
    pub mouth_asymmetry: f32,
    pub eye_openness: f32,
    pub eye_width: f32,
    pub brow_raise: f32,
    pub brow_angle: f32,
    pub nostril_flare: f32,
    pub nose_wrinkle: f32,
    pub cheek_raise: f32,
}

impl FeatureVector {
    /// True when every ratio is a finite number.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        [
            self.mouth_width,
            self.mouth_height,
            self.mouth_curvature,
            self.mouth_asymmetry,
            self.eye_openness,
            self.eye_width,
            self.brow_raise,
            self.brow_angle,
            self.nostril_flare,
            self.nose_wrinkle,
            self.cheek_raise,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Why feature extraction produced no vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionFailure {
    /// Too few landmarks, or a degenerate zero-scale face
    NoFace,
    /// Feature math produced a non-finite value
    Invalid,
}

/// Extract the feature vector from a landmark set.
///
/// Returns [`ExtractionFailure::NoFace`] when the set has fewer than 468
/// points or the face scale collapses to zero, and
/// [`ExtractionFailure::Invalid`] when a raw coordinate poisons a ratio
/// with a non-finite value. Never panics.
pub fn extract_features(landmarks: &[Point]) -> Result<FeatureVector, ExtractionFailure> {
    if landmarks.len() < NUM_FACE_LANDMARKS {
        return Err(ExtractionFailure::NoFace);
    }

    let left_cheek = &landmarks[index::LEFT_CHEEK];
    let right_cheek = &landmarks[index::RIGHT_CHEEK];
    let brow_center = &landmarks[index::BROW_CENTER];
    let chin = &landmarks[index::CHIN];

    let face_width = distance(left_cheek, right_cheek);
    let face_height = distance(brow_center, chin);

    if face_width == 0.0 || face_height == 0.0 {
        return Err(ExtractionFailure::NoFace);
    }

    let left_mouth = &landmarks[index::LEFT_MOUTH_CORNER];
    let right_mouth = &landmarks[index::RIGHT_MOUTH_CORNER];
    let top_lip = &landmarks[index::TOP_LIP];
    let bottom_lip = &landmarks[index::BOTTOM_LIP];
    let upper_lip_center = &landmarks[index::UPPER_LIP_CENTER];
    let lower_lip_center = &landmarks[index::LOWER_LIP_CENTER];

    let mouth_width = distance(left_mouth, right_mouth) / face_width;
    let mouth_height = distance(top_lip, bottom_lip) / face_height;

    let center_lip_y = (upper_lip_center.y + lower_lip_center.y) / 2.0;
    let mouth_curvature = ((left_mouth.y + right_mouth.y) / 2.0 - center_lip_y) / face_height;
    let mouth_asymmetry = (left_mouth.y - right_mouth.y).abs() / face_height;

    let left_eye_top = &landmarks[index::LEFT_EYE_TOP];
    let left_eye_bottom = &landmarks[index::LEFT_EYE_BOTTOM];
    let right_eye_top = &landmarks[index::RIGHT_EYE_TOP];
    let right_eye_bottom = &landmarks[index::RIGHT_EYE_BOTTOM];

    let left_eye_height = distance(left_eye_top, left_eye_bottom) / face_height;
    let right_eye_height = distance(right_eye_top, right_eye_bottom) / face_height;
    let eye_openness = (left_eye_height + right_eye_height) / 2.0;

    let left_eye_width =
        distance(&landmarks[index::LEFT_EYE_INNER], &landmarks[index::LEFT_EYE_OUTER]) / face_width;
    let right_eye_width =
        distance(&landmarks[index::RIGHT_EYE_INNER], &landmarks[index::RIGHT_EYE_OUTER]) / face_width;
    let eye_width = (left_eye_width + right_eye_width) / 2.0;

    let left_brow_inner = &landmarks[index::LEFT_BROW_INNER];
    let left_brow_outer = &landmarks[index::LEFT_BROW_OUTER];
    let right_brow_inner = &landmarks[index::RIGHT_BROW_INNER];
    let right_brow_outer = &landmarks[index::RIGHT_BROW_OUTER];

    let left_brow_height = distance(left_brow_inner, left_eye_top) / face_height;
    let right_brow_height = distance(right_brow_inner, right_eye_top) / face_height;
    let brow_raise = (left_brow_height + right_brow_height) / 2.0;

    // Slope of the outer-to-inner brow vector per side; larger magnitude
    // signals furrowing or angling.
    let left_brow_angle = (left_brow_outer.y - left_brow_inner.y)
        .atan2(left_brow_outer.x - left_brow_inner.x)
        .abs();
    let right_brow_angle = (right_brow_outer.y - right_brow_inner.y)
        .atan2(right_brow_outer.x - right_brow_inner.x)
        .abs();
    let brow_angle = (left_brow_angle + right_brow_angle) / 2.0;

    let nostril_flare =
        distance(&landmarks[index::LEFT_NOSTRIL], &landmarks[index::RIGHT_NOSTRIL]) / face_width;
    let nose_wrinkle = distance(&landmarks[index::NOSE_TIP], &landmarks[index::NOSE_BASE]) / face_height;

    let left_cheek_raise = distance(left_cheek, left_eye_bottom) / face_height;
    let right_cheek_raise = distance(right_cheek, right_eye_bottom) / face_height;
    let cheek_raise = (left_cheek_raise + right_cheek_raise) / 2.0;

    let features = FeatureVector {
        mouth_width,
        mouth_height,
        mouth_curvature,
        mouth_asymmetry,
        eye_openness,
        eye_width,
        brow_raise,
        brow_angle,
        nostril_flare,
        nose_wrinkle,
        cheek_raise,
    };

    if features.is_finite() {
        Ok(features)
    } else {
        Err(ExtractionFailure::Invalid)
    }
}
