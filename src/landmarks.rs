//! Face mesh landmark types and geometry primitives.
//!
//! A landmark set is an ordered sequence of 468 points in normalized image
//! coordinates, produced by an external face-mesh detector. Index position
//! carries anatomical meaning; the indices referenced by the feature
//! extractor are named in [`index`].

use serde::{Deserialize, Serialize};

/// A single face-mesh landmark in normalized `[0, 1]` image coordinates.
///
/// The `z` coordinate is carried through from the detector but not used by
/// the geometric features.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Point {
    #[must_use]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Named MediaPipe Face Mesh indices referenced by the feature extractor.
pub mod index {
    pub const LEFT_MOUTH_CORNER: usize = 61;
    pub const RIGHT_MOUTH_CORNER: usize = 291;
    pub const TOP_LIP: usize = 13;
    pub const BOTTOM_LIP: usize = 14;
    pub const UPPER_LIP_CENTER: usize = 12;
    pub const LOWER_LIP_CENTER: usize = 15;

    pub const LEFT_EYE_TOP: usize = 159;
    pub const LEFT_EYE_BOTTOM: usize = 145;
    pub const RIGHT_EYE_TOP: usize = 386;
    pub const RIGHT_EYE_BOTTOM: usize = 374;
    pub const LEFT_EYE_INNER: usize = 133;
    pub const LEFT_EYE_OUTER: usize = 33;
    pub const RIGHT_EYE_INNER: usize = 362;
    pub const RIGHT_EYE_OUTER: usize = 263;

    pub const LEFT_BROW_INNER: usize = 70;
    pub const LEFT_BROW_OUTER: usize = 46;
    pub const RIGHT_BROW_INNER: usize = 107;
    pub const RIGHT_BROW_OUTER: usize = 276;
    pub const BROW_CENTER: usize = 9;

    pub const NOSE_TIP: usize = 1;
    pub const NOSE_BASE: usize = 2;
    pub const LEFT_NOSTRIL: usize = 20;
    pub const RIGHT_NOSTRIL: usize = 250;

    pub const LEFT_CHEEK: usize = 234;
    pub const RIGHT_CHEEK: usize = 454;

    pub const CHIN: usize = 18;
    pub const LEFT_JAW: usize = 172;
    pub const RIGHT_JAW: usize = 397;
}

/// Planar euclidean distance between two landmarks.
///
/// Total over malformed input: any non-finite coordinate yields `0.0` so a
/// single corrupt point degrades the downstream ratios instead of poisoning
/// them with NaN.
#[must_use]
pub fn distance(a: &Point, b: &Point) -> f32 {
    if !a.x.is_finite() || !a.y.is_finite() || !b.x.is_finite() || !b.y.is_finite() {
        return 0.0;
    }

    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}
