use image::GrayImage;

use crate::shared::constants::{HAAR_MIN_FACE_SIZE, HAAR_MIN_NEIGHBORS, HAAR_SCALE_FACTOR};
use crate::shared::region::Region;

/// One detected face: its rectangle in detection-image coordinates and
/// the number of neighbouring candidate windows that merged into it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Detection {
    pub region: Region,
    pub neighbors: i32,
}

/// Tuning knobs passed through to the cascade classifier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectionParams {
    pub scale_factor: f64,
    pub min_neighbors: i32,
    pub min_size: (u32, u32),
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            scale_factor: HAAR_SCALE_FACTOR,
            min_neighbors: HAAR_MIN_NEIGHBORS,
            min_size: HAAR_MIN_FACE_SIZE,
        }
    }
}

/// Domain interface for face detection.
///
/// Receives the preprocessed (gray, downscaled, equalised) image.
/// Implementations may keep state between calls, hence `&mut self`.
pub trait FaceDetector: Send {
    fn detect(&mut self, image: &GrayImage) -> Result<Vec<Detection>, Box<dyn std::error::Error>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_match_haar_tuning() {
        let params = DetectionParams::default();
        assert_eq!(params.scale_factor, 1.2);
        assert_eq!(params.min_neighbors, 2);
        assert_eq!(params.min_size, (20, 20));
    }
}
