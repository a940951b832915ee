use std::fmt::Display;
use std::path::Path;

use image::GrayImage;

use crate::detection::domain::face_detector::{Detection, FaceDetector};

/// Detector that never finds a face.
///
/// Stands in for a cascade that could not be loaded, so every attempt runs
/// out its budget and the scheduler keeps retrying.
pub struct NullFaceDetector;

impl FaceDetector for NullFaceDetector {
    fn detect(&mut self, _image: &GrayImage) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
        Ok(Vec::new())
    }
}

/// Boxes a loaded detector, or falls back to [`NullFaceDetector`] with a
/// warning when loading from `source` failed.
pub fn detector_or_null<D, E>(loaded: Result<D, E>, source: &Path) -> Box<dyn FaceDetector>
where
    D: FaceDetector + 'static,
    E: Display,
{
    match loaded {
        Ok(detector) => Box::new(detector),
        Err(e) => {
            log::warn!(
                "Could not load face detector from {}: {e}; no faces will be found",
                source.display()
            );
            Box::new(NullFaceDetector)
        }
    }
}
