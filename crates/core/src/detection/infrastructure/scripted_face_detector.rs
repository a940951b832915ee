use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use image::GrayImage;

use crate::detection::domain::face_detector::{Detection, FaceDetector};
use crate::shared::region::Region;

/// Deterministic detector that replays a scripted sequence of results.
///
/// Once the script runs out, the fallback result is returned for every
/// further call. Used to drive the capture loop without a cascade file.
pub struct ScriptedFaceDetector {
    script: VecDeque<Vec<Detection>>,
    fallback: Vec<Detection>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedFaceDetector {
    pub fn new(script: Vec<Vec<Detection>>, fallback: Vec<Detection>) -> Self {
        Self {
            script: script.into(),
            fallback,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Reports one face on every call.
    pub fn always_face() -> Self {
        Self::new(Vec::new(), vec![sample_face()])
    }

    /// Never reports a face.
    pub fn never_face() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// Shared counter of `detect` calls, readable after the detector has
    /// been moved into a use case.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

impl FaceDetector for ScriptedFaceDetector {
    fn detect(&mut self, _image: &GrayImage) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .script
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone()))
    }
}

/// A plausible face in detection space.
pub fn sample_face() -> Detection {
    Detection {
        region: Region::new(40, 30, 60, 60),
        neighbors: 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> GrayImage {
        GrayImage::new(4, 4)
    }

    #[test]
    fn test_replays_script_then_fallback() {
        let mut detector = ScriptedFaceDetector::new(vec![vec![], vec![sample_face()]], vec![]);
        assert!(detector.detect(&image()).unwrap().is_empty());
        assert_eq!(detector.detect(&image()).unwrap(), vec![sample_face()]);
        assert!(detector.detect(&image()).unwrap().is_empty());
        assert!(detector.detect(&image()).unwrap().is_empty());
    }

    #[test]
    fn test_always_face() {
        let mut detector = ScriptedFaceDetector::always_face();
        for _ in 0..3 {
            assert_eq!(detector.detect(&image()).unwrap().len(), 1);
        }
    }

    #[test]
    fn test_call_counter_tracks_calls() {
        let mut detector = ScriptedFaceDetector::never_face();
        let calls = detector.call_counter();
        detector.detect(&image()).unwrap();
        detector.detect(&image()).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
