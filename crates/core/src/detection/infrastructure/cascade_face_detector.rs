use std::path::Path;

use image::GrayImage;
use opencv::core::{Mat, Rect, Scalar, Size, Vector, CV_8UC1};
use opencv::objdetect::CascadeClassifier;
use opencv::prelude::*;

use crate::detection::domain::face_detector::{Detection, DetectionParams, FaceDetector};
use crate::shared::region::Region;

/// Haar cascade face detector backed by OpenCV's `CascadeClassifier`.
pub struct CascadeFaceDetector {
    classifier: CascadeClassifier,
    params: DetectionParams,
}

impl CascadeFaceDetector {
    /// Loads a cascade definition (e.g. `haarcascade_frontalface_alt.xml`).
    pub fn load(path: &Path, params: DetectionParams) -> Result<Self, Box<dyn std::error::Error>> {
        let path_str = path
            .to_str()
            .ok_or_else(|| format!("cascade path is not valid UTF-8: {}", path.display()))?;
        let classifier = CascadeClassifier::new(path_str)?;
        if classifier.empty()? {
            return Err(format!("failed to load Haar cascade from {}", path.display()).into());
        }
        log::info!("Loaded Haar cascade from {}", path.display());
        Ok(Self { classifier, params })
    }

    fn to_mat(image: &GrayImage) -> opencv::Result<Mat> {
        let mut mat = Mat::new_rows_cols_with_default(
            image.height() as i32,
            image.width() as i32,
            CV_8UC1,
            Scalar::all(0.0),
        )?;
        mat.data_bytes_mut()?.copy_from_slice(image.as_raw());
        Ok(mat)
    }
}

impl FaceDetector for CascadeFaceDetector {
    fn detect(&mut self, image: &GrayImage) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
        let mat = Self::to_mat(image)?;
        let mut faces = Vector::<Rect>::new();
        let mut neighbors = Vector::<i32>::new();
        let (min_w, min_h) = self.params.min_size;

        self.classifier.detect_multi_scale2(
            &mat,
            &mut faces,
            &mut neighbors,
            self.params.scale_factor,
            self.params.min_neighbors,
            0,
            Size::new(min_w as i32, min_h as i32),
            Size::default(),
        )?;

        Ok(faces
            .iter()
            .zip(neighbors.iter())
            .map(|(rect, n)| Detection {
                region: Region::new(rect.x, rect.y, rect.width, rect.height),
                neighbors: n,
            })
            .collect())
    }
}
