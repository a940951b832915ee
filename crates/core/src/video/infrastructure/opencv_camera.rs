//! Webcam frame source using OpenCV's `VideoCapture`.

use opencv::core::{AlgorithmHint, Mat};
use opencv::imgproc;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};

use crate::shared::frame::Frame;
use crate::video::domain::camera::Camera;

/// Camera backed by `VideoCapture`; frames are converted from BGR to
/// tightly packed RGB before they leave this module.
pub struct OpencvCamera {
    capture: Option<VideoCapture>,
    frame_index: usize,
}

impl OpencvCamera {
    pub fn new() -> Self {
        Self {
            capture: None,
            frame_index: 0,
        }
    }

    fn to_frame(&self, bgr: &Mat) -> opencv::Result<Frame> {
        let mut rgb = Mat::default();
        imgproc::cvt_color(
            bgr,
            &mut rgb,
            imgproc::COLOR_BGR2RGB,
            0,
            AlgorithmHint::ALGO_HINT_DEFAULT,
        )?;
        // cvt_color output is freshly allocated, hence continuous
        let data = rgb.data_bytes()?.to_vec();
        Ok(Frame::new(
            data,
            rgb.cols() as u32,
            rgb.rows() as u32,
            3,
            self.frame_index,
        ))
    }
}

impl Default for OpencvCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera for OpencvCamera {
    fn open(&mut self, index: u32) -> Result<(), Box<dyn std::error::Error>> {
        self.close();
        let capture = VideoCapture::new(index as i32, videoio::CAP_ANY)?;
        if !capture.is_opened()? {
            return Err(format!("camera {index} could not be opened").into());
        }
        log::info!("Opened camera {index}");
        self.capture = Some(capture);
        self.frame_index = 0;
        Ok(())
    }

    fn next_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        let Some(capture) = self.capture.as_mut() else {
            return Ok(None);
        };
        let mut bgr = Mat::default();
        if !capture.read(&mut bgr)? || bgr.empty() {
            return Ok(None);
        }
        let frame = self.to_frame(&bgr)?;
        self.frame_index += 1;
        Ok(Some(frame))
    }

    fn close(&mut self) {
        if let Some(mut capture) = self.capture.take() {
            let _ = capture.release();
        }
    }
}

impl Drop for OpencvCamera {
    fn drop(&mut self) {
        self.close();
    }
}
