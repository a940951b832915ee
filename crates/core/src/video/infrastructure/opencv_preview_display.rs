use std::time::Duration;

use opencv::core::{AlgorithmHint, Mat, Scalar, CV_8UC1, CV_8UC3};
use opencv::highgui;
use opencv::imgproc;
use opencv::prelude::*;

use crate::shared::frame::Frame;
use crate::video::domain::preview_display::PreviewDisplay;

/// Preview window drawn with OpenCV's highgui.
pub struct OpencvPreviewDisplay {
    window_name: String,
    is_open: bool,
}

impl OpencvPreviewDisplay {
    pub fn new(window_name: &str) -> Self {
        Self {
            window_name: window_name.to_string(),
            is_open: false,
        }
    }

    fn to_bgr_mat(frame: &Frame) -> Result<Mat, Box<dyn std::error::Error>> {
        let typ = match frame.channels() {
            1 => CV_8UC1,
            3 => CV_8UC3,
            n => return Err(format!("cannot display frame with {n} channels").into()),
        };
        let mut mat = Mat::new_rows_cols_with_default(
            frame.height() as i32,
            frame.width() as i32,
            typ,
            Scalar::all(0.0),
        )?;
        mat.data_bytes_mut()?.copy_from_slice(frame.data());
        if frame.channels() == 1 {
            return Ok(mat);
        }

        let mut bgr = Mat::default();
        imgproc::cvt_color(
            &mat,
            &mut bgr,
            imgproc::COLOR_RGB2BGR,
            0,
            AlgorithmHint::ALGO_HINT_DEFAULT,
        )?;
        Ok(bgr)
    }
}

impl PreviewDisplay for OpencvPreviewDisplay {
    fn open(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        highgui::named_window(&self.window_name, highgui::WINDOW_AUTOSIZE)?;
        self.is_open = true;
        Ok(())
    }

    fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        let mat = Self::to_bgr_mat(frame)?;
        highgui::imshow(&self.window_name, &mat)?;
        Ok(())
    }

    fn wait_key(&mut self, delay: Duration) -> Result<Option<i32>, Box<dyn std::error::Error>> {
        let key = highgui::wait_key(wait_key_millis(delay))?;
        Ok((key >= 0).then_some(key))
    }

    fn close(&mut self) {
        if self.is_open {
            let _ = highgui::destroy_window(&self.window_name);
            self.is_open = false;
        }
    }
}

impl Drop for OpencvPreviewDisplay {
    fn drop(&mut self) {
        self.close();
    }
}

/// Converts a poll delay to highgui milliseconds. highgui treats 0 as
/// "wait forever", so the result is at least 1.
fn wait_key_millis(delay: Duration) -> i32 {
    i32::try_from(delay.as_millis()).unwrap_or(i32::MAX).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::zero(Duration::ZERO, 1)]
    #[case::poll(Duration::from_millis(10), 10)]
    #[case::sub_millisecond(Duration::from_micros(400), 1)]
    #[case::huge(Duration::from_secs(u64::MAX / 1000), i32::MAX)]
    fn test_wait_key_millis(#[case] delay: Duration, #[case] expected: i32) {
        assert_eq!(wait_key_millis(delay), expected);
    }
}
