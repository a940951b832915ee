use image::imageops::{self, FilterType};
use image::{GrayImage, RgbImage};
use imageproc::contrast::equalize_histogram_mut;

use crate::shared::frame::Frame;

/// Turns a full-resolution frame into the detector's input: grayscale,
/// downscaled by an integer factor, histogram-equalised.
#[derive(Clone, Copy, Debug)]
pub struct FramePreprocessor {
    scale: u32,
}

impl FramePreprocessor {
    pub fn new(scale: u32) -> Result<Self, &'static str> {
        if scale < 1 {
            return Err("scale must be >= 1");
        }
        Ok(Self { scale })
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn prepare(&self, frame: &Frame) -> Result<GrayImage, Box<dyn std::error::Error>> {
        let gray = to_gray(frame)?;
        let width = (frame.width() / self.scale).max(1);
        let height = (frame.height() / self.scale).max(1);
        let mut small = if self.scale == 1 {
            gray
        } else {
            imageops::resize(&gray, width, height, FilterType::Triangle)
        };
        equalize_histogram_mut(&mut small);
        Ok(small)
    }
}

fn to_gray(frame: &Frame) -> Result<GrayImage, Box<dyn std::error::Error>> {
    let (w, h) = (frame.width(), frame.height());
    match frame.channels() {
        1 => GrayImage::from_raw(w, h, frame.data().to_vec())
            .ok_or_else(|| "gray frame data does not match its dimensions".into()),
        3 => {
            let rgb = RgbImage::from_raw(w, h, frame.data().to_vec())
                .ok_or("RGB frame data does not match its dimensions")?;
            Ok(imageops::grayscale(&rgb))
        }
        n => Err(format!("unsupported channel count: {n}").into()),
    }
}
