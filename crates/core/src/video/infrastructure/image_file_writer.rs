use std::path::Path;

use image::{DynamicImage, GrayImage, RgbImage};

use crate::shared::frame::Frame;
use crate::video::domain::image_writer::ImageWriter;

/// Writes a single frame to an image file using the `image` crate.
///
/// The format follows the extension (`.jpg` for saved photos).
pub struct ImageFileWriter;

impl ImageFileWriter {
    pub fn new() -> Self {
        Self
    }

    fn to_image(frame: &Frame) -> Result<DynamicImage, Box<dyn std::error::Error>> {
        let (w, h) = (frame.width(), frame.height());
        let data = frame.data().to_vec();
        match frame.channels() {
            1 => GrayImage::from_raw(w, h, data)
                .map(DynamicImage::ImageLuma8)
                .ok_or_else(|| "Failed to create image from frame data".into()),
            3 => RgbImage::from_raw(w, h, data)
                .map(DynamicImage::ImageRgb8)
                .ok_or_else(|| "Failed to create image from frame data".into()),
            n => Err(format!("Cannot encode frame with {n} channels").into()),
        }
    }
}

impl Default for ImageFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageWriter for ImageFileWriter {
    fn write(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        // Ensure parent directory exists (infrastructure concern)
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Self::to_image(frame)?.save(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_frame(width: u32, height: u32, r: u8, g: u8, b: u8) -> Frame {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..(width * height) {
            data.push(r);
            data.push(g);
            data.push(b);
        }
        Frame::new(data, width, height, 3, 0)
    }

    #[test]
    fn test_write_creates_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("2024-01-01-1200.jpg");
        let frame = make_frame(100, 80, 50, 100, 200);
        ImageFileWriter::new().write(&path, &frame).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]); // JPEG SOI marker
        assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Jpeg);
    }

    #[test]
    fn test_jpeg_keeps_dimensions_and_approximate_colour() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        let frame = make_frame(64, 48, 200, 30, 30);
        ImageFileWriter::new().write(&path, &frame).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (64, 48));
        let pixel = img.get_pixel(32, 24).0;
        assert!(pixel[0] > 150, "red channel survives lossy encode: {pixel:?}");
        assert!(pixel[1] < 80);
    }

    #[test]
    fn test_write_gray_frame() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.jpg");
        let frame = Frame::new(vec![128; 16 * 16], 16, 16, 1, 0);
        ImageFileWriter::new().write(&path, &frame).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_write_creates_missing_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("faces").join("p.jpg");
        ImageFileWriter::new()
            .write(&path, &make_frame(8, 8, 0, 0, 0))
            .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_write_four_channels_errors() {
        let dir = tempfile::tempdir().unwrap();
        let frame = Frame::new(vec![0; 4 * 4 * 4], 4, 4, 4, 0);
        assert!(ImageFileWriter::new()
            .write(&dir.path().join("x.jpg"), &frame)
            .is_err());
    }
}
