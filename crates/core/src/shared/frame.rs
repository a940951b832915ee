use ndarray::{s, ArrayView3, ShapeError};

/// Row order of the pixel buffer as delivered by the camera backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FrameOrigin {
    /// First row is the top of the image.
    #[default]
    TopLeft,
    /// First row is the bottom of the image; needs a vertical flip.
    BottomLeft,
}

/// A single camera frame: contiguous RGB (or gray) bytes in row-major order.
///
/// Format conversion happens at backend boundaries only; the capture loop
/// treats pixel data as opaque apart from orientation.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
    origin: FrameOrigin,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
            origin: FrameOrigin::TopLeft,
        }
    }

    pub fn with_origin(mut self, origin: FrameOrigin) -> Self {
        self.origin = origin;
        self
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn origin(&self) -> FrameOrigin {
        self.origin
    }

    /// Returns a top-left-origin copy of this frame.
    ///
    /// Top-left frames are cloned as-is; bottom-left frames are flipped
    /// vertically. Fails if the buffer does not match the dimensions.
    pub fn normalized(&self) -> Result<Frame, ShapeError> {
        match self.origin {
            FrameOrigin::TopLeft => Ok(self.clone()),
            FrameOrigin::BottomLeft => {
                let data = self
                    .as_ndarray()?
                    .slice(s![..;-1, .., ..])
                    .iter()
                    .copied()
                    .collect();
                Ok(Frame {
                    data,
                    width: self.width,
                    height: self.height,
                    channels: self.channels,
                    index: self.index,
                    origin: FrameOrigin::TopLeft,
                })
            }
        }
    }

    pub fn as_ndarray(&self) -> Result<ArrayView3<'_, u8>, ShapeError> {
        ArrayView3::from_shape(self.shape(), &self.data)
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2 columns, 3 rows, 1 channel; each row filled with its row number.
    fn striped_frame(origin: FrameOrigin) -> Frame {
        Frame::new(vec![0, 0, 1, 1, 2, 2], 2, 3, 1, 7).with_origin(origin)
    }

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let frame = Frame::new(data.clone(), 2, 2, 3, 5);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.index(), 5);
        assert_eq!(frame.origin(), FrameOrigin::TopLeft);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * channels")]
    fn test_mismatched_data_length_panics_in_debug() {
        let data = vec![0u8; 10]; // wrong size for 2x2x3
        Frame::new(data, 2, 2, 3, 0);
    }

    #[test]
    fn test_normalized_top_left_is_unchanged() {
        let frame = striped_frame(FrameOrigin::TopLeft);
        let normalized = frame.normalized().unwrap();
        assert_eq!(normalized.data(), frame.data());
        assert_eq!(normalized.origin(), FrameOrigin::TopLeft);
    }

    #[test]
    fn test_normalized_bottom_left_flips_rows() {
        let frame = striped_frame(FrameOrigin::BottomLeft);
        let normalized = frame.normalized().unwrap();
        assert_eq!(normalized.data(), &[2, 2, 1, 1, 0, 0]);
        assert_eq!(normalized.origin(), FrameOrigin::TopLeft);
        assert_eq!(normalized.index(), 7);
    }

    #[test]
    fn test_normalized_flip_keeps_pixel_channels_together() {
        // 1 column, 2 rows, RGB
        let frame =
            Frame::new(vec![1, 2, 3, 4, 5, 6], 1, 2, 3, 0).with_origin(FrameOrigin::BottomLeft);
        assert_eq!(frame.normalized().unwrap().data(), &[4, 5, 6, 1, 2, 3]);
    }

    #[test]
    fn test_as_ndarray_rejects_short_buffer() {
        let frame = Frame {
            data: vec![0; 5],
            width: 2,
            height: 3,
            channels: 1,
            index: 0,
            origin: FrameOrigin::BottomLeft,
        };
        assert!(frame.as_ndarray().is_err());
        assert!(frame.normalized().is_err());
    }
}
