use crate::shared::frame::Frame;

/// A frame source addressed by device index.
///
/// Implementations handle device and pixel-format details while the
/// capture loop works with the abstract `Frame` type.
pub trait Camera: Send {
    /// Opens the device with the given index.
    fn open(&mut self, index: u32) -> Result<(), Box<dyn std::error::Error>>;

    /// Returns the next frame, or `None` if none is available yet.
    fn next_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>>;

    /// Releases the device. Safe to call when not open.
    fn close(&mut self);
}
