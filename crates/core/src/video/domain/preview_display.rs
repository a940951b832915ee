use std::time::Duration;

use crate::shared::frame::Frame;

/// On-screen preview of the capture loop, plus keyboard polling.
pub trait PreviewDisplay: Send {
    fn open(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Waits up to `delay` for a key press and returns its code, if any.
    fn wait_key(&mut self, delay: Duration) -> Result<Option<i32>, Box<dyn std::error::Error>>;

    fn close(&mut self);
}
