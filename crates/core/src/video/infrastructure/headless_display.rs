use std::thread;
use std::time::Duration;

use crate::shared::frame::Frame;
use crate::video::domain::preview_display::PreviewDisplay;

/// Display used when no preview window is requested.
///
/// Frames are dropped and no key is ever reported; `wait_key` still waits
/// the requested delay so the capture loop keeps the same pacing.
pub struct HeadlessDisplay {
    paced: bool,
}

impl HeadlessDisplay {
    pub fn new() -> Self {
        Self { paced: true }
    }

    /// Skips the delay entirely.
    pub fn unpaced() -> Self {
        Self { paced: false }
    }
}

impl Default for HeadlessDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewDisplay for HeadlessDisplay {
    fn open(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }

    fn show(&mut self, _frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }

    fn wait_key(&mut self, delay: Duration) -> Result<Option<i32>, Box<dyn std::error::Error>> {
        if self.paced && !delay.is_zero() {
            thread::sleep(delay);
        }
        Ok(None)
    }

    fn close(&mut self) {}
}
