use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::shared::frame::Frame;
use crate::video::domain::camera::Camera;

/// Camera stub that replays a scripted sequence of frames and gaps.
///
/// `None` entries model reads where the device had nothing ready. After the
/// script is exhausted, every read returns a clone of the repeat frame (or
/// nothing, if no repeat frame was set).
pub struct ScriptedCamera {
    script: VecDeque<Option<Frame>>,
    repeat: Option<Frame>,
    fail_open: bool,
    is_open: bool,
    reads: Arc<AtomicUsize>,
    opens: Arc<AtomicUsize>,
}

impl ScriptedCamera {
    pub fn new(script: Vec<Option<Frame>>, repeat: Option<Frame>) -> Self {
        Self {
            script: script.into(),
            repeat,
            fail_open: false,
            is_open: false,
            reads: Arc::new(AtomicUsize::new(0)),
            opens: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Yields the same frame forever.
    pub fn repeating(frame: Frame) -> Self {
        Self::new(Vec::new(), Some(frame))
    }

    /// Never yields a frame.
    pub fn empty() -> Self {
        Self::new(Vec::new(), None)
    }

    /// Makes `open` fail, as when no device exists at the index.
    pub fn failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    pub fn read_counter(&self) -> Arc<AtomicUsize> {
        self.reads.clone()
    }

    pub fn open_counter(&self) -> Arc<AtomicUsize> {
        self.opens.clone()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }
}

impl Camera for ScriptedCamera {
    fn open(&mut self, index: u32) -> Result<(), Box<dyn std::error::Error>> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        if self.fail_open {
            return Err(format!("no camera at index {index}").into());
        }
        self.is_open = true;
        Ok(())
    }

    fn next_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if !self.is_open {
            return Ok(None);
        }
        match self.script.pop_front() {
            Some(entry) => Ok(entry),
            None => Ok(self.repeat.clone()),
        }
    }

    fn close(&mut self) {
        self.is_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(index: usize) -> Frame {
        Frame::new(vec![0; 12], 2, 2, 3, index)
    }

    #[test]
    fn test_replays_script_then_repeat() {
        let mut cam = ScriptedCamera::new(vec![None, Some(frame(1))], Some(frame(9)));
        cam.open(0).unwrap();
        assert!(cam.next_frame().unwrap().is_none());
        assert_eq!(cam.next_frame().unwrap().unwrap().index(), 1);
        assert_eq!(cam.next_frame().unwrap().unwrap().index(), 9);
        assert_eq!(cam.next_frame().unwrap().unwrap().index(), 9);
    }

    #[test]
    fn test_closed_camera_yields_nothing() {
        let mut cam = ScriptedCamera::repeating(frame(0));
        assert!(cam.next_frame().unwrap().is_none());
        cam.open(0).unwrap();
        assert!(cam.next_frame().unwrap().is_some());
        cam.close();
        assert!(!cam.is_open());
        assert!(cam.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_failing_open() {
        let mut cam = ScriptedCamera::repeating(frame(0)).failing_open();
        let opens = cam.open_counter();
        assert!(cam.open(3).is_err());
        assert!(cam.next_frame().unwrap().is_none());
        assert_eq!(opens.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_read_counter() {
        let mut cam = ScriptedCamera::empty();
        let reads = cam.read_counter();
        cam.open(0).unwrap();
        for _ in 0..4 {
            cam.next_frame().unwrap();
        }
        assert_eq!(reads.load(Ordering::SeqCst), 4);
    }
}
