use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::detection::domain::face_detector::{Detection, FaceDetector};
use crate::detection::domain::frame_preprocessor::FramePreprocessor;
use crate::pipeline::capture_error::CaptureError;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::box_overlay::draw_boxes;
use crate::shared::constants::{ATTEMPT_BUDGET, CONFIRMATION_FRAMES, IMAGE_SCALE, KEY_POLL_DELAY};
use crate::shared::frame::Frame;
use crate::shared::photo_path::timestamped_photo_path;
use crate::shared::region::Region;
use crate::video::domain::camera::Camera;
use crate::video::domain::image_writer::ImageWriter;
use crate::video::domain::preview_display::PreviewDisplay;

/// Knobs for one capture attempt.
#[derive(Clone, Debug)]
pub struct CaptureSettings {
    pub output_dir: PathBuf,
    /// Loop iterations (frames or empty reads) before giving up.
    pub attempt_budget: u32,
    /// Face-positive frames required before saving.
    pub confirmations: u32,
    pub image_scale: u32,
    pub key_poll_delay: Duration,
    pub draw_boxes: bool,
}

impl CaptureSettings {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            attempt_budget: ATTEMPT_BUDGET,
            confirmations: CONFIRMATION_FRAMES,
            image_scale: IMAGE_SCALE,
            key_poll_delay: KEY_POLL_DELAY,
            draw_boxes: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// A face was confirmed and the photo written to this path.
    Saved(PathBuf),
    /// A key was pressed in the preview window.
    Interrupted,
    /// The attempt budget ran out.
    Exhausted,
}

impl CaptureOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, CaptureOutcome::Saved(_))
    }

    pub fn saved_path(&self) -> Option<&Path> {
        match self {
            CaptureOutcome::Saved(path) => Some(path),
            _ => None,
        }
    }
}

/// Counters for a single `execute` call. Created fresh on every attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaptureState {
    pub remaining_confirmations: u32,
    pub attempts: u32,
    pub frames_processed: u32,
    pub frames_missed: u32,
}

impl CaptureState {
    fn new(confirmations: u32) -> Self {
        Self {
            remaining_confirmations: confirmations,
            attempts: 0,
            frames_processed: 0,
            frames_missed: 0,
        }
    }
}

/// One try at taking a photo; the seam the scheduler retries on.
pub trait CaptureAttempt {
    fn attempt(&mut self, camera_index: u32) -> Result<CaptureOutcome, CaptureError>;
}

pub type Clock = Box<dyn Fn() -> DateTime<Utc> + Send>;

/// The capture loop: fetch → normalise → preprocess → detect → confirm → save.
///
/// Faces must be seen on `confirmations` frames within one attempt before the
/// full-resolution frame is written. Frames without a face do not reset the
/// count. With `draw_boxes` set, the outline goes on the frame itself, so it
/// shows in both the preview and the saved photo. Camera and preview are opened at the start of every attempt and
/// closed on every exit path.
pub struct CaptureSelfieUseCase {
    camera: Box<dyn Camera>,
    detector: Box<dyn FaceDetector>,
    display: Box<dyn PreviewDisplay>,
    image_writer: Box<dyn ImageWriter>,
    logger: Box<dyn PipelineLogger>,
    preprocessor: FramePreprocessor,
    settings: CaptureSettings,
    clock: Clock,
    last_state: Option<CaptureState>,
}

impl CaptureSelfieUseCase {
    pub fn new(
        camera: Box<dyn Camera>,
        detector: Box<dyn FaceDetector>,
        display: Box<dyn PreviewDisplay>,
        image_writer: Box<dyn ImageWriter>,
        logger: Box<dyn PipelineLogger>,
        settings: CaptureSettings,
    ) -> Result<Self, &'static str> {
        if settings.attempt_budget < 1 {
            return Err("attempt_budget must be >= 1");
        }
        if settings.confirmations < 1 {
            return Err("confirmations must be >= 1");
        }
        let preprocessor = FramePreprocessor::new(settings.image_scale)?;
        Ok(Self {
            camera,
            detector,
            display,
            image_writer,
            logger,
            preprocessor,
            settings,
            clock: Box::new(Utc::now),
            last_state: None,
        })
    }

    /// Replaces the wall clock used to name saved photos.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Counters from the most recent `execute` call.
    pub fn last_state(&self) -> Option<CaptureState> {
        self.last_state
    }

    /// Returns `true` if a photo was saved during this attempt.
    pub fn run(&mut self, camera_index: u32) -> Result<bool, CaptureError> {
        Ok(self.execute(camera_index)?.is_saved())
    }

    pub fn execute(&mut self, camera_index: u32) -> Result<CaptureOutcome, CaptureError> {
        let mut state = CaptureState::new(self.settings.confirmations);
        self.logger.reset();

        if let Err(e) = self.camera.open(camera_index) {
            log::warn!("Could not open camera {camera_index}: {e}");
        }
        if let Err(e) = self.display.open() {
            log::warn!("Could not open preview window: {e}");
        }

        let outcome = self.run_loop(&mut state);

        self.camera.close();
        self.display.close();
        self.logger.summary();
        self.last_state = Some(state);
        outcome
    }

    fn run_loop(&mut self, state: &mut CaptureState) -> Result<CaptureOutcome, CaptureError> {
        let budget = self.settings.attempt_budget;

        while state.attempts < budget {
            state.attempts += 1;
            self.logger
                .progress(state.attempts as usize, budget as usize);

            let Some(frame) = self.fetch_frame() else {
                state.frames_missed += 1;
                // Give a sleepy camera time to wake up; keys are ignored here.
                self.poll_key();
                continue;
            };
            let mut frame = match frame.normalized() {
                Ok(frame) => frame,
                Err(e) => {
                    log::warn!("Dropping malformed frame {}: {e}", frame.index());
                    state.frames_missed += 1;
                    self.poll_key();
                    continue;
                }
            };
            state.frames_processed += 1;

            let detections = self.detect(&frame);
            if !detections.is_empty() {
                if self.settings.draw_boxes {
                    self.overlay(&mut frame, &detections);
                }
                state.remaining_confirmations = state.remaining_confirmations.saturating_sub(1);
                if state.remaining_confirmations == 0 {
                    let path = self.save(&frame)?;
                    self.show_preview(&frame);
                    return Ok(CaptureOutcome::Saved(path));
                }
            }

            self.show_preview(&frame);

            if let Some(key) = self.poll_key() {
                self.logger
                    .info(&format!("Key {key} pressed, abandoning attempt"));
                return Ok(CaptureOutcome::Interrupted);
            }
        }

        self.logger.info(&format!(
            "No face confirmed within {budget} iterations ({} frames, {} still needed)",
            state.frames_processed, state.remaining_confirmations
        ));
        Ok(CaptureOutcome::Exhausted)
    }

    fn fetch_frame(&mut self) -> Option<Frame> {
        match self.camera.next_frame() {
            Ok(frame) => frame,
            Err(e) => {
                log::debug!("Frame read failed: {e}");
                None
            }
        }
    }

    fn detect(&mut self, frame: &Frame) -> Vec<Detection> {
        let start = Instant::now();
        let small = match self.preprocessor.prepare(frame) {
            Ok(image) => image,
            Err(e) => {
                log::warn!("Could not preprocess frame {}: {e}", frame.index());
                return Vec::new();
            }
        };
        self.logger
            .timing("preprocess", start.elapsed().as_secs_f64() * 1000.0);

        let start = Instant::now();
        let result = self.detector.detect(&small);
        self.logger
            .timing("detection", start.elapsed().as_secs_f64() * 1000.0);

        match result {
            Ok(detections) => {
                self.logger.metric("faces", detections.len() as f64);
                if let Some(best) = detections.iter().map(|d| d.neighbors).max() {
                    self.logger.metric("neighbors", best as f64);
                }
                detections
            }
            Err(e) => {
                log::warn!("Face detection failed: {e}");
                Vec::new()
            }
        }
    }

    fn save(&mut self, frame: &Frame) -> Result<PathBuf, CaptureError> {
        let path = timestamped_photo_path(&self.settings.output_dir, (self.clock)());
        self.image_writer
            .write(&path, frame)
            .map_err(|e| CaptureError::Save {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        self.logger
            .info(&format!("Saved photo to {}", path.display()));
        Ok(path)
    }

    fn overlay(&self, frame: &mut Frame, detections: &[Detection]) {
        let scale = self.preprocessor.scale();
        let boxes: Vec<Region> = detections.iter().map(|d| d.region.scaled(scale)).collect();
        draw_boxes(frame, &boxes);
    }

    fn show_preview(&mut self, frame: &Frame) {
        if let Err(e) = self.display.show(frame) {
            log::warn!("Could not update preview: {e}");
        }
    }

    fn poll_key(&mut self) -> Option<i32> {
        match self.display.wait_key(self.settings.key_poll_delay) {
            Ok(key) => key,
            Err(e) => {
                log::warn!("Key poll failed: {e}");
                None
            }
        }
    }
}

impl CaptureAttempt for CaptureSelfieUseCase {
    fn attempt(&mut self, camera_index: u32) -> Result<CaptureOutcome, CaptureError> {
        self.execute(camera_index)
    }
}
