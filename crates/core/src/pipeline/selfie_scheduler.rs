use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::pipeline::capture_error::CaptureError;
use crate::pipeline::capture_selfie_use_case::{CaptureAttempt, CaptureOutcome};
use crate::pipeline::random_delay::{sleep_for_up_to, Sleeper};
use crate::shared::photo_path::ensure_output_dir;

#[derive(Clone, Debug)]
pub struct SchedulerSettings {
    pub camera_index: u32,
    pub output_dir: PathBuf,
    /// Upper bound, in hours, of the random wait before the first attempt.
    pub random_interval_hours: u32,
    /// Upper bound, in hours, of the random wait between failed attempts.
    pub retry_interval_hours: u32,
    /// Stop with an error after this many retries. `None` retries forever.
    pub max_retries: Option<u32>,
}

/// Outer driver: random initial delay, then capture attempts separated by
/// random retry delays until one saves a photo.
pub struct SelfieScheduler {
    settings: SchedulerSettings,
    sleeper: Box<dyn Sleeper>,
    rng: StdRng,
}

impl SelfieScheduler {
    pub fn new(settings: SchedulerSettings, sleeper: Box<dyn Sleeper>) -> Self {
        Self {
            settings,
            sleeper,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Runs until a photo is saved and returns its path.
    pub fn run(&mut self, capture: &mut dyn CaptureAttempt) -> Result<PathBuf, CaptureError> {
        sleep_for_up_to(
            self.settings.random_interval_hours,
            &mut self.rng,
            self.sleeper.as_mut(),
        );

        let dir = &self.settings.output_dir;
        ensure_output_dir(dir).map_err(|source| CaptureError::OutputDir {
            path: dir.clone(),
            source,
        })?;

        let mut attempts = 0u32;
        loop {
            attempts += 1;
            log::info!(
                "Capture attempt {attempts} on camera {}",
                self.settings.camera_index
            );

            match capture.attempt(self.settings.camera_index)? {
                CaptureOutcome::Saved(path) => {
                    log::info!("Photo saved to {}", path.display());
                    return Ok(path);
                }
                CaptureOutcome::Interrupted => log::info!("Attempt {attempts} interrupted"),
                CaptureOutcome::Exhausted => log::info!("Attempt {attempts} found no face"),
            }

            if let Some(max) = self.settings.max_retries {
                if attempts > max {
                    return Err(CaptureError::RetriesExhausted { attempts });
                }
            }

            sleep_for_up_to(
                self.settings.retry_interval_hours,
                &mut self.rng,
                self.sleeper.as_mut(),
            );
        }
    }
}
