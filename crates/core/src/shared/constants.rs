use std::time::Duration;

/// Faces must be found on this many frames before a photo is saved, so the
/// first (possibly blurred) frame of someone entering the scene is skipped.
pub const CONFIRMATION_FRAMES: u32 = 10;

/// Frame iterations per capture attempt (about a minute of wall time).
pub const ATTEMPT_BUDGET: u32 = 160;

/// Downscale factor applied before detection.
pub const IMAGE_SCALE: u32 = 2;

/// Wait between loop iterations; also the key-poll window.
pub const KEY_POLL_DELAY: Duration = Duration::from_millis(10);

// Haar detection tuned for speed over accuracy.
pub const HAAR_SCALE_FACTOR: f64 = 1.2;
pub const HAAR_MIN_NEIGHBORS: i32 = 2;
pub const HAAR_MIN_FACE_SIZE: (u32, u32) = (20, 20);

pub const WINDOW_NAME: &str = "Quantified Selfies";

pub const DEFAULT_CASCADE_PATH: &str =
    "/usr/share/opencv4/haarcascades/haarcascade_frontalface_alt.xml";

/// Subdirectory of the user's picture directory used when `--dir` is omitted.
pub const DEFAULT_PHOTO_SUBDIR: &str = "faces";

pub const PHOTO_EXTENSION: &str = "jpg";

/// Overlay box colour (RGB) and stroke width in pixels.
pub const BOX_COLOR: [u8; 3] = [255, 0, 0];
pub const BOX_THICKNESS: u32 = 3;
