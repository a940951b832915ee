use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::shared::constants::PHOTO_EXTENSION;

/// Filename format for saved photos: UTC, truncated to the minute.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H%M";

/// Builds `<dir>/<YYYY-MM-DD-HHMM>.jpg` for the given UTC instant.
pub fn timestamped_photo_path(dir: &Path, at: DateTime<Utc>) -> PathBuf {
    dir.join(format!("{}.{PHOTO_EXTENSION}", at.format(TIMESTAMP_FORMAT)))
}

/// Creates `dir` and any missing parents. Succeeds if it already exists.
pub fn ensure_output_dir(dir: &Path) -> io::Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dir)
}
