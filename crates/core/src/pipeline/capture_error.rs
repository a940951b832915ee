use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to save photo to {path}: {reason}")]
    Save { path: PathBuf, reason: String },
    #[error("no face confirmed after {attempts} capture attempts")]
    RetriesExhausted { attempts: u32 },
}
