use std::path::PathBuf;
use std::process;

use clap::Parser;

use selfie_core::pipeline::capture_selfie_use_case::CaptureSelfieUseCase;
use selfie_core::pipeline::random_delay::ThreadSleeper;
use selfie_core::pipeline::selfie_scheduler::{SchedulerSettings, SelfieScheduler};
use selfie_core::shared::constants::{DEFAULT_CASCADE_PATH, DEFAULT_PHOTO_SUBDIR};

/// Take a photo containing a face with your webcam after a random interval.
/// If no face was found, wait another random interval and try again.
/// Tip: schedule this to run daily.
#[derive(Parser, Debug)]
#[command(name = "quantified-selfies")]
struct Cli {
    /// Camera index. Usually 0 but try other integers.
    #[arg(short = 'i', long = "camera_index", default_value_t = 0)]
    camera_index: u32,

    /// Directory to save photos [default: <pictures>/faces].
    #[arg(short = 'd', long = "dir")]
    dir: Option<PathBuf>,

    /// Haar cascade file.
    #[arg(short = 'c', long = "cascade", default_value = DEFAULT_CASCADE_PATH)]
    cascade: PathBuf,

    /// Show camera image in window.
    #[arg(short = 'w', long = "window")]
    window: bool,

    /// Draw a box around the detected face.
    #[arg(short = 'b', long = "box")]
    draw_box: bool,

    /// Max hours to wait before taking a photo.
    #[arg(long = "random_interval", default_value_t = 3)]
    random_interval: u32,

    /// Max hours to wait between attempts at taking a photo, in case no face detected.
    #[arg(long = "retry_interval", default_value_t = 1)]
    retry_interval: u32,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    log::info!("{cli:?}");

    let output_dir = cli.dir.clone().unwrap_or_else(default_photo_dir);
    let mut capture = build_capture(&cli, output_dir.clone())?;

    let mut scheduler = SelfieScheduler::new(
        SchedulerSettings {
            camera_index: cli.camera_index,
            output_dir,
            random_interval_hours: cli.random_interval,
            retry_interval_hours: cli.retry_interval,
            max_retries: None,
        },
        Box::new(ThreadSleeper),
    );

    let path = scheduler.run(&mut capture)?;
    println!("{}", path.display());
    Ok(())
}

#[cfg(feature = "opencv")]
fn build_capture(
    cli: &Cli,
    output_dir: PathBuf,
) -> Result<CaptureSelfieUseCase, Box<dyn std::error::Error>> {
    use selfie_core::detection::domain::face_detector::DetectionParams;
    use selfie_core::detection::infrastructure::cascade_face_detector::CascadeFaceDetector;
    use selfie_core::detection::infrastructure::null_face_detector::detector_or_null;
    use selfie_core::pipeline::capture_selfie_use_case::CaptureSettings;
    use selfie_core::pipeline::pipeline_logger::StdoutPipelineLogger;
    use selfie_core::shared::constants::WINDOW_NAME;
    use selfie_core::video::domain::preview_display::PreviewDisplay;
    use selfie_core::video::infrastructure::headless_display::HeadlessDisplay;
    use selfie_core::video::infrastructure::image_file_writer::ImageFileWriter;
    use selfie_core::video::infrastructure::opencv_camera::OpencvCamera;
    use selfie_core::video::infrastructure::opencv_preview_display::OpencvPreviewDisplay;

    let detector = detector_or_null(
        CascadeFaceDetector::load(&cli.cascade, DetectionParams::default()),
        &cli.cascade,
    );
    let display: Box<dyn PreviewDisplay> = if cli.window {
        Box::new(OpencvPreviewDisplay::new(WINDOW_NAME))
    } else {
        Box::new(HeadlessDisplay::new())
    };

    let settings = CaptureSettings {
        draw_boxes: cli.draw_box,
        ..CaptureSettings::new(output_dir)
    };

    let capture = CaptureSelfieUseCase::new(
        Box::new(OpencvCamera::new()),
        detector,
        display,
        Box::new(ImageFileWriter::new()),
        Box::new(StdoutPipelineLogger::default()),
        settings,
    )?;
    Ok(capture)
}

#[cfg(not(feature = "opencv"))]
fn build_capture(
    _cli: &Cli,
    _output_dir: PathBuf,
) -> Result<CaptureSelfieUseCase, Box<dyn std::error::Error>> {
    Err("no camera backend compiled in; rebuild with `--features opencv`".into())
}

fn default_photo_dir() -> PathBuf {
    dirs::picture_dir()
        .or_else(dirs::home_dir)
        .map(|dir| dir.join(DEFAULT_PHOTO_SUBDIR))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PHOTO_SUBDIR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["quantified-selfies"]).unwrap();
        assert_eq!(cli.camera_index, 0);
        assert_eq!(cli.dir, None);
        assert_eq!(cli.cascade, PathBuf::from(DEFAULT_CASCADE_PATH));
        assert!(!cli.window);
        assert!(!cli.draw_box);
        assert_eq!(cli.random_interval, 3);
        assert_eq!(cli.retry_interval, 1);
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from([
            "quantified-selfies",
            "-i",
            "2",
            "-d",
            "/tmp/faces",
            "-c",
            "cascade.xml",
            "-w",
            "-b",
        ])
        .unwrap();
        assert_eq!(cli.camera_index, 2);
        assert_eq!(cli.dir, Some(PathBuf::from("/tmp/faces")));
        assert_eq!(cli.cascade, PathBuf::from("cascade.xml"));
        assert!(cli.window);
        assert!(cli.draw_box);
    }

    #[test]
    fn test_underscored_long_flags() {
        let cli = Cli::try_parse_from([
            "quantified-selfies",
            "--camera_index",
            "1",
            "--random_interval",
            "0",
            "--retry_interval",
            "5",
            "--box",
            "--window",
        ])
        .unwrap();
        assert_eq!(cli.camera_index, 1);
        assert_eq!(cli.random_interval, 0);
        assert_eq!(cli.retry_interval, 5);
        assert!(cli.draw_box);
        assert!(cli.window);
    }

    #[test]
    fn test_negative_interval_rejected() {
        assert!(Cli::try_parse_from(["quantified-selfies", "--random_interval", "-1"]).is_err());
    }

    #[test]
    fn test_default_photo_dir_ends_with_faces() {
        assert!(default_photo_dir().ends_with(DEFAULT_PHOTO_SUBDIR));
    }
}
