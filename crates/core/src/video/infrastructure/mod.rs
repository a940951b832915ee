pub mod headless_display;
pub mod image_file_writer;
#[cfg(feature = "opencv")]
pub mod opencv_camera;
#[cfg(feature = "opencv")]
pub mod opencv_preview_display;
pub mod scripted_camera;
