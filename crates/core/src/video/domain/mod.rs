pub mod camera;
pub mod image_writer;
pub mod preview_display;
