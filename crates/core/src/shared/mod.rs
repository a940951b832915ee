pub mod box_overlay;
pub mod constants;
pub mod frame;
pub mod photo_path;
pub mod region;
