pub mod face_detector;
pub mod frame_preprocessor;
