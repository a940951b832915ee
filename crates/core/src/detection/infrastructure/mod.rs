#[cfg(feature = "opencv")]
pub mod cascade_face_detector;
pub mod null_face_detector;
pub mod scripted_face_detector;
