pub mod capture_error;
pub mod capture_selfie_use_case;
pub mod pipeline_logger;
pub mod random_delay;
pub mod selfie_scheduler;
