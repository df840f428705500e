//! Input processing module
//! Handles file detection, text extraction, and record loading

pub mod file_detector;
pub mod manager;
pub mod records;
pub mod text_extractor;

pub use file_detector::FileType;
pub use manager::InputManager;
pub use records::{Candidate, ExperienceBounds, JobDescription, Location, Requirements};
