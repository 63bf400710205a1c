//! Requirements extraction and feedback-driven reprocessing.

pub mod extractor;
pub mod feedback;

pub use extractor::{RequirementsStage, MAX_REQUIREMENTS};
