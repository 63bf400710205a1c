//! Application-level data shapes.

pub mod report;

pub use report::{IterationRecord, PipelineReport, PipelineStatus};
