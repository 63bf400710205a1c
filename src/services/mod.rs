//! Service layer: handlers, requirements, tasks, and the pipeline.

pub mod handlers;
pub mod pipeline;
pub mod requirements;
pub mod tasks;
