//! Requirement-to-task decomposition.

pub mod decomposer;

pub use decomposer::TaskStage;
