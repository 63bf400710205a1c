//! ReqForge Quality Gates
//!
//! Threshold configuration and the gate evaluator for task plan approval.
//! This crate compiles independently of the application crate:
//!
//! - `models` - Gate data types (GateConfig, QualityChecks, GateEvaluation)
//! - `gate` - The evaluator (QualityGate)
//!
//! The feedback loop that consumes gate rejections lives in the main
//! crate's `services::pipeline` module.

pub mod gate;
pub mod models;

// Re-export core model types
pub use models::{GateConfig, GateEvaluation, QualityChecks};

// Re-export the evaluator
pub use gate::QualityGate;
