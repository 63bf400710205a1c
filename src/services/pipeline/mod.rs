//! The refinement pipeline: ingress validation and the bounded
//! orchestration loop.

pub mod ingress;
pub mod orchestrator;

pub use orchestrator::Orchestrator;
