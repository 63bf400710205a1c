//! Integration Tests
//!
//! End-to-end coverage for the refinement pipeline: ingress through the
//! orchestration loop, domain resolution with synthesis, handler catalog
//! persistence, and the feedback cycle between the gate and the
//! requirements stage.

// Full pipeline runs through the orchestrator
mod pipeline_test;

// Domain resolution, synthesis, and concurrent registration
mod resolver_test;

// Catalog scan/get/register lifecycle and restart persistence
mod catalog_test;

// Gate rejection feeding the requirements stage
mod feedback_test;
