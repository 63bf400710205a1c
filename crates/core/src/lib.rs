//! ReqForge Core
//!
//! Foundational traits, error types, and pipeline data model for the
//! ReqForge workspace. This crate has zero dependencies on application-level
//! code (catalog, stages, CLI).
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `models` - Pipeline packets (`AnalysisPacket`, `RequirementsPacket`, `TaskPacket`, `ApprovalDecision`)
//! - `handler` - Domain handler trait and spec-driven handlers
//! - `synthesizer` - Plugin synthesizer capability seam
//!
//! ## Design Principles
//!
//! 1. **Zero external dependencies beyond serde/async-trait/thiserror** - keeps build times minimal
//! 2. **Trait-based abstractions** - handlers and synthesizers are swappable capabilities
//! 3. **Unidirectional dependency** - this crate depends on nothing else in the workspace

pub mod error;
pub mod handler;
pub mod models;
pub mod synthesizer;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Pipeline Data Model ────────────────────────────────────────────────
pub use models::{
    normalize_title, AnalysisPacket, ApprovalDecision, Category, FeedbackReason,
    HandlerDescriptor, Priority, Requirement, RequirementsPacket, RiskLevel, Task, TaskPacket,
    DOMAIN_TASK_SENTINEL, GENERAL_DOMAIN,
};

// ── Handler Abstraction ────────────────────────────────────────────────
pub use handler::{
    keyword_confidence, DomainHandler, HandlerSpec, RequirementSeed, RequirementTemplate,
    SpecHandler, MAX_PRIORITY,
};

// ── Synthesizer Seam ───────────────────────────────────────────────────
pub use synthesizer::{PluginSynthesizer, SynthesisError, SynthesisOutput};
