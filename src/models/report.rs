//! Pipeline Report
//!
//! The shapes a finished pipeline run is reported in: a terminal status,
//! per-iteration records, and the final bundled packets.

use serde::{Deserialize, Serialize};

use reqforge_core::{ApprovalDecision, RequirementsPacket, TaskPacket};

/// Terminal status of a pipeline run. Hard input errors never produce a
/// report at all; they surface as errors from ingress instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    Approved,
    Rejected,
}

impl std::fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineStatus::Approved => write!(f, "approved"),
            PipelineStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Metrics and verdict for one refinement iteration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IterationRecord {
    /// 1-based iteration number
    pub iteration: u32,
    pub requirement_count: usize,
    pub total_tasks: usize,
    pub story_points: u32,
    pub decision: ApprovalDecision,
}

/// Full result of one pipeline run.
///
/// `approval` is the final gate decision; when `status` is rejected its
/// `feedback` field carries the last categorized reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineReport {
    /// Unique identifier for this run
    pub run_id: String,
    pub status: PipelineStatus,
    /// Resolved domain name
    pub domain: String,
    /// Estimated content complexity (0-5)
    pub complexity: u8,
    /// Whether domain resolution minted a new handler for this run
    pub was_synthesized: bool,
    /// Synthesis cost (abstract unit; 0.0 when nothing was synthesized)
    pub synthesis_cost: f64,
    /// Number of gate evaluations performed
    pub iterations: u32,
    /// Wall-clock time for the whole run, in milliseconds
    pub duration_ms: u64,
    /// Final requirements packet
    pub requirements: RequirementsPacket,
    /// Final task packet
    pub tasks: TaskPacket,
    /// Final gate decision
    pub approval: ApprovalDecision,
    /// One record per iteration, in order
    pub history: Vec<IterationRecord>,
}
