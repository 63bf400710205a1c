//! Pipeline Data Model
//!
//! Data structures flowing through the refinement pipeline: the resolved
//! analysis packet, requirement and task packets, and the quality gate's
//! approval decision with its closed feedback-reason set.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Sentinel requirement ID for domain-wide tasks not tied to a single requirement.
pub const DOMAIN_TASK_SENTINEL: &str = "DOMAIN";

/// Sentinel domain name for the no-op fallback handler.
pub const GENERAL_DOMAIN: &str = "general";

// ============================================================================
// Priorities & Categories
// ============================================================================

/// Requirement/task priority levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

/// Requirement category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Functional,
    NonFunctional,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Functional => write!(f, "functional"),
            Category::NonFunctional => write!(f, "non-functional"),
        }
    }
}

// ============================================================================
// Analysis Packet
// ============================================================================

/// Immutable result of domain resolution. Produced once per pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisPacket {
    /// Resolved domain name
    pub domain: String,
    /// Estimated complexity (0-5)
    pub complexity: u8,
    /// The raw document content
    pub content: String,
}

// ============================================================================
// Requirements
// ============================================================================

/// A single extracted requirement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    /// Unique identifier (`REQ-NNN`), stable across feedback iterations
    pub id: String,
    /// Requirement title
    pub title: String,
    /// Priority level
    pub priority: Priority,
    /// Functional vs. non-functional
    pub category: Category,
}

/// Output of the requirements stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementsPacket {
    /// Domain the requirements were extracted for
    pub domain: String,
    /// Insertion-ordered requirements, deduplicated by normalized title
    pub requirements: Vec<Requirement>,
    /// Identified stakeholders (set semantics, order irrelevant)
    pub stakeholders: Vec<String>,
    /// Whether a feedback transform was applied to this packet
    pub feedback_applied: bool,
}

impl RequirementsPacket {
    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}

/// Normalize a requirement title for deduplication: lowercase with
/// collapsed whitespace.
pub fn normalize_title(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

// ============================================================================
// Tasks
// ============================================================================

/// A single work item expanded from a requirement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier (`TASK-NNN`)
    pub id: String,
    /// Requirement this task belongs to, or [`DOMAIN_TASK_SENTINEL`]
    pub requirement_id: String,
    /// Task title
    pub title: String,
    /// Story point estimate
    pub story_points: u32,
    /// Hour estimate (story points * 3.5, rounded down)
    pub hours: u32,
    /// Priority inherited from the requirement
    pub priority: Priority,
}

impl Task {
    /// Whether this task is a domain-wide task rather than one tied to a
    /// specific requirement.
    pub fn is_domain_task(&self) -> bool {
        self.requirement_id == DOMAIN_TASK_SENTINEL
    }
}

/// Output of the task stage with aggregate metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPacket {
    /// All generated tasks
    pub tasks: Vec<Task>,
    /// Total task count
    pub total_tasks: usize,
    /// Sum of all task story points
    pub story_points: u32,
    /// Tasks per requirement (totalTasks / max(requirementCount, 1))
    pub expansion_ratio: f64,
}

impl TaskPacket {
    /// Build a packet from a task list, computing the aggregate metrics.
    pub fn from_tasks(tasks: Vec<Task>, requirement_count: usize) -> Self {
        let total_tasks = tasks.len();
        let story_points = tasks.iter().map(|t| t.story_points).sum();
        let expansion_ratio = total_tasks as f64 / requirement_count.max(1) as f64;
        Self {
            tasks,
            total_tasks,
            story_points,
            expansion_ratio,
        }
    }
}

// ============================================================================
// Approval Decision
// ============================================================================

/// Risk level derived from aggregate story points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

/// Closed set of categorized rejection reasons.
///
/// The requirements stage consumes these programmatically, so a rejection
/// never carries free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackReason {
    /// Story points exceed the manageable budget; keep high-priority only
    ReduceScope,
    /// Task count exceeds the plan budget; cut requirements hard
    TooManyTasks,
    /// Expansion ratio too high; simplify requirements
    TooComplex,
    /// Too few requirements to form an adequate scope
    ExpandScope,
    /// Rejected without a single dominating cause
    InsufficientQuality,
}

impl FeedbackReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackReason::ReduceScope => "reduce_scope",
            FeedbackReason::TooManyTasks => "too_many_tasks",
            FeedbackReason::TooComplex => "too_complex",
            FeedbackReason::ExpandScope => "expand_scope",
            FeedbackReason::InsufficientQuality => "insufficient_quality",
        }
    }
}

impl std::fmt::Display for FeedbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Verdict returned by the quality gate for one iteration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalDecision {
    /// Whether the plan passed the gate
    pub approved: bool,
    /// Score in 0..=100 (percentage of checks passed)
    pub quality_score: f64,
    /// Risk level from aggregate story points
    pub risk_level: RiskLevel,
    /// Categorized reason; always present when `approved == false`
    pub feedback: Option<FeedbackReason>,
}

// ============================================================================
// Handler Descriptor
// ============================================================================

/// Catalog entry describing a known handler, loaded or not.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerDescriptor {
    /// Unique domain name
    pub name: String,
    /// Whether the handler instance has been created (flips once, never back)
    pub loaded: bool,
    /// Handler priority (1-5)
    pub priority_score: u8,
    /// Whether this handler was synthesized at runtime
    pub custom_created: bool,
    /// Synthesis cost (abstract unit; 0.0 for built-ins)
    pub creation_cost: f64,
    /// RFC 3339 creation timestamp (synthesized handlers only)
    #[serde(default)]
    pub created_at: Option<String>,
    /// Spec file backing a persisted synthesized handler
    #[serde(default)]
    pub source_path: Option<PathBuf>,
}

impl HandlerDescriptor {
    /// Descriptor for a built-in handler discovered at scan time.
    pub fn builtin(name: impl Into<String>, priority_score: u8) -> Self {
        Self {
            name: name.into(),
            loaded: false,
            priority_score,
            custom_created: false,
            creation_cost: 0.0,
            created_at: None,
            source_path: None,
        }
    }
}
