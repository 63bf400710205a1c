//! Quality Gate Models
//!
//! Threshold configuration and per-check results for task plan evaluation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use reqforge_core::ApprovalDecision;

/// Threshold configuration for the gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateConfig {
    /// Maximum acceptable task count
    #[serde(default = "default_max_tasks")]
    pub max_tasks: usize,
    /// Maximum acceptable aggregate story points
    #[serde(default = "default_max_story_points")]
    pub max_story_points: u32,
    /// Minimum requirement count for adequate scope
    #[serde(default = "default_min_requirements")]
    pub min_requirements: usize,
    /// Maximum acceptable tasks-per-requirement ratio
    #[serde(default = "default_max_expansion_ratio")]
    pub max_expansion_ratio: f64,
    /// Story points above which risk is high
    #[serde(default = "default_high_risk_points")]
    pub high_risk_points: u32,
    /// Story points above which risk is medium
    #[serde(default = "default_medium_risk_points")]
    pub medium_risk_points: u32,
    /// Minimum quality score for approval
    #[serde(default = "default_approval_score")]
    pub approval_score: f64,
}

fn default_max_tasks() -> usize {
    50
}

fn default_max_story_points() -> u32 {
    80
}

fn default_min_requirements() -> usize {
    3
}

fn default_max_expansion_ratio() -> f64 {
    15.0
}

fn default_high_risk_points() -> u32 {
    100
}

fn default_medium_risk_points() -> u32 {
    60
}

fn default_approval_score() -> f64 {
    75.0
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            max_tasks: default_max_tasks(),
            max_story_points: default_max_story_points(),
            min_requirements: default_min_requirements(),
            max_expansion_ratio: default_max_expansion_ratio(),
            high_risk_points: default_high_risk_points(),
            medium_risk_points: default_medium_risk_points(),
            approval_score: default_approval_score(),
        }
    }
}

/// The four independently computed checks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityChecks {
    pub reasonable_task_count: bool,
    pub manageable_story_points: bool,
    pub adequate_scope: bool,
    pub good_task_ratio: bool,
}

impl QualityChecks {
    /// Number of checks that passed (0-4).
    pub fn passed_count(&self) -> usize {
        [
            self.reasonable_task_count,
            self.manageable_story_points,
            self.adequate_scope,
            self.good_task_ratio,
        ]
        .iter()
        .filter(|c| **c)
        .count()
    }

    pub fn all_passed(&self) -> bool {
        self.passed_count() == 4
    }
}

/// Full evaluation record for one gate run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateEvaluation {
    /// The accept/reject verdict
    pub decision: ApprovalDecision,
    /// Per-check breakdown
    pub checks: QualityChecks,
    /// When the evaluation ran
    pub evaluated_at: DateTime<Utc>,
}
