//! Quality Gate Evaluator
//!
//! Evaluates aggregate task plan metrics against fixed thresholds and
//! returns an approve/reject decision with a single categorized feedback
//! reason the requirements stage can act on.

use chrono::Utc;
use tracing::debug;

use reqforge_core::{ApprovalDecision, FeedbackReason, RiskLevel, TaskPacket};

use crate::models::{GateConfig, GateEvaluation, QualityChecks};

/// The approval checkpoint at the end of each pipeline iteration.
#[derive(Debug, Clone, Default)]
pub struct QualityGate {
    config: GateConfig,
}

impl QualityGate {
    pub fn new(config: GateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Evaluate a task plan against the configured thresholds.
    ///
    /// The quality score is the fraction of passed checks scaled to 0-100;
    /// risk comes from aggregate story points alone. A rejection always
    /// carries exactly one feedback reason, chosen by fixed priority:
    /// over-budget story points, then task count, then expansion ratio,
    /// then scope, then a generic fallback.
    pub fn evaluate(&self, packet: &TaskPacket, requirement_count: usize) -> GateEvaluation {
        let checks = QualityChecks {
            reasonable_task_count: packet.total_tasks <= self.config.max_tasks,
            manageable_story_points: packet.story_points <= self.config.max_story_points,
            adequate_scope: requirement_count >= self.config.min_requirements,
            good_task_ratio: packet.expansion_ratio <= self.config.max_expansion_ratio,
        };

        let quality_score = 100.0 * checks.passed_count() as f64 / 4.0;

        let risk_level = if packet.story_points > self.config.high_risk_points {
            RiskLevel::High
        } else if packet.story_points > self.config.medium_risk_points {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };

        let approved = quality_score >= self.config.approval_score && risk_level != RiskLevel::High;

        let feedback = if approved {
            None
        } else {
            Some(self.pick_feedback(&checks, packet))
        };

        debug!(
            total_tasks = packet.total_tasks,
            story_points = packet.story_points,
            expansion_ratio = packet.expansion_ratio,
            requirement_count,
            quality_score,
            risk = %risk_level,
            approved,
            "quality gate evaluated"
        );

        GateEvaluation {
            decision: ApprovalDecision {
                approved,
                quality_score,
                risk_level,
                feedback,
            },
            checks,
            evaluated_at: Utc::now(),
        }
    }

    /// Single categorized reason per iteration, highest-priority failure first.
    fn pick_feedback(&self, checks: &QualityChecks, packet: &TaskPacket) -> FeedbackReason {
        if !checks.manageable_story_points || packet.story_points > self.config.high_risk_points {
            FeedbackReason::ReduceScope
        } else if !checks.reasonable_task_count {
            FeedbackReason::TooManyTasks
        } else if !checks.good_task_ratio {
            FeedbackReason::TooComplex
        } else if !checks.adequate_scope {
            FeedbackReason::ExpandScope
        } else {
            FeedbackReason::InsufficientQuality
        }
    }
}
