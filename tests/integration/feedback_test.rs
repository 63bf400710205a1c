//! Feedback Cycle Integration Tests
//!
//! The gate's categorized rejection reasons feeding the requirements
//! stage, end to end across stage boundaries.

use std::sync::Arc;

use reqforge::services::handlers::builtins::EnterpriseHandler;
use reqforge::{RequirementsStage, TaskStage};
use reqforge_core::{
    AnalysisPacket, DomainHandler, FeedbackReason, Priority, RiskLevel, Task, TaskPacket,
};
use reqforge_quality_gates::QualityGate;

fn oversized_plan() -> TaskPacket {
    // 40 tasks at 3 points each: 120 story points.
    let tasks: Vec<Task> = (0..40)
        .map(|i| Task {
            id: format!("TASK-{:03}", i + 1),
            requirement_id: format!("REQ-{:03}", (i % 8) + 1),
            title: format!("Task {}", i + 1),
            story_points: 3,
            hours: 10,
            priority: Priority::Medium,
        })
        .collect();
    TaskPacket::from_tasks(tasks, 8)
}

#[test]
fn test_oversized_plan_demands_scope_reduction() {
    let gate = QualityGate::default();
    let evaluation = gate.evaluate(&oversized_plan(), 8);

    assert!(!evaluation.decision.approved);
    assert_eq!(evaluation.decision.risk_level, RiskLevel::High);
    assert_eq!(
        evaluation.decision.feedback,
        Some(FeedbackReason::ReduceScope)
    );
}

#[test]
fn test_reduce_scope_feedback_shrinks_the_next_iteration() {
    let handler: Arc<dyn DomainHandler> = Arc::new(EnterpriseHandler);
    let stage = RequirementsStage::new();
    let packet = AnalysisPacket {
        domain: "enterprise".to_string(),
        complexity: 3,
        content: "An enterprise workflow system with sso, audit trails, reporting, \
            dashboards and integration across departments."
            .to_string(),
    };

    let reduced = stage.apply_feedback(&packet, &handler, FeedbackReason::ReduceScope);
    assert!(reduced.feedback_applied);
    assert!(reduced.len() <= 5);
    assert!(reduced
        .requirements
        .iter()
        .all(|r| r.priority == Priority::High));

    // The shrunken set decomposes to fewer points than the original.
    let tasks = TaskStage::new();
    let original = stage.extract(&packet, &handler);
    assert!(tasks.decompose(&reduced).story_points < tasks.decompose(&original).story_points);
}

#[test]
fn test_too_complex_feedback_simplifies_titles() {
    let handler: Arc<dyn DomainHandler> = Arc::new(EnterpriseHandler);
    let stage = RequirementsStage::new();
    let packet = AnalysisPacket {
        domain: "enterprise".to_string(),
        complexity: 2,
        content: "workflow approvals with audit and reporting".to_string(),
    };

    let simplified = stage.apply_feedback(&packet, &handler, FeedbackReason::TooComplex);
    assert!(simplified.len() <= 6);
    assert!(simplified
        .requirements
        .iter()
        .all(|r| r.title.starts_with("Basic ") && r.priority == Priority::Medium));
}

#[test]
fn test_too_many_tasks_feedback_caps_requirements() {
    let handler: Arc<dyn DomainHandler> = Arc::new(EnterpriseHandler);
    let stage = RequirementsStage::new();
    let packet = AnalysisPacket {
        domain: "enterprise".to_string(),
        complexity: 3,
        content: "workflow integration sso reporting dashboard audit".to_string(),
    };

    let capped = stage.apply_feedback(&packet, &handler, FeedbackReason::TooManyTasks);
    assert_eq!(capped.len(), 3);

    let tasks = TaskStage::new().decompose(&capped);
    // 3 requirements * 4 subtasks + 2 enterprise extras.
    assert_eq!(tasks.total_tasks, 14);
}
