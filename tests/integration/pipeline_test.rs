//! Pipeline Integration Tests
//!
//! Drive full documents through the orchestrator and check the terminal
//! report shapes.

use std::sync::Arc;

use reqforge::services::handlers::HandlerStore;
use reqforge::{HandlerCatalog, Orchestrator, PipelineConfig, PipelineStatus};
use reqforge_quality_gates::{GateConfig, QualityGate};

async fn orchestrator(dir: &tempfile::TempDir, gate_config: GateConfig) -> Orchestrator {
    let catalog = Arc::new(HandlerCatalog::new(HandlerStore::new(
        dir.path().to_path_buf(),
    )));
    catalog.scan().await;
    Orchestrator::new(catalog, &PipelineConfig::default(), QualityGate::new(gate_config))
}

// ============================================================================
// Explicit Markers (scenario: marked documents bypass handlers)
// ============================================================================

#[tokio::test]
async fn test_explicit_markers_drive_the_whole_run() {
    let dir = tempfile::tempdir().unwrap();
    let orchestrator = orchestrator(&dir, GateConfig::default()).await;

    let report = orchestrator
        .run("REQ-001: Build login. REQ-002: Build logout.", None)
        .await
        .unwrap();

    assert_eq!(report.requirements.len(), 2);
    assert_eq!(report.requirements.requirements[0].id, "REQ-001");
    assert_eq!(report.requirements.requirements[0].title, "Build login");
    assert_eq!(report.requirements.requirements[1].id, "REQ-002");
    assert_eq!(report.requirements.requirements[1].title, "Build logout");

    // 2 requirements * 4 fixed subtasks, no domain extras for general.
    assert_eq!(report.tasks.total_tasks, 8);
    assert!(report
        .tasks
        .tasks
        .iter()
        .all(|t| t.requirement_id == "REQ-001" || t.requirement_id == "REQ-002"));
}

#[tokio::test]
async fn test_repeated_marker_numbers_never_duplicate_ids() {
    let dir = tempfile::tempdir().unwrap();
    let orchestrator = orchestrator(&dir, GateConfig::default()).await;

    let report = orchestrator
        .run("REQ-1: Build login. REQ-1: Build logout.", None)
        .await
        .unwrap();

    let ids: Vec<_> = report
        .requirements
        .requirements
        .iter()
        .map(|r| r.id.clone())
        .collect();
    assert_eq!(ids, vec!["REQ-001"]);
    assert_eq!(report.requirements.requirements[0].title, "Build login");
    // Every task references the surviving requirement.
    assert!(report
        .tasks
        .tasks
        .iter()
        .all(|t| t.requirement_id == "REQ-001"));
}

// ============================================================================
// Terminal Shapes
// ============================================================================

#[tokio::test]
async fn test_approved_shape() {
    let dir = tempfile::tempdir().unwrap();
    let orchestrator = orchestrator(&dir, GateConfig::default()).await;

    let report = orchestrator
        .run(
            "REQ-1: User registration. REQ-2: Password reset. REQ-3: Profile editing.",
            None,
        )
        .await
        .unwrap();

    assert_eq!(report.status, PipelineStatus::Approved);
    assert!(report.approval.approved);
    assert!(report.approval.quality_score >= 75.0);
    assert!(report.approval.feedback.is_none());
    assert_eq!(report.iterations, 1);
    assert!(!report.run_id.is_empty());
}

#[tokio::test]
async fn test_rejected_shape_carries_feedback_and_iterations() {
    let dir = tempfile::tempdir().unwrap();
    let orchestrator = orchestrator(
        &dir,
        GateConfig {
            approval_score: 101.0,
            ..GateConfig::default()
        },
    )
    .await;

    let report = orchestrator
        .run("REQ-1: Alpha. REQ-2: Beta. REQ-3: Gamma.", None)
        .await
        .unwrap();

    assert_eq!(report.status, PipelineStatus::Rejected);
    assert_eq!(report.iterations, 3);
    assert!(report.approval.feedback.is_some());
    // Every recorded iteration was a rejection.
    assert!(report.history.iter().all(|rec| !rec.decision.approved));
}

#[tokio::test]
async fn test_malformed_input_is_a_hard_error() {
    let dir = tempfile::tempdir().unwrap();
    let orchestrator = orchestrator(&dir, GateConfig::default()).await;

    let err = orchestrator.run("\0\0\0", None).await.unwrap_err();
    assert!(err.is_malformed_input());
}

// ============================================================================
// Boundedness
// ============================================================================

#[tokio::test]
async fn test_never_more_than_max_iterations() {
    let dir = tempfile::tempdir().unwrap();
    // max_iterations = 1 with an unpassable gate: exactly one evaluation.
    let catalog = Arc::new(HandlerCatalog::new(HandlerStore::new(
        dir.path().to_path_buf(),
    )));
    catalog.scan().await;
    let config = PipelineConfig {
        max_iterations: 1,
        ..PipelineConfig::default()
    };
    let orchestrator = Orchestrator::new(
        catalog,
        &config,
        QualityGate::new(GateConfig {
            approval_score: 101.0,
            ..GateConfig::default()
        }),
    );

    let report = orchestrator
        .run("REQ-1: Only requirement.", None)
        .await
        .unwrap();
    assert_eq!(report.status, PipelineStatus::Rejected);
    assert_eq!(report.iterations, 1);
    assert_eq!(report.history.len(), 1);
}

// ============================================================================
// ID Stability
// ============================================================================

#[tokio::test]
async fn test_ids_are_sequential_and_unique_within_a_run() {
    let dir = tempfile::tempdir().unwrap();
    let orchestrator = orchestrator(&dir, GateConfig::default()).await;

    let report = orchestrator
        .run(
            "An enterprise workflow platform needs workflow approvals, audit \
             trails, reporting dashboards and sso integration for compliance.",
            Some("enterprise"),
        )
        .await
        .unwrap();

    for (i, req) in report.requirements.requirements.iter().enumerate() {
        assert_eq!(req.id, format!("REQ-{:03}", i + 1));
    }
    for (i, task) in report.tasks.tasks.iter().enumerate() {
        assert_eq!(task.id, format!("TASK-{:03}", i + 1));
    }

    // Every non-domain task references a requirement from this run.
    let req_ids: Vec<&str> = report
        .requirements
        .requirements
        .iter()
        .map(|r| r.id.as_str())
        .collect();
    for task in report.tasks.tasks.iter().filter(|t| !t.is_domain_task()) {
        assert!(req_ids.contains(&task.requirement_id.as_str()));
    }
}
