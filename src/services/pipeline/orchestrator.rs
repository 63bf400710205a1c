//! Pipeline Orchestrator
//!
//! Drives one document through domain resolution and the bounded
//! refinement loop: requirements extraction, task decomposition, and the
//! quality gate, feeding each rejection reason back into the next
//! extraction pass. The loop never runs more than `max_iterations`
//! gate evaluations.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};
use uuid::Uuid;

use reqforge_core::{AnalysisPacket, FeedbackReason};
use reqforge_quality_gates::QualityGate;

use crate::config::PipelineConfig;
use crate::models::{IterationRecord, PipelineReport, PipelineStatus};
use crate::services::handlers::{DomainResolver, HandlerCatalog};
use crate::services::pipeline::ingress;
use crate::services::requirements::RequirementsStage;
use crate::services::tasks::TaskStage;
use crate::utils::error::{AppError, AppResult};

/// Runs the full refinement pipeline for one document per call.
///
/// Holds no per-run state; the shared handler catalog (reached through the
/// resolver) is the only mutable state runs have in common.
pub struct Orchestrator {
    resolver: DomainResolver,
    requirements: RequirementsStage,
    tasks: TaskStage,
    gate: QualityGate,
    max_iterations: u32,
}

impl Orchestrator {
    pub fn new(catalog: Arc<HandlerCatalog>, config: &PipelineConfig, gate: QualityGate) -> Self {
        let synthesizer = Arc::new(crate::services::handlers::TemplateSynthesizer);
        Self {
            resolver: DomainResolver::new(catalog, synthesizer, config),
            requirements: RequirementsStage::new(),
            tasks: TaskStage::new(),
            gate,
            max_iterations: config.max_iterations,
        }
    }

    /// Run one document through the pipeline.
    ///
    /// Returns a report for both terminal outcomes; only malformed input
    /// (and internal failures like an unreadable catalog) surface as
    /// errors.
    pub async fn run(&self, content: &str, domain_hint: Option<&str>) -> AppResult<PipelineReport> {
        let started = Instant::now();
        let content = ingress::validate(content)?;

        let resolution = self.resolver.resolve(&content, domain_hint).await?;
        info!(
            domain = %resolution.domain,
            was_synthesized = resolution.was_synthesized,
            confidence = resolution.confidence,
            "domain resolved"
        );

        let analysis = AnalysisPacket {
            domain: resolution.domain.clone(),
            complexity: ingress::estimate_complexity(&content, resolution.confidence),
            content,
        };

        let mut history: Vec<IterationRecord> = Vec::new();
        let mut feedback: Option<FeedbackReason> = None;

        for k in 0..self.max_iterations {
            let requirements = match feedback {
                None => self.requirements.extract(&analysis, &resolution.handler),
                Some(reason) => {
                    self.requirements
                        .apply_feedback(&analysis, &resolution.handler, reason)
                }
            };

            let tasks = self.tasks.decompose(&requirements);
            let evaluation = self.gate.evaluate(&tasks, requirements.len());

            debug!(
                iteration = k + 1,
                approved = evaluation.decision.approved,
                score = evaluation.decision.quality_score,
                "iteration evaluated"
            );

            history.push(IterationRecord {
                iteration: k + 1,
                requirement_count: requirements.len(),
                total_tasks: tasks.total_tasks,
                story_points: tasks.story_points,
                decision: evaluation.decision.clone(),
            });

            if evaluation.decision.approved {
                info!(iterations = k + 1, "plan approved");
                return Ok(report(
                    PipelineStatus::Approved,
                    &analysis,
                    &resolution,
                    requirements,
                    tasks,
                    evaluation.decision,
                    history,
                    started,
                ));
            }

            if k + 1 >= self.max_iterations {
                info!(iterations = k + 1, "iterations exhausted, plan rejected");
                return Ok(report(
                    PipelineStatus::Rejected,
                    &analysis,
                    &resolution,
                    requirements,
                    tasks,
                    evaluation.decision,
                    history,
                    started,
                ));
            }

            feedback = evaluation.decision.feedback;
        }

        // max_iterations >= 1 is enforced by config validation, so the loop
        // always returns from inside.
        Err(AppError::internal("refinement loop ran zero iterations"))
    }
}

#[allow(clippy::too_many_arguments)]
fn report(
    status: PipelineStatus,
    analysis: &AnalysisPacket,
    resolution: &crate::services::handlers::Resolution,
    requirements: reqforge_core::RequirementsPacket,
    tasks: reqforge_core::TaskPacket,
    approval: reqforge_core::ApprovalDecision,
    history: Vec<IterationRecord>,
    started: Instant,
) -> PipelineReport {
    PipelineReport {
        run_id: Uuid::new_v4().to_string(),
        status,
        domain: analysis.domain.clone(),
        complexity: analysis.complexity,
        was_synthesized: resolution.was_synthesized,
        synthesis_cost: resolution.cost,
        iterations: history.len() as u32,
        duration_ms: started.elapsed().as_millis() as u64,
        requirements,
        tasks,
        approval,
        history,
    }
}
