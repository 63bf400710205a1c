//! Feedback Transforms
//!
//! Reason-specific rewrites applied to a freshly re-extracted requirements
//! packet after a quality-gate rejection.

use tracing::debug;

use reqforge_core::{FeedbackReason, Priority, RequirementsPacket};

const REDUCE_SCOPE_CAP: usize = 5;
const TOO_COMPLEX_CAP: usize = 6;
const TOO_MANY_TASKS_CAP: usize = 3;

/// Apply the transform for one rejection reason. Requirement IDs survive
/// the transform unchanged so callers can correlate across iterations.
pub fn transform(mut packet: RequirementsPacket, reason: FeedbackReason) -> RequirementsPacket {
    match reason {
        FeedbackReason::ReduceScope => {
            packet
                .requirements
                .retain(|r| r.priority == Priority::High);
            packet.requirements.truncate(REDUCE_SCOPE_CAP);
        }
        FeedbackReason::TooComplex => {
            for req in &mut packet.requirements {
                if !req.title.starts_with("Basic ") {
                    req.title = format!("Basic {}", req.title);
                }
                req.priority = Priority::Medium;
            }
            packet.requirements.truncate(TOO_COMPLEX_CAP);
        }
        FeedbackReason::TooManyTasks => {
            packet.requirements.truncate(TOO_MANY_TASKS_CAP);
        }
        FeedbackReason::ExpandScope | FeedbackReason::InsufficientQuality => {
            // A plain re-extract is the best this stage can do; the gate
            // re-evaluates the fresh packet next iteration.
        }
    }

    packet.feedback_applied = true;
    debug!(
        reason = %reason,
        remaining = packet.len(),
        "feedback transform applied"
    );
    packet
}
