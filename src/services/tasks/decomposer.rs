//! Task Stage
//!
//! Expands each requirement into a fixed Design/Implement/Test/Document
//! pattern with effort estimates, then appends the domain's fixed extra
//! tasks from a static lookup table.

use tracing::debug;

use reqforge_core::{
    Priority, RequirementsPacket, Task, TaskPacket, DOMAIN_TASK_SENTINEL,
};

const HOURS_PER_POINT: f64 = 3.5;

/// The four subtasks every requirement expands into, in fixed order.
/// Implement carries 3 base points, the rest 2.
const PATTERN: &[(&str, u32)] = &[
    ("Design", 2),
    ("Implement", 3),
    ("Test", 2),
    ("Document", 2),
];

/// Domain-wide extra task from the static per-domain table.
struct DomainExtra {
    title: &'static str,
    story_points: u32,
    priority: Priority,
}

/// Fixed extras keyed by domain. At most two per domain.
fn domain_extras(domain: &str) -> &'static [DomainExtra] {
    match domain {
        "enterprise" => &[
            DomainExtra {
                title: "Security baseline setup",
                story_points: 3,
                priority: Priority::High,
            },
            DomainExtra {
                title: "Compliance review checkpoint",
                story_points: 2,
                priority: Priority::Medium,
            },
        ],
        "healthcare" => &[
            DomainExtra {
                title: "Patient data privacy audit",
                story_points: 3,
                priority: Priority::High,
            },
            DomainExtra {
                title: "Clinical workflow sign-off",
                story_points: 2,
                priority: Priority::High,
            },
        ],
        "ecommerce" => &[DomainExtra {
            title: "Payment provider certification",
            story_points: 3,
            priority: Priority::High,
        }],
        _ => &[],
    }
}

/// Stateless requirement-to-task decomposer.
pub struct TaskStage;

impl TaskStage {
    pub fn new() -> Self {
        Self
    }

    /// Expand a requirements packet into a task packet with aggregate metrics.
    pub fn decompose(&self, packet: &RequirementsPacket) -> TaskPacket {
        let mut tasks = Vec::with_capacity(packet.len() * PATTERN.len() + 2);
        let mut next_id = 1_usize;

        for req in &packet.requirements {
            let bump = if req.priority == Priority::High { 1 } else { 0 };
            for (verb, base_points) in PATTERN {
                let story_points = base_points + bump;
                tasks.push(Task {
                    id: format!("TASK-{:03}", next_id),
                    requirement_id: req.id.clone(),
                    title: format!("{}: {}", verb, req.title),
                    story_points,
                    hours: hours_for(story_points),
                    priority: req.priority,
                });
                next_id += 1;
            }
        }

        for extra in domain_extras(&packet.domain) {
            tasks.push(Task {
                id: format!("TASK-{:03}", next_id),
                requirement_id: DOMAIN_TASK_SENTINEL.to_string(),
                title: extra.title.to_string(),
                story_points: extra.story_points,
                hours: hours_for(extra.story_points),
                priority: extra.priority,
            });
            next_id += 1;
        }

        let packet = TaskPacket::from_tasks(tasks, packet.len());
        debug!(
            total = packet.total_tasks,
            story_points = packet.story_points,
            ratio = packet.expansion_ratio,
            "requirements decomposed"
        );
        packet
    }
}

impl Default for TaskStage {
    fn default() -> Self {
        Self::new()
    }
}

/// Hours = story points * 3.5, rounded down.
fn hours_for(story_points: u32) -> u32 {
    (story_points as f64 * HOURS_PER_POINT).floor() as u32
}
