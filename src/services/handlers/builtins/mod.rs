//! Built-in Domain Handlers
//!
//! One module per shipped business domain, plus the `general` fallback.
//! Each handler owns a keyword table for affinity scoring and a static
//! trigger-to-requirement mapping for extraction.

pub mod ecommerce;
pub mod enterprise;
pub mod general;
pub mod healthcare;

pub use ecommerce::EcommerceHandler;
pub use enterprise::EnterpriseHandler;
pub use general::GeneralHandler;
pub use healthcare::HealthcareHandler;

use reqforge_core::{Priority, RequirementSeed};

/// A content trigger mapped to the requirement it implies.
pub(crate) struct Trigger {
    pub keyword: &'static str,
    pub title: &'static str,
    pub priority: Priority,
}

/// Emit a seed for every trigger whose keyword appears in the content.
pub(crate) fn triggered_seeds(content: &str, triggers: &[Trigger]) -> Vec<RequirementSeed> {
    let lower = content.to_lowercase();
    triggers
        .iter()
        .filter(|t| lower.contains(t.keyword))
        .map(|t| RequirementSeed::functional(t.title, t.priority))
        .collect()
}

/// Keep only stakeholders whose cue word appears in the content, always
/// including the unconditional ones (empty cue).
pub(crate) fn detect_stakeholders(content: &str, table: &[(&str, &str)]) -> Vec<String> {
    let lower = content.to_lowercase();
    table
        .iter()
        .filter(|(cue, _)| cue.is_empty() || lower.contains(cue))
        .map(|(_, name)| name.to_string())
        .collect()
}
