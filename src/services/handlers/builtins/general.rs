//! General Handler
//!
//! Sentinel no-op handler used as the degradation target whenever no
//! domain-specific handler matches and synthesis is unavailable or fails.
//! Its confidence is always zero so the resolver never picks it on merit.

use reqforge_core::{DomainHandler, RequirementSeed, GENERAL_DOMAIN};

/// Fallback handler for unclassified content.
pub struct GeneralHandler;

impl DomainHandler for GeneralHandler {
    fn name(&self) -> &str {
        GENERAL_DOMAIN
    }

    fn keywords(&self) -> Vec<String> {
        Vec::new()
    }

    fn priority(&self) -> u8 {
        1
    }

    fn detect_confidence(&self, _content: &str) -> f64 {
        0.0
    }

    fn extract_requirements(&self, _content: &str) -> Vec<RequirementSeed> {
        Vec::new()
    }

    fn extract_stakeholders(&self, _content: &str) -> Vec<String> {
        Vec::new()
    }
}
