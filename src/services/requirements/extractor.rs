//! Requirements Stage
//!
//! Turns resolved-domain content into a bounded, deduplicated, prioritized
//! requirement list plus stakeholders. Explicit `REQ-<n>:` markers in the
//! document win over handler-based extraction.

use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use regex::Regex;
use tracing::debug;

use reqforge_core::{
    normalize_title, AnalysisPacket, Category, DomainHandler, FeedbackReason, Priority,
    Requirement, RequirementSeed, RequirementsPacket,
};

use crate::services::requirements::feedback;

/// Hard cap on extracted requirements per packet.
pub const MAX_REQUIREMENTS: usize = 8;

/// Explicit marker titles are truncated to this many characters.
const MAX_TITLE_LEN: usize = 120;

fn marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Unwrap is fine for a literal pattern checked by tests.
    RE.get_or_init(|| Regex::new(r"(?i)\bREQ-(\d+)\s*:").unwrap())
}

/// Stateless requirements extractor.
pub struct RequirementsStage;

impl RequirementsStage {
    pub fn new() -> Self {
        Self
    }

    /// Extract a requirements packet from resolved content.
    pub fn extract(
        &self,
        packet: &AnalysisPacket,
        handler: &Arc<dyn DomainHandler>,
    ) -> RequirementsPacket {
        if let Some(explicit) = self.extract_explicit(&packet.content) {
            debug!(count = explicit.len(), "explicit requirement markers found");
            return RequirementsPacket {
                domain: packet.domain.clone(),
                requirements: explicit,
                stakeholders: stakeholders_or_default(handler.extract_stakeholders(&packet.content)),
                feedback_applied: false,
            };
        }

        let mut seeds = handler.extract_requirements(&packet.content);
        seeds.extend(handler.cross_cutting_requirements());
        if seeds.is_empty() {
            debug!(domain = %packet.domain, "handler yielded nothing, using generic set");
            seeds = generic_requirements();
        }

        RequirementsPacket {
            domain: packet.domain.clone(),
            requirements: assign_ids(dedup(seeds)),
            stakeholders: stakeholders_or_default(handler.extract_stakeholders(&packet.content)),
            feedback_applied: false,
        }
    }

    /// Re-extract under a categorized rejection reason, then apply the
    /// reason-specific transform. The result always carries
    /// `feedback_applied = true`.
    pub fn apply_feedback(
        &self,
        packet: &AnalysisPacket,
        handler: &Arc<dyn DomainHandler>,
        reason: FeedbackReason,
    ) -> RequirementsPacket {
        let fresh = self.extract(packet, handler);
        feedback::transform(fresh, reason)
    }

    /// Parse explicit `REQ-<n>: <text>` markers, keeping the document's own
    /// numbering. Returns `None` when the document carries no markers.
    fn extract_explicit(&self, content: &str) -> Option<Vec<Requirement>> {
        let matches: Vec<_> = marker_regex().captures_iter(content).collect();
        if matches.is_empty() {
            return None;
        }

        let mut requirements = Vec::new();
        let mut seen_titles = HashSet::new();
        let mut seen_numbers = HashSet::new();

        for (i, caps) in matches.iter().enumerate() {
            let whole = match caps.get(0) {
                Some(m) => m,
                None => continue,
            };
            // A number too large for u32 invalidates just this marker.
            let number: u32 = match caps.get(1).and_then(|m| m.as_str().parse().ok()) {
                Some(n) => n,
                None => continue,
            };

            let body_start = whole.end();
            let body_end = matches
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map(|m| m.start())
                .unwrap_or(content.len());

            let title: String = content[body_start..body_end]
                .trim()
                .trim_end_matches('.')
                .trim()
                .chars()
                .take(MAX_TITLE_LEN)
                .collect();
            if title.is_empty() {
                continue;
            }
            // A repeated marker number keeps its first title; anything else
            // would hand two requirements the same ID.
            if !seen_numbers.insert(number) {
                continue;
            }
            if !seen_titles.insert(normalize_title(&title)) {
                continue;
            }

            requirements.push(Requirement {
                id: format!("REQ-{:03}", number),
                title,
                priority: Priority::Medium,
                category: Category::Functional,
            });
            if requirements.len() >= MAX_REQUIREMENTS {
                break;
            }
        }

        if requirements.is_empty() {
            None
        } else {
            Some(requirements)
        }
    }
}

impl Default for RequirementsStage {
    fn default() -> Self {
        Self::new()
    }
}

/// Deduplicate seeds by normalized title, keeping first occurrence order.
fn dedup(seeds: Vec<RequirementSeed>) -> Vec<RequirementSeed> {
    let mut seen = HashSet::new();
    seeds
        .into_iter()
        .filter(|seed| seen.insert(normalize_title(&seed.title)))
        .collect()
}

/// Assign sequential `REQ-NNN` IDs in insertion order, capped at
/// [`MAX_REQUIREMENTS`].
fn assign_ids(seeds: Vec<RequirementSeed>) -> Vec<Requirement> {
    seeds
        .into_iter()
        .take(MAX_REQUIREMENTS)
        .enumerate()
        .map(|(i, seed)| Requirement {
            id: format!("REQ-{:03}", i + 1),
            title: seed.title,
            priority: seed.priority,
            category: seed.category,
        })
        .collect()
}

/// Fixed generic set used when no handler produces anything.
fn generic_requirements() -> Vec<RequirementSeed> {
    vec![
        RequirementSeed::functional("Define core user workflows", Priority::High),
        RequirementSeed::functional("Manage application data", Priority::Medium),
        RequirementSeed::functional("Provide user authentication", Priority::Medium),
        RequirementSeed::non_functional("Ensure acceptable performance", Priority::Low),
    ]
}

fn stakeholders_or_default(stakeholders: Vec<String>) -> Vec<String> {
    if stakeholders.is_empty() {
        vec!["End Users".to_string(), "Project Team".to_string()]
    } else {
        stakeholders
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::handlers::builtins::{EnterpriseHandler, GeneralHandler};

    fn packet(content: &str, domain: &str) -> AnalysisPacket {
        AnalysisPacket {
            domain: domain.to_string(),
            complexity: 2,
            content: content.to_string(),
        }
    }

    fn general() -> Arc<dyn DomainHandler> {
        Arc::new(GeneralHandler)
    }

    fn enterprise() -> Arc<dyn DomainHandler> {
        Arc::new(EnterpriseHandler)
    }

    #[test]
    fn test_explicit_markers_win() {
        let stage = RequirementsStage::new();
        let result = stage.extract(
            &packet("REQ-001: Build login. REQ-002: Build logout.", "general"),
            &general(),
        );
        assert_eq!(result.len(), 2);
        assert_eq!(result.requirements[0].id, "REQ-001");
        assert_eq!(result.requirements[0].title, "Build login");
        assert_eq!(result.requirements[1].id, "REQ-002");
        assert_eq!(result.requirements[1].title, "Build logout");
        assert!(!result.feedback_applied);
    }

    #[test]
    fn test_explicit_markers_keep_source_numbering() {
        let stage = RequirementsStage::new();
        let result = stage.extract(
            &packet("REQ-7: Export reports. REQ-12: Archive old data.", "general"),
            &general(),
        );
        assert_eq!(result.requirements[0].id, "REQ-007");
        assert_eq!(result.requirements[1].id, "REQ-012");
    }

    #[test]
    fn test_handler_extraction_with_cross_cutting() {
        let stage = RequirementsStage::new();
        let content = "An enterprise platform with sso login, audit trail needs, \
            and a reporting dashboard for compliance reviews.";
        let result = stage.extract(&packet(content, "enterprise"), &enterprise());
        assert!(!result.is_empty());
        assert!(result.len() <= MAX_REQUIREMENTS);
        // Cross-cutting entries always appear for this domain.
        assert!(result
            .requirements
            .iter()
            .any(|r| r.category == Category::NonFunctional));
        // Sequential IDs from 1.
        for (i, req) in result.requirements.iter().enumerate() {
            assert_eq!(req.id, format!("REQ-{:03}", i + 1));
        }
    }

    #[test]
    fn test_generic_fallback_when_handler_silent() {
        let stage = RequirementsStage::new();
        let result = stage.extract(&packet("nothing domain specific here", "general"), &general());
        assert_eq!(result.len(), 4);
        assert_eq!(result.requirements[0].id, "REQ-001");
        assert_eq!(result.stakeholders, vec!["End Users", "Project Team"]);
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let stage = RequirementsStage::new();
        let content = "enterprise workflow workflow approval approval sso audit";
        let a = stage.extract(&packet(content, "enterprise"), &enterprise());
        let b = stage.extract(&packet(content, "enterprise"), &enterprise());
        let titles_a: Vec<_> = a.requirements.iter().map(|r| r.title.clone()).collect();
        let titles_b: Vec<_> = b.requirements.iter().map(|r| r.title.clone()).collect();
        assert_eq!(titles_a, titles_b);
        let normalized: HashSet<_> = titles_a.iter().map(|t| normalize_title(t)).collect();
        assert_eq!(normalized.len(), titles_a.len());
    }

    #[test]
    fn test_repeated_marker_number_keeps_first() {
        let stage = RequirementsStage::new();
        let result = stage.extract(
            &packet("REQ-1: Build login. REQ-1: Build logout.", "general"),
            &general(),
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result.requirements[0].id, "REQ-001");
        assert_eq!(result.requirements[0].title, "Build login");
        let ids: HashSet<_> = result.requirements.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids.len(), result.len());
    }

    #[test]
    fn test_oversized_marker_number_skips_only_that_marker() {
        let stage = RequirementsStage::new();
        let result = stage.extract(
            &packet(
                "REQ-99999999999999999999: Junk entry. \
                 REQ-1: Build login. REQ-2: Build logout.",
                "general",
            ),
            &general(),
        );
        assert_eq!(result.len(), 2);
        assert_eq!(result.requirements[0].id, "REQ-001");
        assert_eq!(result.requirements[0].title, "Build login");
        assert_eq!(result.requirements[1].id, "REQ-002");
        assert_eq!(result.requirements[1].title, "Build logout");
    }

    #[test]
    fn test_long_marker_title_truncated() {
        let stage = RequirementsStage::new();
        let long = "x".repeat(300);
        let content = format!("REQ-1: {}", long);
        let result = stage.extract(&packet(&content, "general"), &general());
        assert_eq!(result.requirements[0].title.chars().count(), 120);
    }
}
