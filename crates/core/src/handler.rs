//! Domain Handler Trait
//!
//! Defines the interface for pluggable domain handlers. Each handler is a
//! stateless strategy for one business domain: it scores content affinity
//! via its keyword table and extracts requirements and stakeholders.
//!
//! Two kinds of handlers exist: built-in structs in the application crate,
//! and [`SpecHandler`] instances driven by a [`HandlerSpec`] descriptor
//! (the form synthesized handlers take — structured data, never raw source).

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::models::{Category, Priority};

/// Maximum handler priority; the resolver normalizes priorities against this.
pub const MAX_PRIORITY: u8 = 5;

/// An extracted requirement candidate, before ID assignment and dedup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementSeed {
    /// Requirement title
    pub title: String,
    /// Priority level
    pub priority: Priority,
    /// Functional vs. non-functional
    pub category: Category,
}

impl RequirementSeed {
    pub fn functional(title: impl Into<String>, priority: Priority) -> Self {
        Self {
            title: title.into(),
            priority,
            category: Category::Functional,
        }
    }

    pub fn non_functional(title: impl Into<String>, priority: Priority) -> Self {
        Self {
            title: title.into(),
            priority,
            category: Category::NonFunctional,
        }
    }
}

// ============================================================================
// Domain Handler Trait
// ============================================================================

/// Trait for domain-specific handlers.
pub trait DomainHandler: Send + Sync {
    /// Unique domain name (catalog key).
    fn name(&self) -> &str;

    /// Keyword table used for affinity scoring.
    fn keywords(&self) -> Vec<String>;

    /// Handler priority (1-5).
    fn priority(&self) -> u8;

    /// Score content affinity for this domain.
    ///
    /// Pure function of `(content, keywords)`: identical inputs produce
    /// identical scores. See [`keyword_confidence`] for the formula.
    fn detect_confidence(&self, content: &str) -> f64 {
        keyword_confidence(content, &self.keywords())
    }

    /// Extract domain-specific requirement candidates from content.
    fn extract_requirements(&self, content: &str) -> Vec<RequirementSeed>;

    /// Requirements every project in this domain carries regardless of content.
    fn cross_cutting_requirements(&self) -> Vec<RequirementSeed> {
        Vec::new()
    }

    /// Identify stakeholders mentioned in or implied by the content.
    fn extract_stakeholders(&self, content: &str) -> Vec<String>;
}

/// Keyword affinity score for content.
///
/// Counts occurrences of each keyword in the lower-cased content, weights
/// multi-word phrases by their word count, normalizes against an
/// expected-match baseline of `keyword_count * 2`, and clamps to [0, 1].
///
/// The formula is intentionally simple and deterministic; it is preserved
/// for compatibility, not because it is tuned.
pub fn keyword_confidence(content: &str, keywords: &[String]) -> f64 {
    if keywords.is_empty() {
        return 0.0;
    }

    let lower = content.to_lowercase();
    let mut matched = 0.0_f64;

    for keyword in keywords {
        let keyword = keyword.to_lowercase();
        if keyword.is_empty() {
            continue;
        }
        let occurrences = lower.matches(keyword.as_str()).count();
        if occurrences > 0 {
            let phrase_weight = keyword.split_whitespace().count().max(1) as f64;
            matched += occurrences as f64 * phrase_weight;
        }
    }

    let baseline = (keywords.len() * 2) as f64;
    (matched / baseline).clamp(0.0, 1.0)
}

// ============================================================================
// Spec-Driven Handlers
// ============================================================================

/// A requirement template inside a [`HandlerSpec`].
///
/// Templates with a `trigger` keyword are emitted only when the trigger
/// appears in the content; trigger-less templates are always emitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementTemplate {
    /// Keyword gating this template, if any
    #[serde(default)]
    pub trigger: Option<String>,
    pub title: String,
    pub priority: Priority,
    pub category: Category,
}

/// Structured descriptor for a data-driven handler.
///
/// This is the artifact a [`crate::synthesizer::PluginSynthesizer`] produces
/// and the form synthesized handlers are persisted in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerSpec {
    /// Unique domain name
    pub name: String,
    /// Keyword table (3-24 entries)
    pub keywords: Vec<String>,
    /// Handler priority (1-5)
    pub priority: u8,
    /// Requirement templates
    pub requirement_templates: Vec<RequirementTemplate>,
    /// Fixed stakeholder list
    #[serde(default)]
    pub stakeholders: Vec<String>,
    /// Whether this spec was synthesized at runtime
    #[serde(default)]
    pub custom_created: bool,
    /// Synthesis cost (abstract unit)
    #[serde(default)]
    pub creation_cost: f64,
    /// RFC 3339 creation timestamp
    #[serde(default)]
    pub created_at: Option<String>,
}

impl HandlerSpec {
    /// Structural conformance check applied before a spec is registered.
    ///
    /// Rejects anything that would not behave as a full handler: missing
    /// name, an out-of-range priority, a degenerate keyword table, or a
    /// spec with no requirement templates at all.
    pub fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::validation("handler spec has an empty name"));
        }
        if !self
            .name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(CoreError::validation(format!(
                "handler name '{}' is not snake_case ascii",
                self.name
            )));
        }
        if !(1..=MAX_PRIORITY).contains(&self.priority) {
            return Err(CoreError::validation(format!(
                "handler '{}' priority {} out of range 1-{}",
                self.name, self.priority, MAX_PRIORITY
            )));
        }
        if self.keywords.len() < 3 || self.keywords.len() > 24 {
            return Err(CoreError::validation(format!(
                "handler '{}' has {} keywords, expected 3-24",
                self.name,
                self.keywords.len()
            )));
        }
        if self.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(CoreError::validation(format!(
                "handler '{}' contains an empty keyword",
                self.name
            )));
        }
        if self.requirement_templates.is_empty() {
            return Err(CoreError::validation(format!(
                "handler '{}' has no requirement templates",
                self.name
            )));
        }
        Ok(())
    }
}

/// Handler implementation driven entirely by a [`HandlerSpec`].
pub struct SpecHandler {
    spec: HandlerSpec,
}

impl SpecHandler {
    /// Wrap a validated spec. Callers are expected to run
    /// [`HandlerSpec::validate`] first; the catalog always does.
    pub fn new(spec: HandlerSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &HandlerSpec {
        &self.spec
    }
}

impl DomainHandler for SpecHandler {
    fn name(&self) -> &str {
        &self.spec.name
    }

    fn keywords(&self) -> Vec<String> {
        self.spec.keywords.clone()
    }

    fn priority(&self) -> u8 {
        self.spec.priority
    }

    fn extract_requirements(&self, content: &str) -> Vec<RequirementSeed> {
        let lower = content.to_lowercase();
        self.spec
            .requirement_templates
            .iter()
            .filter(|t| match &t.trigger {
                Some(trigger) => lower.contains(&trigger.to_lowercase()),
                None => true,
            })
            .map(|t| RequirementSeed {
                title: t.title.clone(),
                priority: t.priority,
                category: t.category,
            })
            .collect()
    }

    fn extract_stakeholders(&self, _content: &str) -> Vec<String> {
        self.spec.stakeholders.clone()
    }
}
