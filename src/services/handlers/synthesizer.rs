//! Template Synthesizer
//!
//! Deterministic [`PluginSynthesizer`] implementation. Infers a domain name
//! and keyword table from stopword-filtered token frequency and emits a
//! structured [`HandlerSpec`] — never raw source. A generative backend can
//! replace this behind the same trait without touching the resolver.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};

use reqforge_core::{
    Category, HandlerSpec, PluginSynthesizer, Priority, RequirementTemplate, SynthesisError,
    SynthesisOutput, GENERAL_DOMAIN,
};

/// Minimum distinct candidate keywords required to mint a handler.
const MIN_KEYWORDS: usize = 3;
/// A token must repeat this often to count as a domain signal. Repeated
/// tokens also guarantee the minted handler re-scores above the resolver
/// threshold on the content it was minted from.
const MIN_TOKEN_FREQ: usize = 2;
/// Keyword table cap for synthesized handlers.
const MAX_KEYWORDS: usize = 8;
/// Minimum token length considered a keyword candidate.
const MIN_TOKEN_LEN: usize = 4;
/// Abstract cost per keyword in the synthesized table.
const COST_PER_KEYWORD: f64 = 0.1;

/// Words too generic to identify a business domain.
const STOPWORDS: &[&str] = &[
    "about", "after", "allow", "allows", "also", "application", "around", "because", "been",
    "before", "being", "best", "better", "between", "build", "built", "could", "create", "does",
    "done", "each", "every", "feature", "features", "from", "have", "included", "including",
    "into", "like", "made", "make", "manage", "management", "many", "more", "most", "much",
    "must", "need", "needs", "only", "other", "over", "platform", "product", "project",
    "provide", "really", "requirement", "requirements", "should", "software", "some", "such",
    "support", "system", "than", "that", "their", "them", "then", "there", "these", "they",
    "this", "those", "through", "under", "users", "very", "want", "wants", "were", "when",
    "where", "which", "while", "will", "with", "would",
];

/// Deterministic fallback synthesizer backed by token-frequency templates.
#[derive(Debug, Default)]
pub struct TemplateSynthesizer;

#[async_trait]
impl PluginSynthesizer for TemplateSynthesizer {
    async fn synthesize(
        &self,
        content: &str,
        domain_hint: &str,
        existing_names: &[String],
    ) -> Result<SynthesisOutput, SynthesisError> {
        let keywords = candidate_keywords(content);
        if keywords.len() < MIN_KEYWORDS {
            return Err(SynthesisError::InvalidArtifact(format!(
                "only {} candidate keywords in content, need {}",
                keywords.len(),
                MIN_KEYWORDS
            )));
        }

        let name = infer_name(domain_hint, &keywords, existing_names);
        debug!(handler = %name, keywords = ?keywords, "synthesizing handler spec");

        let requirement_templates = build_templates(&name, &keywords);
        let cost = COST_PER_KEYWORD * keywords.len() as f64;

        let spec = HandlerSpec {
            name: name.clone(),
            keywords,
            priority: 4,
            requirement_templates,
            stakeholders: vec!["Domain Experts".to_string(), "End Users".to_string()],
            custom_created: true,
            creation_cost: cost,
            created_at: Some(Utc::now().to_rfc3339()),
        };

        spec.validate()
            .map_err(|e| SynthesisError::InvalidArtifact(e.to_string()))?;

        info!(handler = %spec.name, cost, "template synthesis produced a handler spec");
        Ok(SynthesisOutput { spec, cost })
    }
}

/// Top repeated content tokens by frequency, stopword-filtered, ties
/// broken alphabetically so the result is stable for identical content.
fn candidate_keywords(content: &str) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for token in content
        .to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| t.len() >= MIN_TOKEN_LEN)
        .filter(|t| !STOPWORDS.contains(t))
        .filter(|t| t.chars().any(|c| c.is_ascii_alphabetic()))
    {
        *counts.entry(token.to_string()).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .filter(|(_, count)| *count >= MIN_TOKEN_FREQ)
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(token, _)| token)
        .collect()
}

/// Pick a domain name: sanitized hint if usable, else the dominant keyword;
/// suffixed with a counter until it avoids `existing_names`.
fn infer_name(domain_hint: &str, keywords: &[String], existing_names: &[String]) -> String {
    let hinted = sanitize_name(domain_hint);
    let base = if !hinted.is_empty() && hinted != GENERAL_DOMAIN {
        hinted
    } else {
        keywords[0].clone()
    };

    if !existing_names.iter().any(|n| n == &base) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}_{n}");
        if !existing_names.iter().any(|name| name == &candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Lowercase, keep ascii alphanumerics, collapse the rest to underscores.
fn sanitize_name(raw: &str) -> String {
    let mut out = String::new();
    let mut last_underscore = true; // suppress leading underscores
    for c in raw.trim().to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            out.push(c);
            last_underscore = false;
        } else if !last_underscore {
            out.push('_');
            last_underscore = true;
        }
    }
    out.trim_end_matches('_').to_string()
}

fn build_templates(name: &str, keywords: &[String]) -> Vec<RequirementTemplate> {
    let mut templates: Vec<RequirementTemplate> = keywords
        .iter()
        .take(5)
        .enumerate()
        .map(|(i, keyword)| RequirementTemplate {
            trigger: Some(keyword.clone()),
            title: format!("Support {keyword} workflows"),
            priority: if i < 2 { Priority::High } else { Priority::Medium },
            category: Category::Functional,
        })
        .collect();

    templates.push(RequirementTemplate {
        trigger: None,
        title: format!("Report on {name} activity"),
        priority: Priority::Medium,
        category: Category::Functional,
    });

    templates
}
