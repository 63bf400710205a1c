//! Document Ingress
//!
//! Validates and normalizes the free-text document before it enters the
//! pipeline. Malformed input is the only hard failure this system
//! surfaces to callers; it fails the run before any iteration is consumed.

use reqforge_core::CoreError;

use crate::utils::error::AppResult;

/// Estimated complexity scale ceiling.
const MAX_COMPLEXITY: u8 = 5;

/// Validate an ingress document and return the normalized content.
///
/// Rejects empty (or whitespace-only) documents and documents containing
/// NUL bytes, which indicate binary data rather than text.
pub fn validate(content: &str) -> AppResult<String> {
    if content.contains('\0') {
        return Err(CoreError::malformed_input("document contains binary data").into());
    }
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(CoreError::malformed_input("document is empty").into());
    }
    Ok(trimmed.to_string())
}

/// Rough 0-5 complexity estimate from document size and how strongly the
/// content matched its resolved domain.
///
/// Heuristic by construction; it only feeds reporting and never gates
/// anything.
pub fn estimate_complexity(content: &str, domain_confidence: f64) -> u8 {
    let words = content.split_whitespace().count();
    let tier: u8 = match words {
        0 => 0,
        1..=49 => 1,
        50..=149 => 2,
        150..=399 => 3,
        _ => 4,
    };
    let density_bump = u8::from(domain_confidence >= 0.6);
    (tier + density_bump).min(MAX_COMPLEXITY)
}
