//! Plugin Synthesizer Trait
//!
//! External-collaborator seam for minting new domain handlers at runtime.
//! Implementations may call a generative backend or fall back to a
//! deterministic template; the core only requires a structured
//! [`HandlerSpec`] back, which the catalog validates before registration.

use async_trait::async_trait;
use thiserror::Error;

use crate::handler::HandlerSpec;

/// Errors a synthesizer may return. All of them are non-fatal to the
/// pipeline: the resolver degrades to the `general` handler.
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// The produced artifact failed structural validation
    #[error("Invalid artifact: {0}")]
    InvalidArtifact(String),

    /// The synthesizer proposed a name that already exists
    #[error("Duplicate domain name: {0}")]
    DuplicateName(String),

    /// The backend call exceeded its time budget
    #[error("Synthesis timed out")]
    Timeout,

    /// Backend failure (network, model, etc.)
    #[error("Synthesis backend error: {0}")]
    Backend(String),
}

/// Successful synthesis: a handler spec plus its reported cost.
#[derive(Debug, Clone)]
pub struct SynthesisOutput {
    /// The synthesized handler descriptor
    pub spec: HandlerSpec,
    /// Cost estimate for accounting (abstract unit)
    pub cost: f64,
}

/// Capability for producing a new domain handler from document content.
#[async_trait]
pub trait PluginSynthesizer: Send + Sync {
    /// Synthesize a handler spec for `content`.
    ///
    /// `domain_hint` is the caller's best guess at a name; `existing_names`
    /// lists catalog entries the result must not collide with.
    async fn synthesize(
        &self,
        content: &str,
        domain_hint: &str,
        existing_names: &[String],
    ) -> Result<SynthesisOutput, SynthesisError>;
}
