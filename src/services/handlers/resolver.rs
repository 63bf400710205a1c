//! Domain Resolver
//!
//! Scores every known handler against document content, picks the best
//! weighted match, and falls back to synthesis (then to the `general`
//! sentinel) when nothing clears the confidence threshold.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use reqforge_core::{DomainHandler, PluginSynthesizer, SynthesisError, GENERAL_DOMAIN, MAX_PRIORITY};

use crate::config::PipelineConfig;
use crate::services::handlers::catalog::HandlerCatalog;
use crate::utils::error::AppResult;

/// Outcome of domain resolution for one pipeline run.
pub struct Resolution {
    /// The handler to extract with
    pub handler: Arc<dyn DomainHandler>,
    /// Resolved domain name
    pub domain: String,
    /// Weighted score of the winning handler (0.0 for fallback paths)
    pub confidence: f64,
    /// Whether this run minted a new handler
    pub was_synthesized: bool,
    /// Synthesis cost reported by the synthesizer (0.0 otherwise)
    pub cost: f64,
}

/// Resolves document content to a domain handler.
pub struct DomainResolver {
    catalog: Arc<HandlerCatalog>,
    synthesizer: Arc<dyn PluginSynthesizer>,
    confidence_threshold: f64,
    synthesis_enabled: bool,
    synthesis_timeout: Duration,
    /// Serializes synthesis so concurrent runs that independently decide
    /// the same new domain is needed mint at most one handler.
    synthesis_lock: Mutex<()>,
}

impl DomainResolver {
    pub fn new(
        catalog: Arc<HandlerCatalog>,
        synthesizer: Arc<dyn PluginSynthesizer>,
        config: &PipelineConfig,
    ) -> Self {
        Self {
            catalog,
            synthesizer,
            confidence_threshold: config.confidence_threshold,
            synthesis_enabled: config.synthesis_enabled,
            synthesis_timeout: Duration::from_secs(config.synthesis_timeout_secs),
            synthesis_lock: Mutex::new(()),
        }
    }

    /// Resolve content to a handler.
    ///
    /// A usable `domain_hint` (non-empty, not the `general` sentinel, and
    /// known to the catalog) short-circuits scoring entirely. Otherwise
    /// every known handler is scored and the best weighted match wins,
    /// ties broken by catalog scan order.
    pub async fn resolve(&self, content: &str, domain_hint: Option<&str>) -> AppResult<Resolution> {
        if let Some(hint) = domain_hint {
            let hint = hint.trim();
            if !hint.is_empty() && hint != GENERAL_DOMAIN && self.catalog.contains(hint).await {
                let handler = self.catalog.get(hint).await?;
                let confidence = weighted_score(handler.as_ref(), content);
                debug!(domain = %hint, confidence, "domain hint short-circuit");
                return Ok(Resolution {
                    handler,
                    domain: hint.to_string(),
                    confidence,
                    was_synthesized: false,
                    cost: 0.0,
                });
            }
        }

        if let Some(resolution) = self.best_match(content).await {
            if resolution.confidence >= self.confidence_threshold {
                info!(
                    domain = %resolution.domain,
                    confidence = resolution.confidence,
                    "resolved to existing handler"
                );
                return Ok(resolution);
            }
            debug!(
                best = %resolution.domain,
                confidence = resolution.confidence,
                threshold = self.confidence_threshold,
                "no handler above threshold"
            );
        }

        if self.synthesis_enabled {
            match self.synthesize(content, domain_hint).await {
                Ok(resolution) => return Ok(resolution),
                Err(e) => {
                    warn!(error = %e, "synthesis failed, degrading to general handler");
                }
            }
        }

        let handler = self.catalog.get(GENERAL_DOMAIN).await?;
        Ok(Resolution {
            handler,
            domain: GENERAL_DOMAIN.to_string(),
            confidence: 0.0,
            was_synthesized: false,
            cost: 0.0,
        })
    }

    /// Score every known handler and return the best weighted match.
    /// First-registered wins ties (strictly-greater comparison over the
    /// deterministic scan order).
    async fn best_match(&self, content: &str) -> Option<Resolution> {
        let mut best: Option<Resolution> = None;

        for name in self.catalog.list().await {
            let handler = match self.catalog.get(&name).await {
                Ok(handler) => handler,
                Err(e) => {
                    warn!(handler = %name, error = %e, "skipping handler that failed to load");
                    continue;
                }
            };

            let score = weighted_score(handler.as_ref(), content);
            debug!(handler = %name, score, "handler scored");

            let better = best
                .as_ref()
                .map(|b| score > b.confidence)
                .unwrap_or(true);
            if better {
                best = Some(Resolution {
                    handler,
                    domain: name,
                    confidence: score,
                    was_synthesized: false,
                    cost: 0.0,
                });
            }
        }

        best
    }

    /// Mint a new handler under the synthesis lock.
    ///
    /// The existing-handler check is repeated inside the lock: a run that
    /// lost the race to a concurrent synthesis finds the winner's handler
    /// already above threshold (or already registered under the same name)
    /// and reuses it instead of minting a second one.
    async fn synthesize(
        &self,
        content: &str,
        domain_hint: Option<&str>,
    ) -> Result<Resolution, SynthesisError> {
        let _guard = self.synthesis_lock.lock().await;

        if let Some(resolution) = self.best_match(content).await {
            if resolution.confidence >= self.confidence_threshold {
                debug!(domain = %resolution.domain, "synthesis raced, reusing existing handler");
                return Ok(resolution);
            }
        }

        let existing = self.catalog.list().await;
        let hint = domain_hint.unwrap_or("");

        let output = tokio::time::timeout(
            self.synthesis_timeout,
            self.synthesizer.synthesize(content, hint, &existing),
        )
        .await
        .map_err(|_| SynthesisError::Timeout)??;

        if existing.iter().any(|name| name == &output.spec.name) {
            return Err(SynthesisError::DuplicateName(output.spec.name));
        }

        let cost = output.cost;
        let (handler, newly_registered) = self
            .catalog
            .register(output.spec)
            .await
            .map_err(|e| SynthesisError::InvalidArtifact(e.to_string()))?;

        let domain = handler.name().to_string();
        info!(domain = %domain, cost, newly_registered, "synthesized handler resolved");

        Ok(Resolution {
            confidence: weighted_score(handler.as_ref(), content),
            domain,
            handler,
            was_synthesized: newly_registered,
            cost: if newly_registered { cost } else { 0.0 },
        })
    }
}

/// Weighted affinity: raw keyword confidence scaled by handler priority.
fn weighted_score(handler: &dyn DomainHandler, content: &str) -> f64 {
    handler.detect_confidence(content) * (handler.priority() as f64 / MAX_PRIORITY as f64)
}
