//! Handler Catalog
//!
//! Stores and retrieves domain handlers. Scanning discovers metadata only
//! (built-in factories plus persisted spec files) without instantiating
//! anything; instances are created lazily, exactly once per name, and
//! cached for the process lifetime.
//!
//! The catalog is the only shared mutable resource in the system. All
//! mutation goes through a single catalog-wide lock so that concurrent
//! runs observe at most one instance and one registration per name.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use reqforge_core::{
    CoreError, DomainHandler, HandlerDescriptor, HandlerSpec, SpecHandler, MAX_PRIORITY,
};

use crate::services::handlers::builtins::{
    EcommerceHandler, EnterpriseHandler, GeneralHandler, HealthcareHandler,
};
use crate::services::handlers::store::HandlerStore;
use crate::utils::error::{AppError, AppResult};

/// How a catalog entry materializes its handler instance.
enum HandlerSource {
    /// Built-in handler constructed by a factory function
    Builtin(fn() -> Arc<dyn DomainHandler>),
    /// Spec-driven handler loaded from a persisted file
    SpecFile(PathBuf),
    /// Spec registered in-process (already validated)
    Registered(HandlerSpec),
}

struct CatalogEntry {
    descriptor: HandlerDescriptor,
    source: HandlerSource,
    instance: Option<Arc<dyn DomainHandler>>,
}

struct CatalogInner {
    entries: HashMap<String, CatalogEntry>,
    /// Scan/registration order; the resolver's deterministic tie-break
    order: Vec<String>,
}

/// Registry of known domain handlers with lazy, cached instantiation.
pub struct HandlerCatalog {
    inner: RwLock<CatalogInner>,
    store: HandlerStore,
}

impl HandlerCatalog {
    /// Create an empty catalog backed by the given spec store.
    pub fn new(store: HandlerStore) -> Self {
        Self {
            inner: RwLock::new(CatalogInner {
                entries: HashMap::new(),
                order: Vec::new(),
            }),
            store,
        }
    }

    /// Discover available handlers without instantiating them.
    ///
    /// Registers the built-in set first (fixed order), then persisted
    /// synthesized specs in name order. Already-known names are left
    /// untouched, so a re-scan never drops a loaded instance. Broken
    /// persisted entries are skipped by the store, never fatal.
    pub async fn scan(&self) {
        let builtins: [(&str, u8, fn() -> Arc<dyn DomainHandler>); 4] = [
            ("general", 1, || Arc::new(GeneralHandler)),
            ("enterprise", 4, || Arc::new(EnterpriseHandler)),
            ("healthcare", 5, || Arc::new(HealthcareHandler)),
            ("ecommerce", 4, || Arc::new(EcommerceHandler)),
        ];

        let persisted = self.store.scan();

        let mut inner = self.inner.write().await;
        for (name, priority, factory) in builtins {
            if !inner.entries.contains_key(name) {
                inner.order.push(name.to_string());
                inner.entries.insert(
                    name.to_string(),
                    CatalogEntry {
                        descriptor: HandlerDescriptor::builtin(name, priority),
                        source: HandlerSource::Builtin(factory),
                        instance: None,
                    },
                );
            }
        }

        for descriptor in persisted {
            let name = descriptor.name.clone();
            if inner.entries.contains_key(&name) {
                warn!(handler = %name, "persisted spec shadows an existing entry, skipping");
                continue;
            }
            let Some(path) = descriptor.source_path.clone() else {
                continue;
            };
            inner.order.push(name.clone());
            inner.entries.insert(
                name,
                CatalogEntry {
                    descriptor,
                    source: HandlerSource::SpecFile(path),
                    instance: None,
                },
            );
        }

        info!(handlers = inner.order.len(), "handler catalog scanned");
    }

    /// All known handler names, loaded or not, in scan order.
    pub async fn list(&self) -> Vec<String> {
        self.inner.read().await.order.clone()
    }

    /// Descriptors for all known handlers, in scan order.
    pub async fn descriptors(&self) -> Vec<HandlerDescriptor> {
        let inner = self.inner.read().await;
        inner
            .order
            .iter()
            .filter_map(|name| inner.entries.get(name))
            .map(|entry| entry.descriptor.clone())
            .collect()
    }

    /// Whether a name is known to the catalog.
    pub async fn contains(&self, name: &str) -> bool {
        self.inner.read().await.entries.contains_key(name)
    }

    /// Whether a handler has been instantiated.
    pub async fn is_loaded(&self, name: &str) -> bool {
        self.inner
            .read()
            .await
            .entries
            .get(name)
            .map(|e| e.descriptor.loaded)
            .unwrap_or(false)
    }

    /// Get a handler instance by name, instantiating and caching on first use.
    ///
    /// Instantiation happens with the catalog lock held, so at most one
    /// instance per name ever exists.
    pub async fn get(&self, name: &str) -> AppResult<Arc<dyn DomainHandler>> {
        let mut inner = self.inner.write().await;
        let entry = inner
            .entries
            .get_mut(name)
            .ok_or_else(|| AppError::Core(CoreError::not_found(format!("handler: {name}"))))?;

        if let Some(instance) = &entry.instance {
            return Ok(instance.clone());
        }

        let instance: Arc<dyn DomainHandler> = match &entry.source {
            HandlerSource::Builtin(factory) => factory(),
            HandlerSource::SpecFile(path) => Arc::new(SpecHandler::new(self.store.load(path)?)),
            HandlerSource::Registered(spec) => Arc::new(SpecHandler::new(spec.clone())),
        };

        validate_capabilities(name, instance.as_ref())?;

        entry.instance = Some(instance.clone());
        entry.descriptor.loaded = true;
        debug!(handler = %name, "handler instantiated and cached");
        Ok(instance)
    }

    /// Register a newly synthesized handler spec.
    ///
    /// Check-then-act runs entirely inside the catalog lock: if the name is
    /// already present (a concurrent synthesis won the race), the existing
    /// entry is kept and its instance returned with `newly_registered =
    /// false`. At most one registration per name ever survives.
    pub async fn register(
        &self,
        spec: HandlerSpec,
    ) -> AppResult<(Arc<dyn DomainHandler>, bool)> {
        spec.validate()?;

        let mut inner = self.inner.write().await;

        if inner.entries.contains_key(&spec.name) {
            debug!(handler = %spec.name, "registration raced, reusing existing entry");
            drop(inner);
            return Ok((self.get(&spec.name).await?, false));
        }

        // Persist before exposing; a store failure is non-fatal (the
        // handler still serves this process, it just won't survive restart).
        let source_path = match self.store.save(&spec) {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(handler = %spec.name, error = %e, "failed to persist handler spec");
                None
            }
        };

        let instance: Arc<dyn DomainHandler> = Arc::new(SpecHandler::new(spec.clone()));
        validate_capabilities(&spec.name, instance.as_ref())?;

        let descriptor = HandlerDescriptor {
            name: spec.name.clone(),
            loaded: true,
            priority_score: spec.priority,
            custom_created: spec.custom_created,
            creation_cost: spec.creation_cost,
            created_at: spec.created_at.clone(),
            source_path,
        };

        let name = spec.name.clone();
        inner.order.push(name.clone());
        inner.entries.insert(
            name.clone(),
            CatalogEntry {
                descriptor,
                source: HandlerSource::Registered(spec),
                instance: Some(instance.clone()),
            },
        );

        info!(handler = %name, "synthesized handler registered");
        Ok((instance, true))
    }
}

/// Conformance check run before an instance enters the cache: the exposed
/// name must match the catalog key, the priority must be in range, and
/// every handler except the `general` sentinel must carry keywords.
fn validate_capabilities(name: &str, handler: &dyn DomainHandler) -> AppResult<()> {
    if handler.name() != name {
        return Err(AppError::validation(format!(
            "handler exposes name '{}' but is registered as '{}'",
            handler.name(),
            name
        )));
    }
    if !(1..=MAX_PRIORITY).contains(&handler.priority()) {
        return Err(AppError::validation(format!(
            "handler '{}' priority {} out of range",
            name,
            handler.priority()
        )));
    }
    if name != reqforge_core::GENERAL_DOMAIN && handler.keywords().is_empty() {
        return Err(AppError::validation(format!(
            "handler '{}' has no keywords",
            name
        )));
    }
    Ok(())
}
