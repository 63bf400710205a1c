//! Resolver Integration Tests
//!
//! Domain resolution end to end: scoring against the built-in set,
//! runtime synthesis with persistence, and the at-most-one-registration
//! guarantee under concurrency.

use std::sync::Arc;

use futures_util::future::join_all;

use reqforge::services::handlers::HandlerStore;
use reqforge::{DomainResolver, HandlerCatalog, PipelineConfig, TemplateSynthesizer};

const BEE_CONTENT: &str = "Track every hive in the apiary. Each hive produces honey; \
    honey harvests and apiary inspections happen weekly. Hive health matters.";

async fn catalog(dir: &tempfile::TempDir) -> Arc<HandlerCatalog> {
    let catalog = Arc::new(HandlerCatalog::new(HandlerStore::new(
        dir.path().to_path_buf(),
    )));
    catalog.scan().await;
    catalog
}

fn resolver(catalog: Arc<HandlerCatalog>) -> DomainResolver {
    DomainResolver::new(
        catalog,
        Arc::new(TemplateSynthesizer),
        &PipelineConfig::default(),
    )
}

// ============================================================================
// Synthesis & Reuse
// ============================================================================

#[tokio::test]
async fn test_unmatched_content_synthesizes_then_reuses() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = catalog(&dir).await;
    let resolver = resolver(catalog.clone());

    let first = resolver.resolve(BEE_CONTENT, None).await.unwrap();
    assert!(first.was_synthesized);
    assert!(first.cost > 0.0);
    assert_eq!(first.domain, "hive");
    assert!(catalog.contains("hive").await);

    let second = resolver.resolve(BEE_CONTENT, None).await.unwrap();
    assert!(!second.was_synthesized);
    assert_eq!(second.cost, 0.0);
    assert_eq!(second.domain, "hive");
}

#[tokio::test]
async fn test_synthesized_handler_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let catalog = catalog(&dir).await;
        let resolver = resolver(catalog);
        let resolution = resolver.resolve(BEE_CONTENT, None).await.unwrap();
        assert!(resolution.was_synthesized);
    }

    // A fresh catalog over the same directory rediscovers the spec file.
    let catalog = catalog(&dir).await;
    assert!(catalog.contains("hive").await);
    let descriptors = catalog.descriptors().await;
    let hive = descriptors.iter().find(|d| d.name == "hive").unwrap();
    assert!(hive.custom_created);
    assert!(hive.creation_cost > 0.0);
    assert!(hive.created_at.is_some());
    assert!(hive.source_path.is_some());

    // And the restarted resolver reuses it without synthesizing.
    let resolver = resolver(catalog);
    let resolution = resolver.resolve(BEE_CONTENT, None).await.unwrap();
    assert!(!resolution.was_synthesized);
    assert_eq!(resolution.domain, "hive");
}

// ============================================================================
// Determinism
// ============================================================================

#[tokio::test]
async fn test_resolution_is_deterministic_for_fixed_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let resolver = resolver(catalog(&dir).await);

    let content = "Customers browse the shop and the marketplace, add items to the \
        cart, and pay at checkout with a saved payment method. The cart persists \
        between visits; checkout applies discount codes, and every order triggers \
        payment capture, inventory updates, and shipping labels. The store syncs \
        its product catalog nightly, the shop flags low inventory, and the \
        marketplace lists each store's shipping rates and discount rules alongside \
        the product catalog.";

    let a = resolver.resolve(content, None).await.unwrap();
    let b = resolver.resolve(content, None).await.unwrap();
    assert_eq!(a.domain, b.domain);
    assert_eq!(a.confidence, b.confidence);
    assert_eq!(a.domain, "ecommerce");
}

// ============================================================================
// At-Most-One Registration
// ============================================================================

#[tokio::test]
async fn test_concurrent_syntheses_register_exactly_once() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = catalog(&dir).await;
    let resolver = Arc::new(resolver(catalog.clone()));

    let runs = (0..8).map(|_| {
        let resolver = resolver.clone();
        tokio::spawn(async move { resolver.resolve(BEE_CONTENT, None).await })
    });
    let results: Vec<_> = join_all(runs)
        .await
        .into_iter()
        .map(|joined| joined.unwrap().unwrap())
        .collect();

    // Everyone resolved to the same domain; exactly one run minted it.
    assert!(results.iter().all(|r| r.domain == "hive"));
    let minted = results.iter().filter(|r| r.was_synthesized).count();
    assert_eq!(minted, 1);

    // Exactly one catalog entry carries the name.
    let names = catalog.list().await;
    assert_eq!(names.iter().filter(|n| n.as_str() == "hive").count(), 1);
    assert!(!names.iter().any(|n| n.starts_with("hive_")));
}
