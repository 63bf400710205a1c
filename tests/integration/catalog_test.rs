//! Catalog Integration Tests
//!
//! Scan/get/register lifecycle against a real spec directory on disk.

use std::sync::Arc;

use reqforge::services::handlers::HandlerStore;
use reqforge::HandlerCatalog;
use reqforge_core::{Category, HandlerSpec, Priority, RequirementTemplate};

fn spec(name: &str) -> HandlerSpec {
    HandlerSpec {
        name: name.to_string(),
        keywords: vec!["fleet".to_string(), "vehicle".to_string(), "route".to_string()],
        priority: 3,
        requirement_templates: vec![RequirementTemplate {
            trigger: Some("fleet".to_string()),
            title: "Track fleet positions".to_string(),
            priority: Priority::High,
            category: Category::Functional,
        }],
        stakeholders: vec!["Dispatchers".to_string()],
        custom_created: true,
        creation_cost: 0.4,
        created_at: Some("2026-08-30T00:00:00Z".to_string()),
    }
}

#[tokio::test]
async fn test_scan_discovers_builtins_without_loading() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = HandlerCatalog::new(HandlerStore::new(dir.path().to_path_buf()));
    catalog.scan().await;

    let names = catalog.list().await;
    assert_eq!(names, vec!["general", "enterprise", "healthcare", "ecommerce"]);
    for name in &names {
        assert!(!catalog.is_loaded(name).await);
    }
}

#[tokio::test]
async fn test_get_loads_once_and_flips_descriptor() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = HandlerCatalog::new(HandlerStore::new(dir.path().to_path_buf()));
    catalog.scan().await;

    let first = catalog.get("healthcare").await.unwrap();
    assert!(catalog.is_loaded("healthcare").await);
    let second = catalog.get("healthcare").await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    // Loading one handler does not load the others.
    assert!(!catalog.is_loaded("ecommerce").await);
}

#[tokio::test]
async fn test_unknown_name_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = HandlerCatalog::new(HandlerStore::new(dir.path().to_path_buf()));
    catalog.scan().await;
    assert!(catalog.get("astrology").await.is_err());
}

#[tokio::test]
async fn test_registered_spec_is_rediscovered_after_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let catalog = HandlerCatalog::new(HandlerStore::new(dir.path().to_path_buf()));
        catalog.scan().await;
        let (handler, newly) = catalog.register(spec("fleet_ops")).await.unwrap();
        assert!(newly);
        assert_eq!(handler.name(), "fleet_ops");
    }

    let catalog = HandlerCatalog::new(HandlerStore::new(dir.path().to_path_buf()));
    catalog.scan().await;
    assert!(catalog.contains("fleet_ops").await);

    let handler = catalog.get("fleet_ops").await.unwrap();
    assert_eq!(handler.priority(), 3);
    assert_eq!(
        handler.extract_stakeholders("fleet dispatch"),
        vec!["Dispatchers".to_string()]
    );
}

#[tokio::test]
async fn test_double_registration_keeps_the_first() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = HandlerCatalog::new(HandlerStore::new(dir.path().to_path_buf()));
    catalog.scan().await;

    let (first, newly_a) = catalog.register(spec("fleet_ops")).await.unwrap();
    let mut competing = spec("fleet_ops");
    competing.creation_cost = 9.9;
    let (second, newly_b) = catalog.register(competing).await.unwrap();

    assert!(newly_a);
    assert!(!newly_b);
    assert!(Arc::ptr_eq(&first, &second));

    let descriptors = catalog.descriptors().await;
    let entry = descriptors.iter().find(|d| d.name == "fleet_ops").unwrap();
    assert!((entry.creation_cost - 0.4).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_broken_spec_file_does_not_abort_scan() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

    let catalog = HandlerCatalog::new(HandlerStore::new(dir.path().to_path_buf()));
    catalog.scan().await;

    // Builtins still present, broken entry skipped.
    assert!(catalog.contains("general").await);
    assert_eq!(catalog.list().await.len(), 4);
}
