//! E-commerce Handler
//!
//! Domain handler for online storefronts and marketplaces.

use reqforge_core::{DomainHandler, Priority, RequirementSeed};

use super::{detect_stakeholders, triggered_seeds, Trigger};

const KEYWORDS: &[&str] = &[
    "shop",
    "store",
    "cart",
    "checkout",
    "payment",
    "product catalog",
    "inventory",
    "order",
    "shipping",
    "marketplace",
    "discount",
];

const TRIGGERS: &[Trigger] = &[
    Trigger {
        keyword: "cart",
        title: "Provide a shopping cart",
        priority: Priority::High,
    },
    Trigger {
        keyword: "checkout",
        title: "Support checkout and payment",
        priority: Priority::High,
    },
    Trigger {
        keyword: "catalog",
        title: "Browse the product catalog",
        priority: Priority::High,
    },
    Trigger {
        keyword: "inventory",
        title: "Track inventory levels",
        priority: Priority::Medium,
    },
    Trigger {
        keyword: "shipping",
        title: "Calculate shipping options",
        priority: Priority::Medium,
    },
    Trigger {
        keyword: "discount",
        title: "Apply discounts and promotions",
        priority: Priority::Low,
    },
];

const STAKEHOLDERS: &[(&str, &str)] = &[
    ("", "Customers"),
    ("", "Store Operators"),
    ("shipping", "Logistics Partners"),
    ("payment", "Payment Providers"),
    ("vendor", "Marketplace Vendors"),
];

/// Handler for e-commerce projects.
pub struct EcommerceHandler;

impl DomainHandler for EcommerceHandler {
    fn name(&self) -> &str {
        "ecommerce"
    }

    fn keywords(&self) -> Vec<String> {
        KEYWORDS.iter().map(|k| k.to_string()).collect()
    }

    fn priority(&self) -> u8 {
        4
    }

    fn extract_requirements(&self, content: &str) -> Vec<RequirementSeed> {
        triggered_seeds(content, TRIGGERS)
    }

    fn cross_cutting_requirements(&self) -> Vec<RequirementSeed> {
        vec![RequirementSeed::non_functional(
            "Secure payment processing",
            Priority::High,
        )]
    }

    fn extract_stakeholders(&self, content: &str) -> Vec<String> {
        detect_stakeholders(content, STAKEHOLDERS)
    }
}
