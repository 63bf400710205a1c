//! Enterprise Handler
//!
//! Domain handler for internal business platforms: workflow automation,
//! reporting, integrations, and access control.

use reqforge_core::{DomainHandler, Priority, RequirementSeed};

use super::{detect_stakeholders, triggered_seeds, Trigger};

const KEYWORDS: &[&str] = &[
    "enterprise",
    "workflow",
    "erp",
    "crm",
    "integration",
    "compliance",
    "audit",
    "single sign-on",
    "sso",
    "reporting",
    "dashboard",
    "approval",
];

const TRIGGERS: &[Trigger] = &[
    Trigger {
        keyword: "workflow",
        title: "Automate business workflow approvals",
        priority: Priority::High,
    },
    Trigger {
        keyword: "integration",
        title: "Integrate with existing enterprise systems",
        priority: Priority::High,
    },
    Trigger {
        keyword: "sso",
        title: "Support single sign-on authentication",
        priority: Priority::High,
    },
    Trigger {
        keyword: "reporting",
        title: "Provide management reporting",
        priority: Priority::Medium,
    },
    Trigger {
        keyword: "dashboard",
        title: "Expose operational dashboards",
        priority: Priority::Medium,
    },
    Trigger {
        keyword: "audit",
        title: "Record audit trails for critical actions",
        priority: Priority::Medium,
    },
];

const STAKEHOLDERS: &[(&str, &str)] = &[
    ("", "Business Operations"),
    ("", "IT Department"),
    ("compliance", "Compliance Officers"),
    ("audit", "Internal Audit"),
    ("manager", "Line Managers"),
];

/// Handler for enterprise/internal-platform projects.
pub struct EnterpriseHandler;

impl DomainHandler for EnterpriseHandler {
    fn name(&self) -> &str {
        "enterprise"
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
        vec![
            RequirementSeed::non_functional("Enforce role-based access control", Priority::High),
            RequirementSeed::non_functional("Meet enterprise availability targets", Priority::Medium),
        ]
    }

    fn extract_stakeholders(&self, content: &str) -> Vec<String> {
        detect_stakeholders(content, STAKEHOLDERS)
    }
}
