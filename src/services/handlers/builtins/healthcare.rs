//! Healthcare Handler
//!
//! Domain handler for clinical and patient-facing systems.

use reqforge_core::{DomainHandler, Priority, RequirementSeed};

use super::{detect_stakeholders, triggered_seeds, Trigger};

const KEYWORDS: &[&str] = &[
    "patient",
    "clinical",
    "hospital",
    "medical",
    "diagnosis",
    "prescription",
    "appointment",
    "ehr",
    "health record",
    "hipaa",
    "telehealth",
];

const TRIGGERS: &[Trigger] = &[
    Trigger {
        keyword: "patient",
        title: "Manage patient records",
        priority: Priority::High,
    },
    Trigger {
        keyword: "appointment",
        title: "Schedule and track appointments",
        priority: Priority::High,
    },
    Trigger {
        keyword: "prescription",
        title: "Track prescriptions and refills",
        priority: Priority::High,
    },
    Trigger {
        keyword: "telehealth",
        title: "Support remote consultations",
        priority: Priority::Medium,
    },
    Trigger {
        keyword: "diagnosis",
        title: "Record clinical diagnoses",
        priority: Priority::Medium,
    },
];

const STAKEHOLDERS: &[(&str, &str)] = &[
    ("", "Clinicians"),
    ("", "Patients"),
    ("hospital", "Hospital Administration"),
    ("insurance", "Insurance Providers"),
    ("pharmacy", "Pharmacists"),
];

/// Handler for healthcare projects.
pub struct HealthcareHandler;

impl DomainHandler for HealthcareHandler {
    fn name(&self) -> &str {
        "healthcare"
    }

    fn keywords(&self) -> Vec<String> {
        KEYWORDS.iter().map(|k| k.to_string()).collect()
    }

    fn priority(&self) -> u8 {
        5
    }

    fn extract_requirements(&self, content: &str) -> Vec<RequirementSeed> {
        triggered_seeds(content, TRIGGERS)
    }

    fn cross_cutting_requirements(&self) -> Vec<RequirementSeed> {
        vec![
            RequirementSeed::non_functional("Protect patient data privacy", Priority::High),
            RequirementSeed::non_functional("Log access to health records", Priority::High),
        ]
    }

    fn extract_stakeholders(&self, content: &str) -> Vec<String> {
        detect_stakeholders(content, STAKEHOLDERS)
    }
}
