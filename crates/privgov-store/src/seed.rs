//! Demo data for a fresh database.

use crate::error::StoreError;
use crate::store::Store;
use chrono::Utc;
use privgov_core::{
    Department, Organization, ProcessStatus, ProcessingActivity, RiskLevel,
};

/// Populate a database with the demo organization, its departments and
/// three sample processing activities. Safe to run more than once: rows
/// are keyed by fixed ids and replaced on re-run.
pub fn seed_demo(store: &Store) -> Result<Organization, StoreError> {
    let now = Utc::now();
    let org = Organization {
        id: "default-org".to_string(),
        name: "Sample Corporation".to_string(),
        slug: "sample-corporation".to_string(),
        address: Some("123 Tech Street".to_string()),
        city: Some("Manila".to_string()),
        country: Some("Philippines".to_string()),
        phone: Some("+63 2 1234 5678".to_string()),
        email: Some("contact@samplecorp.com".to_string()),
        website: Some("https://www.samplecorp.com".to_string()),
        dpo_name: Some("Juan Dela Cruz".to_string()),
        dpo_email: Some("dpo@samplecorp.com".to_string()),
        industry: Some("Technology".to_string()),
        employee_count: Some(150),
        description: Some(
            "A leading technology company focused on digital transformation and innovation"
                .to_string(),
        ),
        regulator_notification_email: None,
        breach_notification_hours: Some(72),
        created_at: now,
        updated_at: now,
    };
    store.upsert_organization(&org)?;

    let departments = [
        (
            "dept-hr",
            "Human Resources",
            "Responsible for recruitment, payroll, benefits, and employee relations",
        ),
        (
            "dept-marketing",
            "Marketing",
            "Handles marketing campaigns, customer engagement, and brand management",
        ),
        (
            "dept-it",
            "IT Department",
            "Manages IT infrastructure, security, and technical systems",
        ),
    ];
    for (id, name, description) in departments {
        store.upsert_department(&Department {
            id: id.to_string(),
            org_id: org.id.clone(),
            name: name.to_string(),
            description: Some(description.to_string()),
            created_at: now,
        })?;
    }

    let processes = [
        ProcessingActivity {
            id: "process-1".to_string(),
            dept_id: "dept-hr".to_string(),
            title: "Employee Payroll Processing".to_string(),
            description: Some("Monthly processing of employee salaries and benefits".to_string()),
            data_subjects: to_vec(&["Employees", "Dependents"]),
            data_categories: to_vec(&[
                "Financial Information",
                "Personal Information",
                "Employment Details",
            ]),
            lawful_basis: "Legal Obligation".to_string(),
            recipients: to_vec(&["BIR", "SSS", "PhilHealth", "Pag-IBIG", "Bank"]),
            retention_period: "5 years after separation".to_string(),
            status: ProcessStatus::Approved,
            risk_level: Some(RiskLevel::Medium),
            created_at: now,
            updated_at: now,
        },
        ProcessingActivity {
            id: "process-2".to_string(),
            dept_id: "dept-marketing".to_string(),
            title: "Customer Email Marketing".to_string(),
            description: Some("Sending promotional emails to customers and leads".to_string()),
            data_subjects: to_vec(&["Customers", "Leads", "Prospects"]),
            data_categories: to_vec(&[
                "Contact Information",
                "Purchase History",
                "Browsing Behavior",
            ]),
            lawful_basis: "Consent".to_string(),
            recipients: to_vec(&["Email Service Provider", "Analytics Platform"]),
            retention_period: "2 years or until consent withdrawal".to_string(),
            status: ProcessStatus::Review,
            risk_level: Some(RiskLevel::Low),
            created_at: now,
            updated_at: now,
        },
        ProcessingActivity {
            id: "process-3".to_string(),
            dept_id: "dept-it".to_string(),
            title: "CCTV Surveillance".to_string(),
            description: Some("Security monitoring of office premises".to_string()),
            data_subjects: to_vec(&["Employees", "Visitors", "Contractors"]),
            data_categories: to_vec(&["Biometric Data", "Location Data", "Video Footage"]),
            lawful_basis: "Legitimate Interest".to_string(),
            recipients: to_vec(&["Security Agency", "Law Enforcement (if required)"]),
            retention_period: "30 days".to_string(),
            status: ProcessStatus::Draft,
            risk_level: Some(RiskLevel::High),
            created_at: now,
            updated_at: now,
        },
    ];
    for process in &processes {
        store.insert_process(process)?;
    }

    tracing::info!(org = %org.name, processes = processes.len(), "seeded demo data");
    Ok(org)
}

fn to_vec(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
