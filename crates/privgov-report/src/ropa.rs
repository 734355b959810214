//! ROPA compliance report and review/approval form assembly.

use crate::builder::{ReportBuilder, TextStyle};
use crate::output::{GeneratedDocument, ReportError};
use crate::tracking::format_tracking_code;
use chrono::Utc;
use privgov_core::{Organization, ProcessStatus, ProcessingActivity};

/// A processing activity paired with the display name of its department.
#[derive(Debug, Clone)]
pub struct RopaEntry {
    /// The activity record.
    pub activity: ProcessingActivity,
    /// Department display name, resolved at lookup time.
    pub department_name: String,
}

/// Render the full Record of Processing Activities as a paginated PDF.
pub fn ropa_compliance_report(
    org: &Organization,
    entries: &[RopaEntry],
) -> Result<GeneratedDocument, ReportError> {
    let mut builder = ReportBuilder::new();
    let today = Utc::now();

    builder.line(
        "Record of Processing Activities (ROPA)",
        TextStyle {
            size: 18.0,
            bold: true,
            x_offset: 0.0,
        },
    );
    builder.line(
        &org.name,
        TextStyle {
            size: 13.0,
            bold: true,
            x_offset: 0.0,
        },
    );
    let location: Vec<&str> = [org.address.as_deref(), org.city.as_deref(), org.country.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if !location.is_empty() {
        builder.line(&location.join(", "), TextStyle::default());
    }
    if let Some(dpo) = org.dpo_name.as_deref() {
        builder.line(
            &format!("Data Protection Officer: {dpo}"),
            TextStyle::default(),
        );
    }
    builder.line(
        &format!("Generated: {}", today.format("%Y-%m-%d")),
        TextStyle::default(),
    );

    let approved = entries
        .iter()
        .filter(|e| e.activity.status == ProcessStatus::Approved)
        .count();
    builder.gap(7.0);
    builder.paragraph(
        &format!(
            "This document records the personal data processing activities of {} \
             and is maintained as required by the applicable data privacy law. \
             It currently covers {} approved processing activit{}.",
            org.name,
            approved,
            if approved == 1 { "y" } else { "ies" },
        ),
        TextStyle::default(),
    );

    for (index, entry) in entries.iter().enumerate() {
        let activity = &entry.activity;
        builder.section(&format!("{}. {}", index + 1, activity.title));
        builder.label_value("Department:", &entry.department_name);
        builder.label_value("Description:", activity.description.as_deref().unwrap_or(""));
        builder.label_value("Lawful basis:", &activity.lawful_basis);
        builder.label_value("Data subjects:", &activity.data_subjects.join(", "));
        builder.label_value("Data categories:", &activity.data_categories.join(", "));
        builder.label_value("Recipients:", &activity.recipients.join(", "));
        builder.label_value("Retention period:", &activity.retention_period);
        builder.label_value(
            "Risk level:",
            &activity
                .risk_level
                .map(|level| level.to_string())
                .unwrap_or_else(|| "UNASSESSED".to_string()),
        );
        builder.label_value("Status:", &activity.status.to_string());
    }

    builder.section("Certification");
    builder.paragraph(
        "The undersigned Data Protection Officer certifies that the processing \
         activities recorded above are accurate and current as of the date of \
         generation.",
        TextStyle::default(),
    );
    builder.gap(14.0);
    builder.line(
        &format!(
            "{}, Data Protection Officer",
            org.dpo_name.as_deref().unwrap_or("____________________")
        ),
        TextStyle::default(),
    );

    let file_name = format!("ropa-report-{}-{}.pdf", org.slug, today.format("%Y-%m-%d"));
    let bytes = builder.finish()?;
    tracing::info!(%file_name, entries = entries.len(), "generated ROPA report");
    Ok(GeneratedDocument::pdf(file_name, &bytes))
}

/// Render the review and approval form for a single activity.
pub fn ropa_approval_form(
    org: &Organization,
    entry: &RopaEntry,
) -> Result<GeneratedDocument, ReportError> {
    let activity = &entry.activity;
    let tracking = format_tracking_code(&activity.id, activity.created_at);
    let mut builder = ReportBuilder::new();

    builder.line(
        "ROPA Review and Approval Form",
        TextStyle {
            size: 16.0,
            bold: true,
            x_offset: 0.0,
        },
    );
    builder.line(&org.name, TextStyle::default());
    builder.label_value("Tracking code:", &tracking);

    builder.section("Process Details");
    builder.label_value("Process title:", &activity.title);
    builder.label_value("Department:", &entry.department_name);
    builder.label_value("Description:", activity.description.as_deref().unwrap_or(""));
    builder.label_value("Data subjects:", &activity.data_subjects.join(", "));
    builder.label_value("Data categories:", &activity.data_categories.join(", "));
    builder.label_value("Lawful basis:", &activity.lawful_basis);
    builder.label_value("Recipients:", &activity.recipients.join(", "));
    builder.label_value("Retention period:", &activity.retention_period);
    builder.label_value(
        "Risk level:",
        &activity
            .risk_level
            .map(|level| level.to_string())
            .unwrap_or_else(|| "UNASSESSED".to_string()),
    );
    builder.label_value("Status:", &activity.status.to_string());

    signature_block(&mut builder, "Reviewed by");
    signature_block(&mut builder, "Approved by");

    let file_name = format!("ropa-review-approval-{tracking}.pdf");
    let bytes = builder.finish()?;
    tracing::info!(%file_name, activity = %activity.id, "generated approval form");
    Ok(GeneratedDocument::pdf(file_name, &bytes))
}

fn signature_block(builder: &mut ReportBuilder, title: &str) {
    builder.section(title);
    for field in ["Name:", "Position:", "Signature:", "Date:"] {
        builder.label_value(field, "_________________________________");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use privgov_core::RiskLevel;

    fn sample_org() -> Organization {
        Organization {
            id: "default-org".to_string(),
            name: "Sample Corporation".to_string(),
            slug: "sample-corporation".to_string(),
            address: Some("123 Tech Street".to_string()),
            city: Some("Manila".to_string()),
            country: Some("Philippines".to_string()),
            phone: None,
            email: None,
            website: None,
            dpo_name: Some("Juan Dela Cruz".to_string()),
            dpo_email: None,
            industry: Some("Technology".to_string()),
            employee_count: Some(150),
            description: None,
            regulator_notification_email: None,
            breach_notification_hours: Some(72),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample_entry() -> RopaEntry {
        RopaEntry {
            activity: ProcessingActivity {
                id: "9f8a7b6c-5d4e-3f2a".to_string(),
                dept_id: "dept-hr".to_string(),
                title: "Employee Payroll Processing".to_string(),
                description: Some("Monthly salary processing".to_string()),
                data_subjects: vec!["Employees".to_string()],
                data_categories: vec![
                    "Personal Information".to_string(),
                    "Financial Information".to_string(),
                ],
                lawful_basis: "Legal Obligation".to_string(),
                recipients: vec!["Bank".to_string(), "BIR".to_string()],
                retention_period: "5 years after separation".to_string(),
                status: ProcessStatus::Approved,
                risk_level: Some(RiskLevel::Medium),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            department_name: "Human Resources".to_string(),
        }
    }

    #[test]
    fn test_compliance_report_file_name_carries_slug_and_date() {
        let doc = ropa_compliance_report(&sample_org(), &[sample_entry()]).unwrap();
        assert!(doc.file_name.starts_with("ropa-report-sample-corporation-"));
        assert!(doc.file_name.ends_with(".pdf"));
        assert!(doc.decode().unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_compliance_report_handles_empty_register() {
        let doc = ropa_compliance_report(&sample_org(), &[]).unwrap();
        assert!(doc.decode().unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_approval_form_file_name_carries_tracking_code() {
        let entry = sample_entry();
        let tracking =
            format_tracking_code(&entry.activity.id, entry.activity.created_at);
        let doc = ropa_approval_form(&sample_org(), &entry).unwrap();
        assert_eq!(doc.file_name, format!("ropa-review-approval-{tracking}.pdf"));
        assert!(tracking.starts_with("ROPA-9F8A7B6C-"));
    }

    #[test]
    fn test_unassessed_activity_renders() {
        let mut entry = sample_entry();
        entry.activity.risk_level = None;
        let doc = ropa_approval_form(&sample_org(), &entry).unwrap();
        assert!(doc.decode().unwrap().starts_with(b"%PDF"));
    }
}
