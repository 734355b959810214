//! PIA report assembly.

use crate::builder::{ReportBuilder, TextStyle};
use crate::output::{GeneratedDocument, ReportError};
use chrono::Utc;
use privgov_core::{Organization, PiaAssessment};

/// Render a Privacy Impact Assessment record as a paginated PDF report.
pub fn pia_report(
    pia: &PiaAssessment,
    org: &Organization,
) -> Result<GeneratedDocument, ReportError> {
    let mut builder = ReportBuilder::new();
    let risk_register = pia.risk_register();

    builder.line(
        "Privacy Impact Assessment (PIA) Report",
        TextStyle {
            size: 18.0,
            bold: true,
            x_offset: 0.0,
        },
    );
    builder.line(
        &format!("Generated: {}", Utc::now().format("%Y-%m-%d")),
        TextStyle::default(),
    );

    builder.section("Section 1: System / Process Overview");
    builder.label_value("Name of DPS:", &pia.title);
    builder.label_value(
        "Date of Assessment:",
        &pia.created_at.format("%Y-%m-%d").to_string(),
    );
    builder.label_value("Assessed By (DPO):", org.dpo_name.as_deref().unwrap_or(""));
    builder.label_value("System Owner:", pia.owner.as_deref().unwrap_or(""));
    builder.label_value("Brief Description:", pia.description.as_deref().unwrap_or(""));

    builder.section("Section 2: Data Processing Details");
    builder.label_value("Personal data collected:", &pia.answer("personal_data"));
    builder.label_value("Sensitive data collected:", &pia.answer("sensitive_data"));
    builder.label_value("Purpose of processing:", &pia.answer("purpose"));
    builder.label_value("Lawful basis:", &pia.answer("lawful_basis"));

    builder.section("Section 3: Data Lifecycle and Sharing");
    builder.label_value("Data collection method:", &pia.answer("collection_method"));
    builder.label_value("Storage and security:", &pia.answer("storage_security"));
    builder.label_value("Internal access:", &pia.answer("internal_access"));
    builder.label_value("External sharing:", &pia.answer("recipients"));
    builder.label_value("International transfers:", &pia.answer("cross_border"));
    builder.label_value("Retention period:", &pia.answer("retention"));
    builder.label_value("Retention justification:", &pia.answer("retention_reason"));
    builder.label_value("Disposal method:", &pia.answer("disposal_method"));

    builder.section("Section 4: Privacy Risk Assessment");
    if risk_register.is_empty() {
        builder.line("No risks recorded.", TextStyle::default());
    } else {
        for (index, risk) in risk_register.iter().enumerate() {
            builder.line(&format!("{}. {}", index + 1, risk.title), TextStyle::bold());
            builder.label_value("Context:", &risk.context);
            builder.label_value("Likelihood:", &risk.likelihood.to_string());
            builder.label_value("Impact:", &risk.impact.to_string());
            // Overall is derived on read; a stale stored value never prints.
            builder.label_value("Overall risk:", &risk.overall().to_string());
            builder.gap(7.0);
        }
    }

    builder.section("Section 5: Risk Mitigation and Control Measures");
    if risk_register.is_empty() {
        builder.line("No mitigation measures recorded.", TextStyle::default());
    } else {
        for (index, risk) in risk_register.iter().enumerate() {
            builder.line(&format!("{}. {}", index + 1, risk.title), TextStyle::bold());
            builder.label_value("Existing controls:", &risk.existing_controls);
            builder.label_value("Recommended measures:", &risk.recommended_controls);
            builder.label_value("Responsibility:", &risk.responsibility);
            builder.label_value("Target date:", &risk.target_date);
            builder.gap(7.0);
        }
    }

    builder.section("Section 6: Conclusion and Sign-off");
    builder.label_value("Summary of findings:", &pia.answer("summary_findings"));
    builder.label_value("Recommendation:", &pia.answer("recommendation"));
    builder.label_value("DPO Signature:", &pia.answer("dpo_signature"));

    let id_prefix: String = pia.id.chars().take(8).collect();
    let file_name = format!("pia-report-{id_prefix}.pdf");
    let bytes = builder.finish()?;
    tracing::info!(%file_name, "generated PIA report");
    Ok(GeneratedDocument::pdf(file_name, &bytes))
}
