//! CSV export of the processing-activity register.

use crate::ropa::RopaEntry;

const HEADER: &str = "Title,Department,Status,Risk Level,Lawful Basis,Data Subjects,Data Categories,Recipients,Retention Period,Last Updated";

/// Render the register as CSV text. Multi-value fields join with "; " so
/// the list stays inside one cell.
pub fn ropa_csv(entries: &[RopaEntry]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for entry in entries {
        let activity = &entry.activity;
        let row = [
            activity.title.clone(),
            entry.department_name.clone(),
            activity.status.to_string(),
            activity
                .risk_level
                .map(|level| level.to_string())
                .unwrap_or_else(|| "UNASSESSED".to_string()),
            activity.lawful_basis.clone(),
            activity.data_subjects.join("; "),
            activity.data_categories.join("; "),
            activity.recipients.join("; "),
            activity.retention_period.clone(),
            activity.updated_at.format("%Y-%m-%d").to_string(),
        ];
        let encoded: Vec<String> = row.iter().map(|cell| csv_cell(cell)).collect();
        out.push_str(&encoded.join(","));
        out.push('\n');
    }
    out
}

/// Quote a cell only when it needs it, doubling embedded quotes.
fn csv_cell(value: &str) -> String {
    if value.contains('"') || value.contains(',') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
