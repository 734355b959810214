//! Tracking codes for approval forms.

use chrono::{DateTime, Datelike, Utc};

/// Format the deterministic tracking code for an approval form:
/// `ROPA-{8-char id segment}-{YYYYMMDD}`. The id segment is the record id
/// stripped of non-alphanumerics, uppercased, and truncated or
/// right-padded with 'X' to exactly eight characters.
pub fn format_tracking_code(record_id: &str, created_at: DateTime<Utc>) -> String {
    let mut segment: String = record_id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .take(8)
        .collect();
    while segment.len() < 8 {
        segment.push('X');
    }

    format!(
        "ROPA-{}-{:04}{:02}{:02}",
        segment,
        created_at.year(),
        created_at.month(),
        created_at.day()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_short_id_padded() {
        let created = Utc.with_ymd_and_hms(2024, 3, 5, 10, 30, 0).unwrap();
        assert_eq!(
            format_tracking_code("abc12", created),
            "ROPA-ABC12XXX-20240305"
        );
    }

    #[test]
    fn test_long_id_truncated_and_stripped() {
        let created = Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap();
        assert_eq!(
            format_tracking_code("9f8a7b6c-5d4e-3f2a-1b0c", created),
            "ROPA-9F8A7B6C-20251231"
        );
    }

    #[test]
    fn test_non_alphanumerics_removed_before_padding() {
        let created = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(format_tracking_code("a-b_c", created), "ROPA-ABCXXXXX-20240102");
    }
}
