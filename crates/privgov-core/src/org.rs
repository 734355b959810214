//! Organization and department records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The organization operating the privacy office.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    /// Record identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// URL-safe identifier used in generated file names.
    pub slug: String,
    /// Postal address.
    pub address: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Country.
    pub country: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Public website.
    pub website: Option<String>,
    /// Data Protection Officer name.
    pub dpo_name: Option<String>,
    /// Data Protection Officer email.
    pub dpo_email: Option<String>,
    /// Industry sector.
    pub industry: Option<String>,
    /// Headcount.
    pub employee_count: Option<u32>,
    /// Free-text description.
    pub description: Option<String>,
    /// Where breach notifications to the regulator are sent.
    pub regulator_notification_email: Option<String>,
    /// Notification deadline for breaches, in hours.
    pub breach_notification_hours: Option<u32>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// A department owning processing activities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    /// Record identifier.
    pub id: String,
    /// Owning organization.
    pub org_id: String,
    /// Department name.
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}
