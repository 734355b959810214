//! PDF and CSV report generation for the compliance register.
//!
//! Reports are assembled through [`builder::ReportBuilder`], a shared
//! paginated layout engine; each assembler only decides what to print
//! and in what order. Finished documents come back as
//! [`GeneratedDocument`] envelopes with base64-encoded bytes.

pub mod builder;
pub mod csv;
pub mod fonts;
pub mod output;
pub mod pia;
pub mod ropa;
pub mod tracking;

pub use builder::{ReportBuilder, TextStyle};
pub use csv::ropa_csv;
pub use output::{GeneratedDocument, ReportError};
pub use pia::pia_report;
pub use ropa::{ropa_approval_form, ropa_compliance_report, RopaEntry};
pub use tracking::format_tracking_code;
