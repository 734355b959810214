//! Command implementations.

mod advisory;
mod consult;
mod department;
mod incident;
mod pia;
mod process;
mod report;
mod seed;

pub use advisory::AdvisoryCommand;
pub use consult::ConsultCommand;
pub use department::DepartmentCommand;
pub use incident::IncidentCommand;
pub use pia::PiaCommand;
pub use process::ProcessCommand;
pub use report::ReportCommand;
pub use seed::SeedCommand;
