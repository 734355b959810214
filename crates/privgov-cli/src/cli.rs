//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::commands::{
    AdvisoryCommand, ConsultCommand, DepartmentCommand, IncidentCommand, PiaCommand,
    ProcessCommand, ReportCommand, SeedCommand,
};
use crate::error::CliError;
use privgov_store::Store;

/// privgov - compliance record keeping for data-privacy governance.
///
/// Maintain the processing-activity register, assess privacy risk, track
/// breach incidents and PIAs, and generate compliance reports.
#[derive(Debug, Parser)]
#[command(
    name = "privgov",
    version,
    about,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to the database file
    #[arg(long, global = true, env = "PRIVGOV_DB", default_value = "privgov.db")]
    pub db: PathBuf,

    /// Organization id to operate on
    #[arg(long, global = true, env = "PRIVGOV_ORG", default_value = "default-org")]
    pub org: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Populate the database with demo records
    Seed(SeedCommand),

    /// Manage departments
    #[command(visible_alias = "dept")]
    Department(DepartmentCommand),

    /// Manage processing activities
    Process(ProcessCommand),

    /// Track breach incidents
    Incident(IncidentCommand),

    /// Manage privacy impact assessments
    Pia(PiaCommand),

    /// Generate compliance reports
    Report(ReportCommand),

    /// Ask the advisory service a free-text question
    Consult(ConsultCommand),

    /// Inspect the advisory service configuration
    Advisory(AdvisoryCommand),
}

impl Cli {
    /// Open the database this invocation operates on.
    pub fn open_store(&self) -> Result<Store, CliError> {
        Ok(Store::open(&self.db)?)
    }

    /// Execute the selected command.
    pub async fn execute(&self) -> Result<(), CliError> {
        match &self.command {
            Command::Seed(cmd) => cmd.run(self),
            Command::Department(cmd) => cmd.run(self),
            Command::Process(cmd) => cmd.run(self).await,
            Command::Incident(cmd) => cmd.run(self),
            Command::Pia(cmd) => cmd.run(self),
            Command::Report(cmd) => cmd.run(self),
            Command::Consult(cmd) => cmd.run().await,
            Command::Advisory(cmd) => cmd.run().await,
        }
    }
}

/// Serialize a value as pretty JSON on stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
