//! `privgov incident`.

use crate::cli::{print_json, Cli};
use crate::error::CliError;
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use privgov_core::{IncidentSeverity, IncidentStatus};
use privgov_store::NewIncident;

#[derive(Debug, Args)]
pub struct IncidentCommand {
    #[command(subcommand)]
    action: Action,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// Report a new breach incident
    Report {
        /// Incident title
        title: String,
        /// When the breach occurred (RFC 3339, defaults to now)
        #[arg(long)]
        occurred: Option<DateTime<Utc>>,
        /// Severity (LOW, MEDIUM, HIGH, CRITICAL)
        #[arg(long, default_value = "MEDIUM")]
        severity: String,
        /// Estimated number of affected individuals
        #[arg(long)]
        impacted: Option<u32>,
        /// Systems involved
        #[arg(long)]
        systems: Option<String>,
        /// Free-text summary
        #[arg(long)]
        summary: Option<String>,
    },

    /// List incidents
    List,

    /// Show one incident
    Show {
        /// Incident id
        id: String,
    },

    /// Retriage or reassign an incident
    SetStatus {
        /// Incident id
        id: String,
        /// Target status (OPEN, IN_PROGRESS, RESOLVED)
        status: String,
        /// Person handling the incident
        #[arg(long)]
        assign: Option<String>,
    },

    /// Record that the regulator has been notified
    Notify {
        /// Incident id
        id: String,
    },

    /// Close an incident with resolution notes
    Resolve {
        /// Incident id
        id: String,
        /// Resolution notes
        #[arg(long)]
        notes: String,
    },
}

impl IncidentCommand {
    pub fn run(&self, cli: &Cli) -> Result<(), CliError> {
        let store = cli.open_store()?;
        match &self.action {
            Action::Report {
                title,
                occurred,
                severity,
                impacted,
                systems,
                summary,
            } => {
                let severity: IncidentSeverity =
                    severity.to_uppercase().parse().map_err(|_| {
                        CliError::InvalidArgument(format!("unknown severity: {severity}"))
                    })?;
                let incident = store.report_incident(NewIncident {
                    org_id: cli.org.clone(),
                    title: title.clone(),
                    occurrence_date: occurred.unwrap_or_else(Utc::now),
                    severity,
                    impacted_individuals: *impacted,
                    systems_affected: systems.clone(),
                    summary: summary.clone(),
                })?;
                print_json(&incident)
            }
            Action::List => print_json(&store.incidents(&cli.org)?),
            Action::Show { id } => print_json(&store.incident(id)?),
            Action::SetStatus { id, status, assign } => {
                let status: IncidentStatus =
                    status.to_uppercase().parse().map_err(|_| {
                        CliError::InvalidArgument(format!("unknown status: {status}"))
                    })?;
                store.set_incident_status(id, status, assign.as_deref())?;
                print_json(&store.incident(id)?)
            }
            Action::Notify { id } => {
                store.mark_regulator_notified(id, Utc::now())?;
                print_json(&store.incident(id)?)
            }
            Action::Resolve { id, notes } => {
                store.resolve_incident(id, notes)?;
                print_json(&store.incident(id)?)
            }
        }
    }
}
