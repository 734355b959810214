//! `privgov report`.

use crate::cli::Cli;
use crate::error::CliError;
use clap::{Args, Subcommand};
use privgov_report::{
    pia_report, ropa_approval_form, ropa_compliance_report, ropa_csv, GeneratedDocument,
    RopaEntry,
};
use privgov_store::Store;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ReportCommand {
    /// Directory the generated file is written to
    #[arg(long, default_value = ".")]
    out: PathBuf,

    #[command(subcommand)]
    action: Action,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// The full ROPA compliance report as PDF
    Ropa,

    /// Review and approval form for one activity
    Approval {
        /// Activity id
        process_id: String,
    },

    /// PIA report for one assessment
    Pia {
        /// PIA id
        pia_id: String,
    },

    /// The register as CSV
    Csv,
}

impl ReportCommand {
    pub fn run(&self, cli: &Cli) -> Result<(), CliError> {
        let store = cli.open_store()?;
        let org = store.organization(&cli.org)?;

        match &self.action {
            Action::Ropa => {
                let entries = ropa_entries(&store, &cli.org)?;
                let doc = ropa_compliance_report(&org, &entries)?;
                write_document(&self.out, &doc)
            }
            Action::Approval { process_id } => {
                let activity = store.process(process_id)?;
                let department_name = store.department(&activity.dept_id)?.name;
                let doc = ropa_approval_form(
                    &org,
                    &RopaEntry {
                        activity,
                        department_name,
                    },
                )?;
                write_document(&self.out, &doc)
            }
            Action::Pia { pia_id } => {
                let pia = store.pia(pia_id)?;
                let doc = pia_report(&pia, &org)?;
                write_document(&self.out, &doc)
            }
            Action::Csv => {
                let entries = ropa_entries(&store, &cli.org)?;
                let csv = ropa_csv(&entries);
                let path = self.out.join("ropa-register.csv");
                std::fs::write(&path, csv)?;
                println!("{}", path.display());
                Ok(())
            }
        }
    }
}

/// Pair every activity with its department's display name.
fn ropa_entries(store: &Store, org_id: &str) -> Result<Vec<RopaEntry>, CliError> {
    let names: HashMap<String, String> = store
        .departments(org_id)?
        .into_iter()
        .map(|d| (d.id, d.name))
        .collect();

    Ok(store
        .processes()?
        .into_iter()
        .map(|activity| {
            let department_name = names
                .get(&activity.dept_id)
                .cloned()
                .unwrap_or_else(|| activity.dept_id.clone());
            RopaEntry {
                activity,
                department_name,
            }
        })
        .collect())
}

fn write_document(dir: &Path, doc: &GeneratedDocument) -> Result<(), CliError> {
    let bytes = doc
        .decode()
        .map_err(|e| CliError::InvalidArgument(format!("corrupt document payload: {e}")))?;
    let path = dir.join(&doc.file_name);
    std::fs::write(&path, bytes)?;
    println!("{}", path.display());
    Ok(())
}
