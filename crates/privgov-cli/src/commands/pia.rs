//! `privgov pia`.

use crate::cli::{print_json, Cli};
use crate::error::CliError;
use clap::{Args, Subcommand};
use privgov_core::PiaStatus;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct PiaCommand {
    #[command(subcommand)]
    action: Action,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// Start a PIA for a system or process
    Create {
        /// Title of the assessed system
        title: String,
        /// Free-text description
        #[arg(long)]
        description: Option<String>,
        /// System owner
        #[arg(long)]
        owner: Option<String>,
    },

    /// List PIAs
    List,

    /// Show one PIA
    Show {
        /// PIA id
        id: String,
    },

    /// Replace the questionnaire answers from a JSON file
    SetAnswers {
        /// PIA id
        id: String,
        /// Path to a JSON object keyed by question id
        file: PathBuf,
    },

    /// Move a PIA through the workflow (DRAFT, REVIEW, APPROVED)
    SetStatus {
        /// PIA id
        id: String,
        /// Target status
        status: String,
    },

    /// Delete a PIA
    Remove {
        /// PIA id
        id: String,
    },
}

impl PiaCommand {
    pub fn run(&self, cli: &Cli) -> Result<(), CliError> {
        let store = cli.open_store()?;
        match &self.action {
            Action::Create {
                title,
                description,
                owner,
            } => {
                let pia = store.create_pia(
                    &cli.org,
                    title,
                    description.as_deref(),
                    owner.as_deref(),
                )?;
                print_json(&pia)
            }
            Action::List => print_json(&store.pias(&cli.org)?),
            Action::Show { id } => print_json(&store.pia(id)?),
            Action::SetAnswers { id, file } => {
                let raw = std::fs::read_to_string(file)?;
                let answers: BTreeMap<String, serde_json::Value> = serde_json::from_str(&raw)?;
                store.update_pia_answers(id, &answers)?;
                print_json(&store.pia(id)?)
            }
            Action::SetStatus { id, status } => {
                let status: PiaStatus = status
                    .to_uppercase()
                    .parse()
                    .map_err(|_| CliError::InvalidArgument(format!("unknown status: {status}")))?;
                store.set_pia_status(id, status)?;
                print_json(&store.pia(id)?)
            }
            Action::Remove { id } => {
                store.delete_pia(id)?;
                println!("deleted {id}");
                Ok(())
            }
        }
    }
}
