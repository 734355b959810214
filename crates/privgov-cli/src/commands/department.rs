//! `privgov department`.

use crate::cli::{print_json, Cli};
use crate::error::CliError;
use clap::{Args, Subcommand};
use privgov_core::validate::validate_department_name;

#[derive(Debug, Args)]
pub struct DepartmentCommand {
    #[command(subcommand)]
    action: Action,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// List departments
    List,

    /// Create a department
    Add {
        /// Department name
        name: String,
        /// Free-text description
        #[arg(long)]
        description: Option<String>,
    },

    /// Rename a department
    Rename {
        /// Department id
        id: String,
        /// New name
        name: String,
        /// New description
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a department. Refused while it still owns processes.
    Remove {
        /// Department id
        id: String,
    },
}

impl DepartmentCommand {
    pub fn run(&self, cli: &Cli) -> Result<(), CliError> {
        let store = cli.open_store()?;
        match &self.action {
            Action::List => print_json(&store.departments(&cli.org)?),
            Action::Add { name, description } => {
                validate_department_name(name)?;
                let dept = store.create_department(&cli.org, name, description.as_deref())?;
                print_json(&dept)
            }
            Action::Rename {
                id,
                name,
                description,
            } => {
                validate_department_name(name)?;
                store.update_department(id, name, description.as_deref())?;
                print_json(&store.department(id)?)
            }
            Action::Remove { id } => {
                store.delete_department(id)?;
                println!("deleted {id}");
                Ok(())
            }
        }
    }
}
