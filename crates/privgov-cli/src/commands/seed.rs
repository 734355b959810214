//! `privgov seed`.

use crate::cli::{print_json, Cli};
use crate::error::CliError;
use clap::Args;
use privgov_store::seed_demo;

/// Populate the database with the demo organization and register.
#[derive(Debug, Args)]
pub struct SeedCommand {}

impl SeedCommand {
    pub fn run(&self, cli: &Cli) -> Result<(), CliError> {
        let store = cli.open_store()?;
        let org = seed_demo(&store)?;
        print_json(&org)
    }
}
