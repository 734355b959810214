//! `privgov advisory`.

use crate::cli::print_json;
use crate::error::CliError;
use clap::{Args, Subcommand};
use privgov_advisory::{AdvisoryApi, AdvisoryClient, AdvisoryConfig};

#[derive(Debug, Args)]
pub struct AdvisoryCommand {
    #[command(subcommand)]
    action: Action,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// Show the advisory configuration, optionally probing the service
    Status {
        /// Send a live request to check reachability
        #[arg(long)]
        probe: bool,
    },
}

impl AdvisoryCommand {
    pub async fn run(&self) -> Result<(), CliError> {
        match &self.action {
            Action::Status { probe } => {
                let config = AdvisoryConfig::from_env();
                let reachable = if *probe && config.enabled {
                    let client = AdvisoryClient::with_config(config.clone())?;
                    Some(client.consult("status check").await.is_ok())
                } else {
                    None
                };

                print_json(&serde_json::json!({
                    "enabled": config.enabled,
                    "url": config.base_url,
                    "reachable": reachable,
                }))
            }
        }
    }
}
