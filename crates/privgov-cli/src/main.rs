//! Command-line tools for the compliance register.
//!
//! Main entry point for the `privgov` binary.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

mod cli;
mod commands;
mod error;

use cli::Cli;
use error::CliError;

/// Application exit codes.
#[repr(u8)]
pub enum Exit {
    Success = 0,
    GeneralError = 1,
    IoError = 3,
    NetworkError = 4,
    ValidationError = 5,
    NotFound = 6,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli) {
        eprintln!("{e}");
        return Exit::GeneralError.into();
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("failed to create async runtime: {e}");
            return Exit::GeneralError.into();
        }
    };

    match runtime.block_on(cli.execute()) {
        Ok(()) => Exit::Success.into(),
        Err(e) => {
            error!("{e}");
            e.exit_code().into()
        }
    }
}

fn init_logging(cli: &Cli) -> Result<(), CliError> {
    let mut config = privgov_log::LogConfig::from_env();

    // Verbosity flags win over the environment.
    if cli.quiet {
        config.level = privgov_log::LogLevel::Error;
    } else if cli.verbose > 0 {
        config.level = match cli.verbose {
            1 => privgov_log::LogLevel::Info,
            2 => privgov_log::LogLevel::Debug,
            _ => privgov_log::LogLevel::Trace,
        };
    }

    privgov_log::init(config)?;
    Ok(())
}
