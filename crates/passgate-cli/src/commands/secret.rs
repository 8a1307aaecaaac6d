//! Signing secret CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use passgate_auth::jwt::generate_secret;
use passgate_core::error::AppError;

/// Arguments for secret commands
#[derive(Debug, Args)]
pub struct SecretArgs {
    /// Secret subcommand
    #[command(subcommand)]
    pub command: SecretCommand,
}

/// Secret subcommands
#[derive(Debug, Subcommand)]
pub enum SecretCommand {
    /// Generate a random secret for `auth.jwt_secret`
    Generate {
        /// Number of random bytes
        #[arg(short, long, default_value_t = 48)]
        bytes: usize,
    },
}

/// Execute secret commands
pub fn execute(args: &SecretArgs, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        SecretCommand::Generate { bytes } => {
            let secret = generate_secret(*bytes)?;
            match format {
                OutputFormat::Text => println!("{secret}"),
                OutputFormat::Json => output::print_record(&[("secret", secret)], format),
            }
        }
    }

    Ok(())
}
