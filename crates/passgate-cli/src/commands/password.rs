//! Password hashing CLI commands.

use clap::{Args, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::output::{self, OutputFormat};
use passgate_auth::password::PasswordHasher;
use passgate_core::config::AppConfig;
use passgate_core::error::AppError;

/// Arguments for password commands
#[derive(Debug, Args)]
pub struct PasswordArgs {
    /// Password subcommand
    #[command(subcommand)]
    pub command: PasswordCommand,
}

/// Password subcommands
#[derive(Debug, Subcommand)]
pub enum PasswordCommand {
    /// Hash a password with the configured Argon2id parameters
    Hash {
        /// Password to hash; read from stdin when omitted
        password: Option<String>,
    },
    /// Check a password against a stored digest
    Verify {
        /// Stored Argon2id digest
        digest: String,
        /// Password to check; read from stdin when omitted
        password: Option<String>,
    },
}

/// Execute password commands
pub async fn execute(
    args: &PasswordArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let hasher = PasswordHasher::new(&config.auth)?;

    match &args.command {
        PasswordCommand::Hash { password } => {
            let password = resolve_password(password.as_deref()).await?;
            let digest = hasher.hash_password(&password)?;
            match format {
                OutputFormat::Text => println!("{digest}"),
                OutputFormat::Json => output::print_record(&[("digest", digest)], format),
            }
        }
        PasswordCommand::Verify { digest, password } => {
            let password = resolve_password(password.as_deref()).await?;
            let matches = hasher.verify_password(&password, digest);
            output::print_record(&[("matches", matches.to_string())], format);
            if !matches {
                return Err(AppError::invalid_credentials());
            }
        }
    }

    Ok(())
}

/// Use the argument if present, otherwise read one line from stdin
async fn resolve_password(arg: Option<&str>) -> Result<String, AppError> {
    if let Some(password) = arg {
        return Ok(password.to_string());
    }

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .map_err(|e| AppError::internal(format!("Failed to read password from stdin: {e}")))?;

    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        return Err(AppError::invalid_input("Password must not be empty"));
    }
    Ok(password)
}
