//! Configuration inspection CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use passgate_core::config::AppConfig;
use passgate_core::config::auth::PLACEHOLDER_JWT_SECRET;
use passgate_core::error::AppError;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration with the secret masked
    Show,
    /// Validate the configuration
    Validate,
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let mut shown = config.clone();
            shown.auth.jwt_secret = mask_secret(&shown.auth.jwt_secret);
            output::print_item(&shown, format);
        }
        ConfigCommand::Validate => {
            // Loading already validated; report what was accepted.
            config.validate()?;
            output::print_success(&format!("Configuration '{config_path}' is valid"));
            output::print_kv("Token TTL", &format!("{}s", config.auth.token_ttl_seconds));
            output::print_kv("Log level", &config.logging.level);
            if config.auth.jwt_secret == PLACEHOLDER_JWT_SECRET {
                output::print_warning("auth.jwt_secret is still the placeholder value");
            }
        }
    }

    Ok(())
}

/// Mask all but the first four characters of a secret for display
fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    format!("{visible}****")
}
