//! CLI command definitions and dispatch.

pub mod config;
pub mod password;
pub mod secret;
pub mod token;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use passgate_core::config::AppConfig;
use passgate_core::error::AppError;

/// Passgate credential hashing and bearer token tooling
#[derive(Debug, Parser)]
#[command(name = "passgate", version, about, long_about = None)]
pub struct Cli {
    /// Base configuration file (extension optional)
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Environment overlay, loaded from `config/<ENV>`
    #[arg(short, long, env = "PASSGATE_ENV")]
    pub env: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Configuration inspection
    Config(config::ConfigArgs),
    /// Signing secret generation
    Secret(secret::SecretArgs),
    /// Password hashing
    Password(password::PasswordArgs),
    /// Token issue and verification
    Token(token::TokenArgs),
}

impl Cli {
    /// Load configuration from the base file, overlay, and environment
    pub fn load_config(&self) -> Result<AppConfig, AppError> {
        let overlay = self.env.as_ref().map(|env| format!("config/{env}"));
        AppConfig::load_from(&self.config, overlay.as_deref())
    }

    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Config(args) => config::execute(args, config, &self.config, self.format),
            Commands::Secret(args) => secret::execute(args, self.format),
            Commands::Password(args) => password::execute(args, config, self.format).await,
            Commands::Token(args) => token::execute(args, config, self.format),
        }
    }
}
