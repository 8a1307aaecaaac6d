//! Token issue and verification CLI commands.

use chrono::Duration;
use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use passgate_auth::jwt::{TokenIssuer, TokenVerifier};
use passgate_core::config::AppConfig;
use passgate_core::error::AppError;

/// Arguments for token commands
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Token subcommand
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Issue a token for a username with the configured secret
    Issue {
        /// Username to bind the token to
        subject: String,
        /// Lifetime in seconds (defaults to `auth.token_ttl_seconds`)
        #[arg(short, long, allow_negative_numbers = true)]
        ttl: Option<i64>,
    },
    /// Verify a token and print its claims
    Verify {
        /// Compact JWT string
        token: String,
    },
}

/// Execute token commands
pub fn execute(args: &TokenArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        TokenCommand::Issue { subject, ttl } => {
            let issuer = TokenIssuer::new(&config.auth);
            let ttl = match ttl {
                Some(secs) => Duration::try_seconds(*secs)
                    .ok_or_else(|| AppError::invalid_ttl("Token TTL is out of range"))?,
                None => issuer.default_ttl(),
            };
            let issued = issuer.issue(subject, ttl)?;
            output::print_record(
                &[
                    ("token", issued.token),
                    ("subject", issued.subject),
                    ("issued_at", issued.issued_at.to_rfc3339()),
                    ("expires_at", issued.expires_at.to_rfc3339()),
                ],
                format,
            );
        }
        TokenCommand::Verify { token } => {
            let verifier = TokenVerifier::new(&config.auth);
            match verifier.verify_claims(token) {
                Ok(claims) => output::print_record(
                    &[
                        ("valid", "true".to_string()),
                        ("subject", claims.sub.clone()),
                        ("issued_at", claims.issued_at().to_rfc3339()),
                        ("expires_at", claims.expires_at().to_rfc3339()),
                        (
                            "remaining_ttl",
                            format!("{}s", claims.remaining_ttl_seconds()),
                        ),
                    ],
                    format,
                ),
                Err(e) => {
                    output::print_record(
                        &[
                            ("valid", "false".to_string()),
                            ("reason", e.kind.to_string()),
                        ],
                        format,
                    );
                    return Err(e);
                }
            }
        }
    }

    Ok(())
}
