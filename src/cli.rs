//! Command-line interface definition for SSO Relay
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands to serve the SSO routes and to inspect configuration.

use clap::{Parser, Subcommand};

/// SSO Relay - single-sign-on redirect and callback verification
///
/// Redirects browsers to a central SSO provider and verifies the salted
/// SHA-256 token the provider posts back.
#[derive(Parser, Debug, Clone)]
#[command(name = "sso-relay")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for SSO Relay
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Serve the SSO routes with a JSON identity responder
    Serve {
        /// Override the bind address from config
        #[arg(short, long)]
        bind: Option<String>,

        /// Skip the provider and accept the placeholder identity
        #[arg(long)]
        skip_sso: bool,
    },

    /// Validate the configuration and print a summary
    Check,

    /// Print the callback token the provider would issue for an email
    Token {
        /// Email to issue the token for
        #[arg(short, long)]
        email: String,
    },

    /// Print the provider redirect URL
    RedirectUrl,
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
