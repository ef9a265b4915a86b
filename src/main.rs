//! SSO Relay - single-sign-on redirect and callback verification
//!
#![doc = "SSO Relay"]
#![doc = "Main entry point for the SSO Relay application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sso_relay::cli::{Cli, Commands};
use sso_relay::commands;
use sso_relay::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose, cli.json_logs);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match &cli.command {
        Commands::Serve { .. } => {
            tracing::info!("Starting SSO relay server");
            commands::serve::run_serve(config).await?;
            Ok(())
        }
        Commands::Check => commands::inspect::check(&config),
        Commands::Token { email } => commands::inspect::token(&config, email),
        Commands::RedirectUrl => commands::inspect::redirect_url(&config),
    }
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so command output on stdout stays machine-readable.
fn init_tracing(verbose: bool, json: bool) {
    let default_directive = if verbose {
        "sso_relay=debug"
    } else {
        "sso_relay=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
