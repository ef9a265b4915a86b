//! SSO Relay - single-sign-on redirect and callback verification library
//!
//! This library lets a web application delegate authentication to a central
//! SSO provider. The application redirects the browser to the provider, the
//! provider authenticates the user, and then posts back a token: the
//! lowercase hex SHA-256 digest of a shared salt with the user's email
//! substituted in. The library verifies that token and hands the identity to
//! a hook supplied by the host application.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `sso`: Settings, salt digests, redirect initiator, callback verifier,
//!   and the acceptance hook trait
//! - `routes`: axum router exposing the auth and callback routes
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//! - `commands`: CLI command handlers
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use sso_relay::{routes, Config};
//! use sso_relay::sso::JsonIdentityHook;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let cli = sso_relay::cli::Cli::parse_args();
//!     let config = Config::load("config.yaml", &cli)?;
//!     config.validate()?;
//!
//!     let settings = Arc::new(config.sso_settings()?);
//!     let app = routes::router(settings, &config.server, Arc::new(JsonIdentityHook));
//!
//!     let listener = tokio::net::TcpListener::bind(&config.server.bind_address).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod routes;
pub mod sso;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, SsoError};
pub use sso::{AcceptIdentity, AuthenticatedUser, SsoSettings};
