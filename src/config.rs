//! Configuration management for SSO Relay
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.
//!
//! The raw sections here are plain serde structs. [`Config::sso_settings`]
//! turns the `sso` section into the validated, immutable
//! [`SsoSettings`](crate::sso::SsoSettings) used at request time.

use crate::error::{Result, SsoError};
use crate::sso::SsoSettings;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Main configuration structure for SSO Relay
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// SSO provider and shared secret settings
    #[serde(default)]
    pub sso: SsoConfig,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// SSO provider configuration
///
/// `salt` is a secret: it must contain the `#email` placeholder exactly
/// once and is redacted in `Debug` output.
#[derive(Clone, Serialize, Deserialize)]
pub struct SsoConfig {
    /// Base URL of the provider's login endpoint
    #[serde(default)]
    pub redirect_url: String,

    /// Deployment environment name appended to `redirect_url`
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Base URL of this application
    #[serde(default)]
    pub project_url: String,

    /// Path appended to `project_url` to form the callback URL
    #[serde(default = "default_callback_path")]
    pub callback_path: String,

    /// Shared secret template containing `#email`
    #[serde(default)]
    pub salt: String,

    /// Skip the provider and accept a fixed placeholder identity
    #[serde(default)]
    pub skip_sso: bool,
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_callback_path() -> String {
    "/auth/sso/callback".to_string()
}

impl Default for SsoConfig {
    fn default() -> Self {
        Self {
            redirect_url: String::new(),
            environment: default_environment(),
            project_url: String::new(),
            callback_path: default_callback_path(),
            salt: String::new(),
            skip_sso: false,
        }
    }
}

impl std::fmt::Debug for SsoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SsoConfig")
            .field("redirect_url", &self.redirect_url)
            .field("environment", &self.environment)
            .field("project_url", &self.project_url)
            .field("callback_path", &self.callback_path)
            .field("salt", &"<redacted>")
            .field("skip_sso", &self.skip_sso)
            .finish()
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Route that starts the SSO flow
    #[serde(default = "default_auth_route")]
    pub auth_route: String,

    /// Route the provider redirects back to
    #[serde(default = "default_callback_route")]
    pub callback_route: String,
}

fn default_bind_address() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_auth_route() -> String {
    "/auth/sso".to_string()
}

fn default_callback_route() -> String {
    "/auth/sso/callback".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            auth_route: default_auth_route(),
            callback_route: default_callback_route(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SsoError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| SsoError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(redirect_url) = std::env::var("SSO_RELAY_REDIRECT_URL") {
            self.sso.redirect_url = redirect_url;
        }

        if let Ok(environment) = std::env::var("SSO_RELAY_ENVIRONMENT") {
            self.sso.environment = environment;
        }

        if let Ok(project_url) = std::env::var("SSO_RELAY_PROJECT_URL") {
            self.sso.project_url = project_url;
        }

        if let Ok(callback_path) = std::env::var("SSO_RELAY_CALLBACK_PATH") {
            self.sso.callback_path = callback_path;
        }

        if let Ok(salt) = std::env::var("SSO_RELAY_SALT") {
            self.sso.salt = salt;
        }

        if let Ok(skip_sso) = std::env::var("SSO_RELAY_SKIP_SSO") {
            match parse_bool(&skip_sso) {
                Some(value) => self.sso.skip_sso = value,
                None => tracing::warn!("Invalid SSO_RELAY_SKIP_SSO: {}", skip_sso),
            }
        }

        if let Ok(bind_address) = std::env::var("SSO_RELAY_BIND_ADDRESS") {
            self.server.bind_address = bind_address;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        if let crate::cli::Commands::Serve { bind, skip_sso } = &cli.command {
            if let Some(bind) = bind {
                self.server.bind_address = bind.clone();
            }
            if *skip_sso {
                self.sso.skip_sso = true;
            }
        }
    }

    /// Builds the validated SSO settings from the `sso` section.
    ///
    /// # Errors
    ///
    /// Returns [`SsoError::Config`] if the section is invalid
    pub fn sso_settings(&self) -> Result<SsoSettings> {
        Ok(SsoSettings::from_config(&self.sso)?)
    }

    /// Validate the configuration
    ///
    /// Ensures the SSO section produces valid settings and that the server
    /// routes and bind address are usable.
    ///
    /// # Returns
    ///
    /// Returns Ok if configuration is valid
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        let settings = self.sso_settings()?;

        if self.callback_route_mismatch(&settings) {
            tracing::warn!(
                callback_path = %settings.callback_path,
                callback_route = %self.server.callback_route,
                "sso.callback_path does not match server.callback_route; the provider will redirect to a route this server does not serve"
            );
        }

        for (name, route) in [
            ("server.auth_route", &self.server.auth_route),
            ("server.callback_route", &self.server.callback_route),
        ] {
            if !route.starts_with('/') {
                return Err(SsoError::Config(format!("{name} must start with '/'")).into());
            }
        }

        if self.server.auth_route == self.server.callback_route {
            return Err(SsoError::Config(
                "server.auth_route and server.callback_route must differ".to_string(),
            )
            .into());
        }

        if self.server.bind_address.parse::<SocketAddr>().is_err() {
            return Err(SsoError::Config(format!(
                "server.bind_address is not a socket address: {}",
                self.server.bind_address
            ))
            .into());
        }

        Ok(())
    }

    /// Returns true when the callback URL sent to the provider lands outside
    /// the served callback route.
    ///
    /// Only checked when `project_url` has no path prefix; behind a prefix
    /// (e.g. a reverse proxy mount) the two are expected to differ.
    pub fn callback_route_mismatch(&self, settings: &SsoSettings) -> bool {
        settings.project_url.path() == "/"
            && settings.callback_path != self.server.callback_route
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use serial_test::serial;

    const ENV_VARS: [&str; 7] = [
        "SSO_RELAY_REDIRECT_URL",
        "SSO_RELAY_ENVIRONMENT",
        "SSO_RELAY_PROJECT_URL",
        "SSO_RELAY_CALLBACK_PATH",
        "SSO_RELAY_SALT",
        "SSO_RELAY_SKIP_SSO",
        "SSO_RELAY_BIND_ADDRESS",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
    }

    fn valid_config() -> Config {
        Config {
            sso: SsoConfig {
                redirect_url: "https://sso.example.com".to_string(),
                environment: "staging".to_string(),
                project_url: "https://app.example.com".to_string(),
                callback_path: "/auth/sso/callback".to_string(),
                salt: "s3cr3t-#email-key".to_string(),
                skip_sso: false,
            },
            server: ServerConfig::default(),
        }
    }

    fn cli(command: Commands) -> Cli {
        Cli {
            config: None,
            verbose: false,
            json_logs: false,
            command,
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.sso.environment, "development");
        assert_eq!(config.sso.callback_path, "/auth/sso/callback");
        assert!(!config.sso.skip_sso);
        assert_eq!(config.server.bind_address, "127.0.0.1:8080");
        assert_eq!(config.server.auth_route, "/auth/sso");
    }

    #[test]
    fn test_default_config_fails_validation() {
        assert!(Config::default().validate().is_err());
    }

    #[test]
    fn test_config_validation_success() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_config_validation_missing_placeholder() {
        let mut config = valid_config();
        config.sso.salt = "no-placeholder".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("#email"));
    }

    #[test]
    fn test_config_validation_route_without_slash() {
        let mut config = valid_config();
        config.server.auth_route = "auth".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_same_routes() {
        let mut config = valid_config();
        config.server.callback_route = config.server.auth_route.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_bind_address() {
        let mut config = valid_config();
        config.server.bind_address = "localhost".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_callback_route_matches_by_default() {
        let config = valid_config();
        let settings = config.sso_settings().unwrap();
        assert!(!config.callback_route_mismatch(&settings));
    }

    #[test]
    fn test_callback_route_mismatch_detected() {
        let mut config = valid_config();
        config.sso.callback_path = "/login/callback".to_string();
        let settings = config.sso_settings().unwrap();
        assert!(config.callback_route_mismatch(&settings));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_callback_route_mismatch_ignored_behind_path_prefix() {
        let mut config = valid_config();
        config.sso.project_url = "https://app.example.com/portal".to_string();
        config.sso.callback_path = "/login/callback".to_string();
        let settings = config.sso_settings().unwrap();
        assert!(!config.callback_route_mismatch(&settings));
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = r#"
sso:
  redirect_url: https://sso.example.com
  environment: production
  project_url: https://app.example.com
  callback_path: /login/callback
  salt: "abc-#email-xyz"
  skip_sso: true

server:
  bind_address: 0.0.0.0:9000
  auth_route: /login
  callback_route: /login/callback
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.sso.environment, "production");
        assert_eq!(config.sso.callback_path, "/login/callback");
        assert!(config.sso.skip_sso);
        assert_eq!(config.server.bind_address, "0.0.0.0:9000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_partial_yaml_uses_defaults() {
        let yaml = r##"
sso:
  redirect_url: https://sso.example.com
  project_url: https://app.example.com
  salt: "#email"
"##;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.sso.environment, "development");
        assert_eq!(config.server.callback_route, "/auth/sso/callback");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_salt() {
        let config = valid_config();
        let printed = format!("{config:?}");
        assert!(!printed.contains("s3cr3t"));
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" 1 "), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    #[serial]
    fn test_load_nonexistent_file_uses_defaults() {
        clear_env();
        let config = Config::load("/nonexistent/sso-relay.yaml", &cli(Commands::Check)).unwrap();
        assert_eq!(config.sso.environment, "development");
        assert!(config.sso.redirect_url.is_empty());
    }

    #[test]
    #[serial]
    fn test_apply_env_vars_overrides_sso_fields() {
        clear_env();
        std::env::set_var("SSO_RELAY_REDIRECT_URL", "https://sso.env.example.com");
        std::env::set_var("SSO_RELAY_ENVIRONMENT", "staging");
        std::env::set_var("SSO_RELAY_PROJECT_URL", "https://app.env.example.com");
        std::env::set_var("SSO_RELAY_SALT", "env-#email");
        std::env::set_var("SSO_RELAY_SKIP_SSO", "yes");
        std::env::set_var("SSO_RELAY_CALLBACK_PATH", "/login/callback");
        std::env::set_var("SSO_RELAY_BIND_ADDRESS", "0.0.0.0:9090");

        let mut config = Config::default();
        config.apply_env_vars();
        clear_env();

        assert_eq!(config.sso.redirect_url, "https://sso.env.example.com");
        assert_eq!(config.sso.environment, "staging");
        assert_eq!(config.sso.project_url, "https://app.env.example.com");
        assert_eq!(config.sso.salt, "env-#email");
        assert!(config.sso.skip_sso);
        assert_eq!(config.sso.callback_path, "/login/callback");
        assert_eq!(config.server.bind_address, "0.0.0.0:9090");
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_apply_env_vars_ignores_invalid_bool() {
        clear_env();
        std::env::set_var("SSO_RELAY_SKIP_SSO", "sometimes");

        let mut config = Config::default();
        config.apply_env_vars();
        clear_env();

        assert!(!config.sso.skip_sso);
    }

    #[test]
    fn test_cli_overrides_apply_to_serve() {
        let mut config = valid_config();
        config.apply_cli_overrides(&cli(Commands::Serve {
            bind: Some("0.0.0.0:3000".to_string()),
            skip_sso: true,
        }));
        assert_eq!(config.server.bind_address, "0.0.0.0:3000");
        assert!(config.sso.skip_sso);
    }

    #[test]
    fn test_cli_overrides_ignore_other_commands() {
        let mut config = valid_config();
        config.apply_cli_overrides(&cli(Commands::RedirectUrl));
        assert_eq!(config.server.bind_address, "127.0.0.1:8080");
        assert!(!config.sso.skip_sso);
    }
}
