//! Deployment environment names
//!
//! The environment is appended to the provider's login URL as a single path
//! segment, so its string form must be stable.

use std::fmt;
use std::str::FromStr;

use crate::error::SsoError;

/// Named deployment environment the provider should authenticate against.
///
/// # Examples
///
/// ```
/// use sso_relay::sso::Environment;
///
/// let env: Environment = "Staging".parse().unwrap();
/// assert_eq!(env, Environment::Staging);
/// assert_eq!(env.name(), "staging");
///
/// let custom: Environment = "qa-eu".parse().unwrap();
/// assert_eq!(custom.name(), "qa-eu");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Local development
    Development,
    /// Automated test runs
    Testing,
    /// Pre-production
    Staging,
    /// Production
    Production,
    /// Any other environment known to the provider
    Custom(String),
}

impl Environment {
    /// The path segment sent to the provider.
    pub fn name(&self) -> &str {
        match self {
            Environment::Development => "development",
            Environment::Testing => "testing",
            Environment::Staging => "staging",
            Environment::Production => "production",
            Environment::Custom(name) => name,
        }
    }

    /// Returns true for the production environment.
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Environment {
    type Err = SsoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(SsoError::Config("environment cannot be empty".to_string()));
        }
        if trimmed.contains(['/', '?', '#']) {
            return Err(SsoError::Config(format!(
                "environment must be a single path segment: {trimmed}"
            )));
        }

        Ok(match trimmed.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "testing" | "test" => Environment::Testing,
            "staging" => Environment::Staging,
            "production" | "prod" => Environment::Production,
            _ => Environment::Custom(trimmed.to_string()),
        })
    }
}
