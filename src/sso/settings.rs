//! Validated, immutable SSO settings
//!
//! [`SsoSettings`] is built once from the raw [`SsoConfig`] at startup and
//! shared read-only (behind an `Arc`) by every request.

use url::Url;

use crate::config::SsoConfig;
use crate::error::{SsoError, SsoResult};
use crate::sso::environment::Environment;
use crate::sso::salt::SaltTemplate;

/// Settings consumed by the redirect initiator and the callback verifier.
#[derive(Debug, Clone)]
pub struct SsoSettings {
    /// Base URL of the provider's login endpoint
    pub redirect_url: Url,
    /// Environment appended to the provider URL
    pub environment: Environment,
    /// Base URL of this application
    pub project_url: Url,
    /// Path appended to `project_url` to form the callback endpoint
    pub callback_path: String,
    /// Shared secret template
    pub salt: SaltTemplate,
    /// Skip the provider and synthesize a stand-in identity
    pub skip_sso: bool,
}

impl SsoSettings {
    /// Validates a raw configuration section.
    ///
    /// # Errors
    ///
    /// Returns [`SsoError::Config`] if a URL is not absolute http(s), the
    /// callback path does not start with `/`, the environment name is not a
    /// single path segment, or the salt placeholder is not present exactly
    /// once.
    ///
    /// # Examples
    ///
    /// ```
    /// use sso_relay::config::SsoConfig;
    /// use sso_relay::sso::SsoSettings;
    ///
    /// let raw = SsoConfig {
    ///     redirect_url: "https://sso.example.com".to_string(),
    ///     environment: "staging".to_string(),
    ///     project_url: "https://app.example.com".to_string(),
    ///     callback_path: "/auth/callback".to_string(),
    ///     salt: "s3cr3t-#email-key".to_string(),
    ///     skip_sso: false,
    /// };
    ///
    /// let settings = SsoSettings::from_config(&raw).unwrap();
    /// assert_eq!(settings.callback_url(), "https://app.example.com/auth/callback");
    /// ```
    pub fn from_config(raw: &SsoConfig) -> SsoResult<Self> {
        let redirect_url = parse_http_url("redirect_url", &raw.redirect_url)?;
        let project_url = parse_http_url("project_url", &raw.project_url)?;

        if !raw.callback_path.starts_with('/') {
            return Err(SsoError::Config(format!(
                "callback_path must start with '/': {}",
                raw.callback_path
            )));
        }

        let environment: Environment = raw.environment.parse()?;
        let salt = SaltTemplate::new(raw.salt.clone())?;

        if raw.skip_sso {
            if environment.is_production() {
                tracing::warn!("SSO bypass is enabled in the production environment");
            } else {
                tracing::warn!(%environment, "SSO bypass is enabled");
            }
        }

        Ok(Self {
            redirect_url,
            environment,
            project_url,
            callback_path: raw.callback_path.clone(),
            salt,
            skip_sso: raw.skip_sso,
        })
    }

    /// Full URL the provider redirects back to.
    pub fn callback_url(&self) -> String {
        format!(
            "{}{}",
            self.project_url.as_str().trim_end_matches('/'),
            self.callback_path
        )
    }
}

fn parse_http_url(field: &str, value: &str) -> SsoResult<Url> {
    if value.trim().is_empty() {
        return Err(SsoError::Config(format!("{field} cannot be empty")));
    }

    let url = Url::parse(value.trim())
        .map_err(|e| SsoError::Config(format!("{field} is not a valid URL: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(SsoError::Config(format!(
            "{field} must be an absolute http(s) URL: {value}"
        )));
    }

    Ok(url)
}
