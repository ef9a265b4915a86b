//! Configuration inspection commands: `check`, `token`, `redirect-url`

use colored::Colorize;

use crate::config::Config;
use crate::error::Result;
use crate::sso;

/// Validate configuration and print a summary (salt never shown)
pub fn check(config: &Config) -> Result<()> {
    let settings = config.sso_settings()?;

    println!("{}", "Configuration is valid".green().bold());
    println!("  redirect_url:   {}", settings.redirect_url);
    println!("  environment:    {}", settings.environment);
    println!("  callback_url:   {}", settings.callback_url());
    println!("  salt:           {}", "<redacted>".dimmed());
    if settings.skip_sso {
        println!("  skip_sso:       {}", "true (bypass enabled)".yellow());
    } else {
        println!("  skip_sso:       false");
    }
    println!("  bind_address:   {}", config.server.bind_address);
    println!("  auth_route:     {}", config.server.auth_route);
    println!("  callback_route: {}", config.server.callback_route);

    Ok(())
}

/// Print the token the provider issues for `email`
pub fn token(config: &Config, email: &str) -> Result<()> {
    let settings = config.sso_settings()?;
    println!("{}", settings.salt.issue(email));
    Ok(())
}

/// Print the provider redirect URL
pub fn redirect_url(config: &Config) -> Result<()> {
    let settings = config.sso_settings()?;
    if settings.skip_sso {
        tracing::warn!("skip_sso is enabled; the auth route will not redirect");
    }
    println!("{}", sso::redirect_target(&settings)?);
    Ok(())
}
