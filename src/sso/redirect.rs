//! Redirect initiator
//!
//! Builds the provider login URL:
//!
//! ```text
//! {redirect_url}/{environment}?redirect_url={project_url}{callback_path}
//! ```
//!
//! In bypass mode no URL is built; the fixed stand-in identity is returned
//! instead and the caller passes it straight to the acceptance hook.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::error::{SsoError, SsoResult};
use crate::sso::identity::AuthenticatedUser;
use crate::sso::settings::SsoSettings;

/// Characters escaped in a query value.
///
/// RFC 3986 allows `:` `/` `?` `@` and most sub-delims inside a query, so
/// they stay readable. `&` `=` `+` `#` and `%` would change how the value
/// is parsed and are always escaped. `'` is escaped to match what
/// `Url::set_query` does for special schemes.
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'\'')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Query parameter carrying the callback URL.
pub const REDIRECT_QUERY_PARAM: &str = "redirect_url";

/// Outcome of the auth step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Initiation {
    /// Send the browser to the provider
    Redirect(String),
    /// SSO is bypassed; accept this identity directly
    Bypass(AuthenticatedUser),
}

/// Decides between redirecting to the provider and bypassing it.
///
/// # Errors
///
/// Returns [`SsoError::Config`] if the redirect URL cannot be built.
///
/// # Examples
///
/// ```
/// use sso_relay::config::SsoConfig;
/// use sso_relay::sso::{initiate, Initiation, SsoSettings};
///
/// let mut raw = SsoConfig {
///     redirect_url: "https://sso.example.com".to_string(),
///     environment: "staging".to_string(),
///     project_url: "https://app.example.com".to_string(),
///     callback_path: "/auth/callback".to_string(),
///     salt: "s3cr3t-#email-key".to_string(),
///     skip_sso: false,
/// };
///
/// let settings = SsoSettings::from_config(&raw).unwrap();
/// assert_eq!(
///     initiate(&settings).unwrap(),
///     Initiation::Redirect(
///         "https://sso.example.com/staging?redirect_url=https://app.example.com/auth/callback"
///             .to_string()
///     )
/// );
///
/// raw.skip_sso = true;
/// let settings = SsoSettings::from_config(&raw).unwrap();
/// assert!(matches!(initiate(&settings).unwrap(), Initiation::Bypass(_)));
/// ```
pub fn initiate(settings: &SsoSettings) -> SsoResult<Initiation> {
    if settings.skip_sso {
        return Ok(Initiation::Bypass(AuthenticatedUser::bypass()));
    }

    redirect_target(settings).map(Initiation::Redirect)
}

/// Builds the provider login URL regardless of the bypass flag.
///
/// # Errors
///
/// Returns [`SsoError::Config`] if `redirect_url` cannot carry path
/// segments.
pub fn redirect_target(settings: &SsoSettings) -> SsoResult<String> {
    let mut url = settings.redirect_url.clone();

    url.path_segments_mut()
        .map_err(|_| {
            SsoError::Config(format!(
                "redirect_url cannot be used as a base: {}",
                settings.redirect_url
            ))
        })?
        .pop_if_empty()
        .push(settings.environment.name());

    let callback = settings.callback_url();
    let value = utf8_percent_encode(&callback, QUERY_VALUE);
    url.set_query(Some(&format!("{REDIRECT_QUERY_PARAM}={value}")));

    Ok(url.to_string())
}
