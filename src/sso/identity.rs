//! Callback payloads and verified identities

use std::fmt;

use serde::{Deserialize, Serialize};

/// Email of the identity synthesized when SSO is bypassed.
pub const BYPASS_EMAIL: &str = "autogenerated@like.st";

/// Display name of the identity synthesized when SSO is bypassed.
pub const BYPASS_NAME: &str = "Autogenerated Test User";

/// Untrusted assertion posted back by the provider.
///
/// Every field is attacker-controlled until the token has been checked
/// against the salt digest for `email`.
#[derive(Clone, Deserialize)]
pub struct CallbackPayload {
    /// Hex-encoded digest presented by the provider
    pub token: String,
    /// Claimed email
    pub email: String,
    /// Claimed display name
    pub name: String,
    /// Optional avatar URL
    #[serde(default)]
    pub image: Option<String>,
}

impl fmt::Debug for CallbackPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackPayload")
            .field("token", &"<redacted>")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("image", &self.image)
            .finish()
    }
}

/// Identity handed to the host application once verification succeeds.
///
/// # Examples
///
/// ```
/// use sso_relay::sso::AuthenticatedUser;
///
/// let user = AuthenticatedUser::bypass();
/// assert_eq!(user.email, "autogenerated@like.st");
/// assert!(user.image_url.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Verified email
    pub email: String,
    /// Display name
    pub name: String,
    /// Optional avatar URL
    pub image_url: Option<String>,
}

impl AuthenticatedUser {
    /// The fixed stand-in identity used when SSO is skipped.
    pub fn bypass() -> Self {
        Self {
            email: BYPASS_EMAIL.to_string(),
            name: BYPASS_NAME.to_string(),
            image_url: None,
        }
    }
}

impl From<CallbackPayload> for AuthenticatedUser {
    fn from(payload: CallbackPayload) -> Self {
        Self {
            email: payload.email,
            name: payload.name,
            image_url: payload.image,
        }
    }
}
