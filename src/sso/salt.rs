//! Salt template and callback token digests
//!
//! The provider and the application share a single secret, the salt. The
//! salt contains the literal placeholder `#email` exactly once. The token
//! for a given email is the lowercase hex SHA-256 digest of the salt with
//! the placeholder replaced by that email, which binds every token to the
//! identity it asserts.
//!
//! ```text
//! salt   = "s3cr3t-#email-key"
//! email  = "user@test.com"
//! token  = hex(SHA256("s3cr3t-user@test.com-key"))
//! ```

use std::fmt;

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::error::{SsoError, SsoResult};

/// The only placeholder recognized in a salt template.
pub const EMAIL_PLACEHOLDER: &str = "#email";

// ---------------------------------------------------------------------------
// SaltTemplate
// ---------------------------------------------------------------------------

/// A validated salt template.
///
/// Construction fails unless the raw salt contains [`EMAIL_PLACEHOLDER`]
/// exactly once. The secret is never printed; `Debug` is redacted.
///
/// # Examples
///
/// ```
/// use sso_relay::sso::SaltTemplate;
///
/// let salt = SaltTemplate::new("s3cr3t-#email-key").unwrap();
/// let token = salt.issue("user@test.com");
///
/// assert_eq!(token.len(), 64);
/// assert!(salt.verify("user@test.com", &token));
/// assert!(!salt.verify("other@test.com", &token));
///
/// assert!(SaltTemplate::new("no-placeholder").is_err());
/// ```
#[derive(Clone)]
pub struct SaltTemplate {
    raw: String,
}

impl SaltTemplate {
    /// Validates and wraps a raw salt.
    ///
    /// # Errors
    ///
    /// Returns [`SsoError::Config`] when the placeholder is missing or
    /// appears more than once.
    pub fn new(raw: impl Into<String>) -> SsoResult<Self> {
        let raw = raw.into();
        match raw.matches(EMAIL_PLACEHOLDER).count() {
            1 => Ok(Self { raw }),
            0 => Err(SsoError::Config(format!(
                "salt must contain the {EMAIL_PLACEHOLDER} placeholder"
            ))),
            n => Err(SsoError::Config(format!(
                "salt must contain the {EMAIL_PLACEHOLDER} placeholder exactly once, found {n}"
            ))),
        }
    }

    /// Replaces the placeholder with `email`.
    ///
    /// This is a plain case-sensitive string replacement over the template,
    /// so placeholder text inside `email` is never substituted again.
    pub fn substitute(&self, email: &str) -> String {
        self.raw.replace(EMAIL_PLACEHOLDER, email)
    }

    /// Computes the token the provider issues for `email`.
    pub fn issue(&self, email: &str) -> String {
        let digest = Sha256::digest(self.substitute(email).as_bytes());
        hex::encode(digest)
    }

    /// Checks a presented token against the digest for `email`.
    ///
    /// The comparison runs in constant time with respect to the token
    /// contents. Hex case matters: only lowercase tokens match.
    pub fn verify(&self, email: &str, token: &str) -> bool {
        let expected = self.issue(email);
        expected.as_bytes().ct_eq(token.as_bytes()).into()
    }
}

impl fmt::Debug for SaltTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaltTemplate")
            .field("raw", &"<redacted>")
            .finish()
    }
}
