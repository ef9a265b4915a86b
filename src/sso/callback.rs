//! Callback verifier
//!
//! Steps, in order:
//!
//! 1. Decode the request into a [`CallbackPayload`]. Nothing else runs if
//!    decoding fails.
//! 2. Recompute the token for the claimed email from the salt template.
//! 3. Compare it with the presented token in constant time.
//! 4. On mismatch answer `401` without building an identity.
//! 5. On match hand the identity to the acceptance hook and return its
//!    response.
//!
//! Verification is stateless. A valid payload can be replayed and will be
//! accepted again; there is no nonce or expiry in this protocol.

use axum::extract::rejection::{FormRejection, JsonRejection, QueryRejection};
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::response::Response;
use axum::{Form, Json};

use crate::error::{SsoError, SsoResult};
use crate::sso::hook::{AcceptIdentity, RequestContext};
use crate::sso::identity::{AuthenticatedUser, CallbackPayload};
use crate::sso::settings::SsoSettings;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

impl From<JsonRejection> for SsoError {
    fn from(rejection: JsonRejection) -> Self {
        SsoError::Decode {
            status: rejection.status(),
            reason: rejection.body_text(),
        }
    }
}

impl From<FormRejection> for SsoError {
    fn from(rejection: FormRejection) -> Self {
        SsoError::Decode {
            status: rejection.status(),
            reason: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for SsoError {
    fn from(rejection: QueryRejection) -> Self {
        SsoError::Decode {
            status: rejection.status(),
            reason: rejection.body_text(),
        }
    }
}

/// Decodes a callback body.
///
/// HTML form bodies are read as `application/x-www-form-urlencoded`;
/// everything else must be JSON.
///
/// # Errors
///
/// Returns [`SsoError::Decode`] carrying `400` for malformed syntax, `415`
/// for a missing or unsupported content type, and `422` for a well-formed
/// body missing required fields.
pub async fn decode_body(request: Request) -> SsoResult<CallbackPayload> {
    let is_form = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_ascii_lowercase().starts_with(FORM_CONTENT_TYPE))
        .unwrap_or(false);

    if is_form {
        let Form(payload) = Form::<CallbackPayload>::from_request(request, &()).await?;
        Ok(payload)
    } else {
        let Json(payload) = Json::<CallbackPayload>::from_request(request, &()).await?;
        Ok(payload)
    }
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Checks the payload token against the salt digest for its email.
///
/// # Errors
///
/// Returns [`SsoError::Unauthorized`] when the token does not match.
///
/// # Examples
///
/// ```
/// use sso_relay::config::SsoConfig;
/// use sso_relay::sso::{verify, CallbackPayload, SsoSettings};
///
/// let settings = SsoSettings::from_config(&SsoConfig {
///     redirect_url: "https://sso.example.com".to_string(),
///     environment: "staging".to_string(),
///     project_url: "https://app.example.com".to_string(),
///     callback_path: "/auth/callback".to_string(),
///     salt: "s3cr3t-#email-key".to_string(),
///     skip_sso: false,
/// })
/// .unwrap();
///
/// let payload = CallbackPayload {
///     token: settings.salt.issue("user@test.com"),
///     email: "user@test.com".to_string(),
///     name: "Test User".to_string(),
///     image: None,
/// };
///
/// let user = verify(&settings, payload).unwrap();
/// assert_eq!(user.email, "user@test.com");
/// ```
pub fn verify(settings: &SsoSettings, payload: CallbackPayload) -> SsoResult<AuthenticatedUser> {
    if !settings.salt.verify(&payload.email, &payload.token) {
        tracing::warn!(email = %payload.email, "SSO callback token mismatch");
        return Err(SsoError::Unauthorized);
    }

    tracing::info!(email = %payload.email, "SSO callback verified");
    Ok(AuthenticatedUser::from(payload))
}

/// Verifies a decoded payload and, on success, runs the acceptance hook.
///
/// # Errors
///
/// Returns [`SsoError::Unauthorized`] on token mismatch; the hook is not
/// called in that case.
pub async fn complete(
    settings: &SsoSettings,
    hook: &dyn AcceptIdentity,
    payload: CallbackPayload,
    ctx: RequestContext,
) -> SsoResult<Response> {
    let user = verify(settings, payload)?;
    Ok(hook.authenticated(user, ctx).await)
}
