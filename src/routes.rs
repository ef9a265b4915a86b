//! HTTP routes for the SSO flow
//!
//! - `GET|POST <auth-route>`: redirect to the provider (or bypass).
//! - `POST <callback-route>`: verify a JSON or form-encoded callback body.
//! - `GET <callback-route>`: verify a callback carried in the query string.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, Request, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::config::ServerConfig;
use crate::error::SsoResult;
use crate::sso::{self, AcceptIdentity, CallbackPayload, Initiation, RequestContext, SsoSettings};

/// Shared state for the SSO handlers.
#[derive(Clone)]
pub struct SsoState {
    /// Immutable settings loaded at startup
    pub settings: Arc<SsoSettings>,
    /// Host acceptance hook
    pub hook: Arc<dyn AcceptIdentity>,
}

/// Builds the SSO router on the routes from `server`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use sso_relay::config::{ServerConfig, SsoConfig};
/// use sso_relay::routes::router;
/// use sso_relay::sso::{JsonIdentityHook, SsoSettings};
///
/// let settings = SsoSettings::from_config(&SsoConfig {
///     redirect_url: "https://sso.example.com".to_string(),
///     environment: "staging".to_string(),
///     project_url: "https://app.example.com".to_string(),
///     callback_path: "/auth/sso/callback".to_string(),
///     salt: "s3cr3t-#email-key".to_string(),
///     skip_sso: false,
/// })
/// .unwrap();
///
/// let app: axum::Router = router(Arc::new(settings), &ServerConfig::default(), Arc::new(JsonIdentityHook));
/// # let _ = app;
/// ```
pub fn router(
    settings: Arc<SsoSettings>,
    server: &ServerConfig,
    hook: Arc<dyn AcceptIdentity>,
) -> Router {
    sso_routes(&server.auth_route, &server.callback_route, settings, hook)
}

/// Builds the SSO router on explicit paths, for hosts that merge it into
/// their own router.
pub fn sso_routes(
    auth_route: &str,
    callback_route: &str,
    settings: Arc<SsoSettings>,
    hook: Arc<dyn AcceptIdentity>,
) -> Router {
    let state = SsoState { settings, hook };

    Router::new()
        .route(auth_route, get(auth).post(auth))
        .route(callback_route, get(callback_query).post(callback_body))
        .with_state(state)
}

async fn auth(
    State(state): State<SsoState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> SsoResult<Response> {
    match sso::initiate(&state.settings)? {
        Initiation::Redirect(target) => {
            tracing::info!(
                provider = state.settings.redirect_url.host_str().unwrap_or_default(),
                environment = %state.settings.environment,
                "Redirecting to SSO provider"
            );
            Ok((StatusCode::FOUND, [(LOCATION, target)]).into_response())
        }
        Initiation::Bypass(user) => {
            tracing::warn!(email = %user.email, "SSO bypassed, accepting placeholder identity");
            let ctx = RequestContext::new(method, uri, headers);
            Ok(state.hook.authenticated(user, ctx).await)
        }
    }
}

async fn callback_body(State(state): State<SsoState>, request: Request) -> SsoResult<Response> {
    let ctx = RequestContext::new(
        request.method().clone(),
        request.uri().clone(),
        request.headers().clone(),
    );
    let payload = sso::decode_body(request).await?;
    sso::complete(&state.settings, state.hook.as_ref(), payload, ctx).await
}

async fn callback_query(
    State(state): State<SsoState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    query: Result<Query<CallbackPayload>, QueryRejection>,
) -> SsoResult<Response> {
    let Query(payload) = query?;
    let ctx = RequestContext::new(method, uri, headers);
    sso::complete(&state.settings, state.hook.as_ref(), payload, ctx).await
}
