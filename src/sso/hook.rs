//! Host application acceptance hook
//!
//! Once an identity is verified (or synthesized in bypass mode) it is handed
//! to an [`AcceptIdentity`] implementation supplied by the host. The host
//! decides what happens next: create a session, look up or provision the
//! user, and build the final response. Whatever response the hook returns is
//! passed through unchanged.

use std::future::Future;

use async_trait::async_trait;
use axum::http::{HeaderMap, Method, Uri};
use axum::response::{IntoResponse, Json, Response};

use crate::sso::identity::AuthenticatedUser;

/// Request data available to the acceptance hook.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// HTTP method of the triggering request
    pub method: Method,
    /// Request URI
    pub uri: Uri,
    /// Request headers (cookies included)
    pub headers: HeaderMap,
}

impl RequestContext {
    /// Creates a context from request parts.
    pub fn new(method: Method, uri: Uri, headers: HeaderMap) -> Self {
        Self {
            method,
            uri,
            headers,
        }
    }
}

/// Extension point implemented by the host application.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use axum::response::{IntoResponse, Redirect, Response};
/// use sso_relay::sso::{AcceptIdentity, AuthenticatedUser, RequestContext};
///
/// struct Dashboard;
///
/// #[async_trait]
/// impl AcceptIdentity for Dashboard {
///     async fn authenticated(&self, _user: AuthenticatedUser, _ctx: RequestContext) -> Response {
///         Redirect::to("/dashboard").into_response()
///     }
/// }
/// ```
#[async_trait]
pub trait AcceptIdentity: Send + Sync {
    /// Produces the response for a verified identity.
    async fn authenticated(&self, user: AuthenticatedUser, ctx: RequestContext) -> Response;
}

/// Adapts an async closure into an [`AcceptIdentity`].
///
/// Built with [`hook_fn`].
#[derive(Clone)]
pub struct HookFn<F> {
    f: F,
}

/// Wraps an async function as an acceptance hook.
///
/// # Examples
///
/// ```
/// use axum::http::StatusCode;
/// use axum::response::IntoResponse;
/// use sso_relay::sso::{hook_fn, AuthenticatedUser, RequestContext};
///
/// let hook = hook_fn(|user: AuthenticatedUser, _ctx: RequestContext| async move {
///     (StatusCode::OK, user.email).into_response()
/// });
/// # let _ = hook;
/// ```
pub fn hook_fn<F, Fut>(f: F) -> HookFn<F>
where
    F: Fn(AuthenticatedUser, RequestContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    HookFn { f }
}

#[async_trait]
impl<F, Fut> AcceptIdentity for HookFn<F>
where
    F: Fn(AuthenticatedUser, RequestContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    async fn authenticated(&self, user: AuthenticatedUser, ctx: RequestContext) -> Response {
        (self.f)(user, ctx).await
    }
}

/// Hook that answers `200 OK` with the identity as JSON.
///
/// Used by `sso-relay serve` so the flow can be exercised end to end
/// without a host application.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonIdentityHook;

#[async_trait]
impl AcceptIdentity for JsonIdentityHook {
    async fn authenticated(&self, user: AuthenticatedUser, _ctx: RequestContext) -> Response {
        Json(user).into_response()
    }
}
