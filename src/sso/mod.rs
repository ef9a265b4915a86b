//! Single-sign-on redirect and callback verification
//!
//! Two operations make up the flow:
//!
//! - [`redirect`]: send the browser to the provider, or synthesize a
//!   stand-in identity when SSO is bypassed.
//! - [`callback`]: verify the provider's signed assertion and hand the
//!   identity to the host's [`AcceptIdentity`] hook.
//!
//! Both read the same immutable [`SsoSettings`].

pub mod callback;
pub mod environment;
pub mod hook;
pub mod identity;
pub mod redirect;
pub mod salt;
pub mod settings;

pub use callback::{complete, decode_body, verify};
pub use environment::Environment;
pub use hook::{hook_fn, AcceptIdentity, HookFn, JsonIdentityHook, RequestContext};
pub use identity::{AuthenticatedUser, CallbackPayload};
pub use redirect::{initiate, redirect_target, Initiation};
pub use salt::{SaltTemplate, EMAIL_PLACEHOLDER};
pub use settings::SsoSettings;
