/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

- `serve`   — Run the SSO routes over HTTP
- `inspect` — Validate configuration, issue tokens, print the redirect URL

These handlers are intentionally small and use the library components:
configuration, settings, and the router.
*/

pub mod inspect;
pub mod serve;
