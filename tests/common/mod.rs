#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::{IntoResponse, Json, Response};
use axum::Router;
use tempfile::TempDir;

use sso_relay::config::{ServerConfig, SsoConfig};
use sso_relay::routes;
use sso_relay::sso::{AcceptIdentity, AuthenticatedUser, RequestContext, SsoSettings};

pub const SALT: &str = "s3cr3t-#email-key";

/// SHA-256 of `s3cr3t-user@test.com-key`.
pub const USER_TOKEN: &str = "1be3d2f4229d04fc15034768f447a29df4ef1a3ab25f75db82ee3cd13ae94857";

/// Hook stub that records every identity it is given.
#[derive(Clone, Default)]
pub struct RecordingHook {
    calls: Arc<Mutex<Vec<AuthenticatedUser>>>,
}

impl RecordingHook {
    pub fn calls(&self) -> Vec<AuthenticatedUser> {
        self.calls.lock().expect("hook mutex poisoned").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("hook mutex poisoned").len()
    }
}

#[async_trait]
impl AcceptIdentity for RecordingHook {
    async fn authenticated(&self, user: AuthenticatedUser, _ctx: RequestContext) -> Response {
        self.calls
            .lock()
            .expect("hook mutex poisoned")
            .push(user.clone());
        Json(user).into_response()
    }
}

pub fn sso_config(skip_sso: bool) -> SsoConfig {
    SsoConfig {
        redirect_url: "https://sso.example.com".to_string(),
        environment: "staging".to_string(),
        project_url: "https://app.example.com".to_string(),
        callback_path: "/auth/sso/callback".to_string(),
        salt: SALT.to_string(),
        skip_sso,
    }
}

/// Router on the default routes plus the hook it reports to.
pub fn test_app(skip_sso: bool) -> (Router, RecordingHook) {
    let settings = SsoSettings::from_config(&sso_config(skip_sso)).expect("valid settings");
    let hook = RecordingHook::default();
    let app = routes::router(
        Arc::new(settings),
        &ServerConfig::default(),
        Arc::new(hook.clone()),
    );
    (app, hook)
}

pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}
