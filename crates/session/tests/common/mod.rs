//! Shared fixtures for session integration tests

#![allow(dead_code)]

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{Duration, Utc};
use fitcoach_session::{AuthConfig, AuthService, MemoryEnvironment};
use serde_json::{Value as JsonValue, json};
use std::rc::Rc;
use url::Url;

pub const CLIENT_ID: &str = "client-123";
pub const REDIRECT_URI: &str = "https://app.example.com/callback";

/// Compact JWT with the given payload and a dummy signature
pub fn make_token(payload: &JsonValue) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{body}.c2lnbmF0dXJl")
}

pub fn id_token(sub: &str, email: &str, name: &str, expires_in: Duration) -> String {
    make_token(&json!({
        "sub": sub,
        "email": email,
        "name": name,
        "exp": (Utc::now() + expires_in).timestamp(),
    }))
}

pub fn config(provider: &str, api_base: &str) -> AuthConfig {
    AuthConfig::new(provider, CLIENT_ID, REDIRECT_URI, api_base)
}

pub fn callback_url(query: &str) -> Url {
    Url::parse(&format!("{REDIRECT_URI}?{query}")).unwrap()
}

pub fn service(env: &Rc<MemoryEnvironment>, config: AuthConfig) -> Rc<AuthService> {
    Rc::new(AuthService::new(config, env.clone()).unwrap())
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("fitcoach_session=debug")
        .try_init();
}
