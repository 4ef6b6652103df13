//! End-to-end tests of the authorization code flow against a stubbed provider

mod common;

use chrono::Duration;
use common::{CLIENT_ID, callback_url, config, id_token, init_tracing, make_token, service};
use fitcoach_session::env::Storage;
use fitcoach_session::{AuthService, Headless, MemoryEnvironment, User};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_BASE: &str = "https://api.example.com";

fn user_u1() -> User {
    User {
        id: "u1".into(),
        email: "a@b.com".into(),
        name: "A".into(),
    }
}

async fn mount_token_endpoint(server: &MockServer, id_token: &str) {
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains(&format!("client_id={CLIENT_ID}")))
        .and(body_string_contains("code=X"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id_token": id_token,
            "access_token": "access-1",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_login_then_callback_signs_in() {
    init_tracing();
    let server = MockServer::start().await;
    let token = id_token("u1", "a@b.com", "A", Duration::hours(1));
    mount_token_endpoint(&server, &token).await;

    let env = Rc::new(MemoryEnvironment::new());
    let auth = service(&env, config(&server.uri(), API_BASE));

    let emissions: Rc<RefCell<Vec<Option<User>>>> = Rc::default();
    let sink = Rc::clone(&emissions);
    let _subscription = auth.subscribe(move |user| sink.borrow_mut().push(user.clone()));

    auth.login();
    let navigations = env.navigations();
    assert_eq!(navigations.len(), 1);
    let authorize = &navigations[0];
    assert_eq!(authorize.path(), "/oauth2/authorize");
    assert!(
        authorize
            .query_pairs()
            .any(|(k, v)| k == "scope" && v == "email openid profile")
    );

    // Provider sends the user agent back with a code
    env.set_url(callback_url("code=X&state=ignored"));
    auth.handle_callback().await;

    assert_eq!(auth.id_token().as_deref(), Some(token.as_str()));
    assert_eq!(auth.access_token().as_deref(), Some("access-1"));
    assert_eq!(auth.user(), Some(user_u1()));
    assert!(auth.is_logged_in());
    assert_eq!(*emissions.borrow(), vec![None, Some(user_u1())]);

    // Query string removed without a navigation
    assert_eq!(
        env.current_url().unwrap().as_str(),
        "https://app.example.com/callback"
    );
    assert_eq!(env.navigations().len(), 1);
    assert!(env.store().get_item("user_info").is_some());
}

#[tokio::test]
async fn test_late_subscriber_sees_current_user() {
    let server = MockServer::start().await;
    let token = id_token("u1", "a@b.com", "A", Duration::hours(1));
    mount_token_endpoint(&server, &token).await;

    let env = Rc::new(MemoryEnvironment::with_url(callback_url("code=X")));
    let auth = service(&env, config(&server.uri(), API_BASE));
    auth.handle_callback().await;

    let seen = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&seen);
    let _subscription = auth.subscribe(move |user| *sink.borrow_mut() = Some(user.clone()));

    assert_eq!(*seen.borrow(), Some(Some(user_u1())));
}

#[tokio::test]
async fn test_callback_without_code_does_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let env = Rc::new(MemoryEnvironment::with_url(callback_url("state=abc")));
    let auth = service(&env, config(&server.uri(), API_BASE));

    auth.handle_callback().await;

    assert!(env.navigations().is_empty());
    assert!(auth.user().is_none());
    assert_eq!(
        env.current_url().unwrap().as_str(),
        "https://app.example.com/callback?state=abc"
    );
}

#[tokio::test]
async fn test_empty_code_keeps_existing_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let env = Rc::new(MemoryEnvironment::with_url(callback_url("code=")));
    env.store()
        .set_item("id_token", &id_token("u1", "a@b.com", "A", Duration::hours(1)));
    env.store()
        .set_item("user_info", r#"{"id":"u1","email":"a@b.com","name":"A"}"#);
    let auth = service(&env, config(&server.uri(), API_BASE));

    auth.handle_callback().await;

    assert!(auth.is_logged_in());
    assert_eq!(auth.user(), Some(user_u1()));
    assert!(env.navigations().is_empty());
}

#[tokio::test]
async fn test_provider_error_forces_logout() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "invalid_grant" })))
        .mount(&server)
        .await;

    let env = Rc::new(MemoryEnvironment::with_url(callback_url("code=X")));
    // Leftovers from a previous session must not survive a failed callback
    env.store().set_item("id_token", &id_token("old", "o@b.com", "O", Duration::hours(1)));
    env.store().set_item("user_info", r#"{"id":"old","email":"o@b.com","name":"O"}"#);

    let auth = service(&env, config(&server.uri(), API_BASE));
    assert_eq!(auth.user().map(|u| u.id), Some("old".to_string()));

    auth.handle_callback().await;

    assert!(env.store().is_empty());
    assert!(auth.user().is_none());
    assert!(!auth.is_logged_in());
    let navigations = env.navigations();
    assert_eq!(navigations.len(), 1);
    assert_eq!(navigations[0], auth.endpoints().logout);
}

#[tokio::test]
async fn test_malformed_id_token_forces_logout() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, "not-a-jwt").await;

    let env = Rc::new(MemoryEnvironment::with_url(callback_url("code=X")));
    let auth = service(&env, config(&server.uri(), API_BASE));

    auth.handle_callback().await;

    assert!(auth.id_token().is_none());
    assert!(auth.access_token().is_none());
    assert!(auth.user().is_none());
    assert_eq!(env.navigations(), vec![auth.endpoints().logout.clone()]);
}

#[tokio::test]
async fn test_unreachable_provider_forces_logout() {
    let env = Rc::new(MemoryEnvironment::with_url(callback_url("code=X")));
    // Nothing listens on the discard port
    let auth = service(&env, config("http://127.0.0.1:9", API_BASE));

    auth.handle_callback().await;

    assert!(!auth.is_logged_in());
    assert_eq!(env.navigations(), vec![auth.endpoints().logout.clone()]);
}

#[test]
fn test_logout_twice_is_idempotent() {
    let env = Rc::new(MemoryEnvironment::new());
    env.store().set_item("id_token", &id_token("u1", "a@b.com", "A", Duration::hours(1)));
    env.store().set_item("access_token", "access-1");
    env.store().set_item("user_info", r#"{"id":"u1","email":"a@b.com","name":"A"}"#);

    let auth = service(&env, config("auth.example.com", API_BASE));
    assert!(auth.is_logged_in());

    auth.logout();
    assert!(env.store().is_empty());
    assert!(auth.user().is_none());

    auth.logout();
    assert!(env.store().is_empty());

    let expected = "https://auth.example.com/logout?client_id=client-123\
                    &logout_uri=https%3A%2F%2Fapp.example.com";
    let navigations = env.navigations();
    assert_eq!(navigations.len(), 2);
    assert!(navigations.iter().all(|url| url.as_str() == expected));
}

#[test]
fn test_restores_cached_user_on_construction() {
    let env = Rc::new(MemoryEnvironment::new());
    env.store().set_item("user_info", r#"{"id":"u1","email":"a@b.com","name":"A"}"#);
    env.store().set_item("id_token", &id_token("u1", "a@b.com", "A", Duration::hours(1)));

    let auth = service(&env, config("auth.example.com", API_BASE));

    assert_eq!(auth.user(), Some(user_u1()));
    assert!(auth.is_logged_in());
}

#[test]
fn test_token_without_cached_profile_is_tolerated() {
    let env = Rc::new(MemoryEnvironment::new());
    env.store().set_item("id_token", &id_token("u1", "a@b.com", "A", Duration::hours(1)));

    let auth = service(&env, config("auth.example.com", API_BASE));

    assert!(auth.user().is_none());
    assert!(auth.is_logged_in());
}

#[test]
fn test_expiry_is_recomputed_each_call() {
    let env = Rc::new(MemoryEnvironment::new());
    env.store().set_item("id_token", &id_token("u1", "a@b.com", "A", Duration::hours(1)));
    env.store().set_item("user_info", r#"{"id":"u1","email":"a@b.com","name":"A"}"#);
    let auth = service(&env, config("auth.example.com", API_BASE));

    assert!(auth.is_logged_in());

    env.set_now(Some(chrono::Utc::now() + Duration::hours(2)));
    assert!(!auth.is_logged_in());
    // The profile cache still names the previous user
    assert_eq!(auth.user(), Some(user_u1()));
}

#[test]
fn test_expired_and_garbage_tokens_are_not_logged_in() {
    let env = Rc::new(MemoryEnvironment::new());
    let auth = service(&env, config("auth.example.com", API_BASE));
    assert!(!auth.is_logged_in());

    for offset in [Duration::seconds(-1), Duration::hours(-1), Duration::days(-30)] {
        env.store().set_item("id_token", &id_token("u1", "a@b.com", "A", offset));
        assert!(!auth.is_logged_in());
    }

    env.store().set_item("id_token", &make_token(&json!({ "sub": "u1" })));
    assert!(!auth.is_logged_in());

    env.store().set_item("id_token", "garbage");
    assert!(!auth.is_logged_in());
}

#[tokio::test]
async fn test_headless_service_is_inert() {
    let auth = AuthService::new(config("auth.example.com", API_BASE), Rc::new(Headless)).unwrap();

    auth.login();
    auth.handle_callback().await;
    auth.logout();

    assert!(auth.id_token().is_none());
    assert!(auth.access_token().is_none());
    assert!(auth.user().is_none());
    assert!(!auth.is_logged_in());
}
