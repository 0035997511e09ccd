use super::*;
use crate::net::session_store::MemorySessionStore;
use crate::net::transport_mock::MockTransport;
use futures::executor::block_on;
use serde_json::json;
use std::sync::Mutex;

fn config() -> SupabaseConfig {
    SupabaseConfig::new("https://proj.supabase.co", "anon")
}

fn fixed_clock() -> i64 {
    1_000
}

fn session_json(token: &str, expires_at: i64) -> serde_json::Value {
    json!({
        "access_token": token,
        "token_type": "bearer",
        "expires_in": 3600,
        "expires_at": expires_at,
        "refresh_token": format!("{token}-refresh"),
        "user": { "id": "u1", "email": "a@b.c", "user_metadata": { "full_name": "Ann" } }
    })
}

fn stored_session(expires_at: i64) -> Session {
    serde_json::from_value(session_json("old", expires_at)).expect("session")
}

fn auth_with(transport: &Arc<MockTransport>, store: MemorySessionStore) -> SupabaseAuth {
    SupabaseAuth::new(config(), transport.clone(), Arc::new(store)).with_clock(fixed_clock)
}

fn record_events(auth: &SupabaseAuth) -> (Arc<Mutex<Vec<AuthEvent>>>, Subscription) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    let sub = auth.subscribe(Arc::new(move |event: AuthEvent, _session: Option<Session>| {
        sink.lock().unwrap().push(event);
    }));
    (events, sub)
}

fn credentials() -> Credentials {
    Credentials { email: "a@b.c".to_owned(), password: "secret".to_owned() }
}

// =============================================================================
// sign in / sign up
// =============================================================================

#[test]
fn sign_in_posts_password_grant_and_stores_session() {
    let transport = MockTransport::new();
    transport.respond(200, session_json("new", 5_000));
    let auth = auth_with(&transport, MemorySessionStore::default());
    let (events, _sub) = record_events(&auth);

    let session = block_on(auth.sign_in(&credentials())).expect("sign in");

    let req = transport.last_request();
    assert_eq!(req.method, Method::Post);
    assert_eq!(req.url, "https://proj.supabase.co/auth/v1/token?grant_type=password");
    assert_eq!(req.header_value("apikey"), Some("anon"));
    assert_eq!(req.body, Some(json!({ "email": "a@b.c", "password": "secret" })));
    assert_eq!(session.access_token, "new");
    assert_eq!(auth.access_token().as_deref(), Some("new"));
    assert_eq!(*events.lock().unwrap(), vec![AuthEvent::SignedIn]);
}

#[test]
fn sign_in_failure_surfaces_backend_message() {
    let transport = MockTransport::new();
    transport.respond(400, json!({ "error": "invalid_grant", "error_description": "Invalid login credentials" }));
    let auth = auth_with(&transport, MemorySessionStore::default());
    let (events, _sub) = record_events(&auth);

    let err = block_on(auth.sign_in(&credentials())).unwrap_err();

    assert_eq!(err.to_string(), "Invalid login credentials");
    assert!(auth.current_session().is_none());
    assert!(events.lock().unwrap().is_empty());
}

#[test]
fn unconfigured_backend_fails_without_sending() {
    let transport = MockTransport::new();
    let auth = SupabaseAuth::new(SupabaseConfig::default(), transport.clone(), Arc::new(MemorySessionStore::default()));
    assert_eq!(block_on(auth.sign_in(&credentials())), Err(BackendError::NotConfigured));
    assert!(transport.requests().is_empty());
}

#[test]
fn sign_up_sends_profile_metadata_and_waits_for_confirmation() {
    let transport = MockTransport::new();
    transport.respond(200, json!({ "id": "u2", "email": "new@b.c" }));
    let auth = auth_with(&transport, MemorySessionStore::default());
    let registration = Registration {
        email: "new@b.c".to_owned(),
        password: "abcdef".to_owned(),
        full_name: "New User".to_owned(),
        phone: Some("555".to_owned()),
    };

    let session = block_on(auth.sign_up(&registration)).expect("sign up");

    assert_eq!(session, None);
    let body = transport.last_request().body.expect("body");
    assert_eq!(body["data"], json!({ "full_name": "New User", "phone": "555" }));
    assert!(auth.current_session().is_none());
}

#[test]
fn sign_up_with_autoconfirm_signs_in() {
    let transport = MockTransport::new();
    transport.respond(200, session_json("fresh", 5_000));
    let auth = auth_with(&transport, MemorySessionStore::default());
    let (events, _sub) = record_events(&auth);
    let registration = Registration {
        email: "a@b.c".to_owned(),
        password: "abcdef".to_owned(),
        full_name: "Ann".to_owned(),
        phone: None,
    };

    let session = block_on(auth.sign_up(&registration)).expect("sign up");

    assert!(session.is_some());
    assert_eq!(*events.lock().unwrap(), vec![AuthEvent::SignedIn]);
}

// =============================================================================
// sign out / password
// =============================================================================

#[test]
fn sign_out_clears_session_even_when_request_fails() {
    let transport = MockTransport::new();
    transport.fail(BackendError::Network("offline".to_owned()));
    let auth = auth_with(&transport, MemorySessionStore::with_session(stored_session(5_000)));
    let (events, _sub) = record_events(&auth);

    let result = block_on(auth.sign_out());

    assert_eq!(result, Err(BackendError::Network("offline".to_owned())));
    assert!(auth.current_session().is_none());
    assert_eq!(*events.lock().unwrap(), vec![AuthEvent::SignedOut]);
    assert_eq!(transport.last_request().header_value("Authorization"), Some("Bearer old"));
}

#[test]
fn sign_out_without_session_skips_request() {
    let transport = MockTransport::new();
    let auth = auth_with(&transport, MemorySessionStore::default());
    let (events, _sub) = record_events(&auth);

    assert_eq!(block_on(auth.sign_out()), Ok(()));
    assert!(transport.requests().is_empty());
    assert_eq!(*events.lock().unwrap(), vec![AuthEvent::SignedOut]);
}

#[test]
fn reset_password_posts_recover() {
    let transport = MockTransport::new();
    transport.respond(200, json!({}));
    let auth = auth_with(&transport, MemorySessionStore::default());

    block_on(auth.reset_password("a@b.c")).expect("reset");

    let req = transport.last_request();
    assert_eq!(req.url, "https://proj.supabase.co/auth/v1/recover");
    assert_eq!(req.body, Some(json!({ "email": "a@b.c" })));
}

#[test]
fn update_password_requires_session() {
    let transport = MockTransport::new();
    let auth = auth_with(&transport, MemorySessionStore::default());
    assert_eq!(block_on(auth.update_password("newpass")), Err(BackendError::Unauthenticated));
}

#[test]
fn update_password_puts_user_and_emits_user_updated() {
    let transport = MockTransport::new();
    transport.respond(200, json!({ "id": "u1", "email": "a@b.c", "user_metadata": {} }));
    let auth = auth_with(&transport, MemorySessionStore::with_session(stored_session(5_000)));
    let (events, _sub) = record_events(&auth);

    block_on(auth.update_password("newpass")).expect("update");

    let req = transport.last_request();
    assert_eq!(req.method, Method::Put);
    assert_eq!(req.url, "https://proj.supabase.co/auth/v1/user");
    assert_eq!(*events.lock().unwrap(), vec![AuthEvent::UserUpdated]);
}

// =============================================================================
// get_session
// =============================================================================

#[test]
fn get_session_returns_none_without_stored_session() {
    let transport = MockTransport::new();
    let auth = auth_with(&transport, MemorySessionStore::default());
    assert_eq!(block_on(auth.get_session()), Ok(None));
    assert!(transport.requests().is_empty());
}

#[test]
fn get_session_returns_fresh_session_without_refresh() {
    let transport = MockTransport::new();
    let auth = auth_with(&transport, MemorySessionStore::with_session(stored_session(5_000)));
    let session = block_on(auth.get_session()).expect("session").expect("some");
    assert_eq!(session.access_token, "old");
    assert!(transport.requests().is_empty());
}

#[test]
fn get_session_refreshes_expired_session() {
    let transport = MockTransport::new();
    transport.respond(200, session_json("renewed", 9_000));
    let auth = auth_with(&transport, MemorySessionStore::with_session(stored_session(500)));
    let (events, _sub) = record_events(&auth);

    let session = block_on(auth.get_session()).expect("session").expect("some");

    assert_eq!(session.access_token, "renewed");
    let req = transport.last_request();
    assert_eq!(req.url, "https://proj.supabase.co/auth/v1/token?grant_type=refresh_token");
    assert_eq!(req.body, Some(json!({ "refresh_token": "old-refresh" })));
    assert_eq!(*events.lock().unwrap(), vec![AuthEvent::TokenRefreshed]);
}

#[test]
fn failed_refresh_clears_session_and_errors() {
    let transport = MockTransport::new();
    transport.respond(400, json!({ "error_description": "Invalid Refresh Token" }));
    let auth = auth_with(&transport, MemorySessionStore::with_session(stored_session(500)));

    let err = block_on(auth.get_session()).unwrap_err();

    assert_eq!(err.to_string(), "Invalid Refresh Token");
    assert!(auth.current_session().is_none());
}
