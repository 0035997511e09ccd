use super::*;
use crate::net::auth::AuthUser;

fn session() -> Session {
    Session {
        access_token: "at".to_owned(),
        refresh_token: "rt".to_owned(),
        expires_in: Some(3600),
        expires_at: Some(10_000),
        user: AuthUser { id: "u1".to_owned(), email: Some("a@b.c".to_owned()), user_metadata: serde_json::json!({}) },
    }
}

#[test]
fn memory_store_round_trips_and_clears() {
    let store = MemorySessionStore::default();
    assert_eq!(store.load(), None);
    store.save(&session());
    assert_eq!(store.load(), Some(session()));
    store.clear();
    assert_eq!(store.load(), None);
}

#[test]
fn decode_session_discards_garbage() {
    assert_eq!(decode_session("{not json"), None);
    let raw = serde_json::to_string(&session()).expect("encode");
    assert_eq!(decode_session(&raw), Some(session()));
}
