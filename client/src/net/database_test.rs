use super::*;
use crate::net::auth::{AuthUser, Session};
use crate::net::session_store::MemorySessionStore;
use crate::net::transport_mock::MockTransport;
use futures::executor::block_on;
use records::PaymentFrequency;
use time::macros::date;

fn config() -> SupabaseConfig {
    SupabaseConfig::new("https://proj.supabase.co", "anon")
}

fn signed_in_db(transport: &Arc<MockTransport>) -> Database {
    let session = Session {
        access_token: "user-token".to_owned(),
        refresh_token: "rt".to_owned(),
        expires_in: None,
        expires_at: None,
        user: AuthUser { id: "u1".to_owned(), email: None, user_metadata: serde_json::Value::Null },
    };
    let auth = SupabaseAuth::new(config(), transport.clone(), Arc::new(MemorySessionStore::with_session(session)));
    Database::new(config(), transport.clone(), auth)
}

fn lease_json(id: &str, room_id: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id, "client_id": "c1", "room_id": room_id, "tenant_id": "t1",
        "lease_number": null, "start_date": "2025-01-01", "end_date": "2025-12-31",
        "rent_amount": 1000, "deposit_amount": null, "payment_due_day": 1,
        "payment_frequency": "monthly", "status": status, "notes": null
    })
}

fn new_lease() -> NewLease {
    NewLease {
        client_id: "c1".to_owned(),
        room_id: "r1".to_owned(),
        tenant_id: Some("t1".to_owned()),
        lease_number: None,
        start_date: "2025-01-01".to_owned(),
        end_date: "2025-12-31".to_owned(),
        rent_amount: 1000.0,
        deposit_amount: None,
        payment_due_day: 1,
        payment_frequency: PaymentFrequency::Monthly,
        status: LeaseStatus::Draft,
        notes: None,
    }
}

// =============================================================================
// RestQuery
// =============================================================================

#[test]
fn rest_query_renders_filters_in_order() {
    let query = RestQuery::select("*").eq("client_id", "c1").order("name", true);
    assert_eq!(query.to_query_string(), "select=%2A&client_id=eq.c1&order=name.asc");
}

#[test]
fn rest_query_encodes_values() {
    let query = RestQuery::new().eq("name", "A&B Court");
    assert_eq!(query.to_query_string(), "name=eq.A%26B%20Court");
}

#[test]
fn rest_query_empty_is_empty() {
    assert_eq!(RestQuery::new().to_query_string(), "");
}

// =============================================================================
// requests
// =============================================================================

#[test]
fn list_request_carries_apikey_and_session_bearer() {
    let transport = MockTransport::new();
    transport.respond(200, json!([]));
    let db = signed_in_db(&transport);

    let rows = block_on(db.buildings("c1")).expect("buildings");

    assert!(rows.is_empty());
    let req = transport.last_request();
    assert_eq!(req.method, Method::Get);
    assert_eq!(req.url, "https://proj.supabase.co/rest/v1/buildings?select=%2A&client_id=eq.c1&order=name.asc");
    assert_eq!(req.header_value("apikey"), Some("anon"));
    assert_eq!(req.header_value("Authorization"), Some("Bearer user-token"));
}

#[test]
fn signed_out_requests_use_anon_bearer() {
    let transport = MockTransport::new();
    transport.respond(200, json!([]));
    let auth = SupabaseAuth::new(config(), transport.clone(), Arc::new(MemorySessionStore::default()));
    let db = Database::new(config(), transport.clone(), auth);

    block_on(db.tenants("c1")).expect("tenants");

    assert_eq!(transport.last_request().header_value("Authorization"), Some("Bearer anon"));
}

#[test]
fn single_row_read_maps_406_to_not_found() {
    let transport = MockTransport::new();
    transport.respond(406, json!({ "code": "PGRST116", "message": "JSON object requested, multiple (or no) rows returned" }));
    let db = signed_in_db(&transport);

    assert_eq!(block_on(db.room("missing")), Err(BackendError::NotFound));
    assert_eq!(transport.last_request().header_value("Accept"), Some(OBJECT_ACCEPT));
}

#[test]
fn writes_request_representation() {
    let transport = MockTransport::new();
    transport.respond_raw(200, "[]");
    transport.respond(201, lease_json("l9", "r1", "draft"));
    let db = signed_in_db(&transport);

    let created = block_on(db.create_lease(&new_lease())).expect("create");

    assert_eq!(created.id, "l9");
    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    let insert = &requests[1];
    assert_eq!(insert.method, Method::Post);
    assert_eq!(insert.header_value("Prefer"), Some(RETURN_REPRESENTATION));
    assert_eq!(insert.body.as_ref().and_then(|b| b.get("tenant_id")), Some(&json!("t1")));
}

#[test]
fn not_configured_fails_before_sending() {
    let transport = MockTransport::new();
    let auth = SupabaseAuth::new(SupabaseConfig::default(), transport.clone(), Arc::new(MemorySessionStore::default()));
    let db = Database::new(SupabaseConfig::default(), transport.clone(), auth);
    assert_eq!(block_on(db.buildings("c1")), Err(BackendError::NotConfigured));
    assert!(transport.requests().is_empty());
}

// =============================================================================
// leases
// =============================================================================

#[test]
fn create_lease_refuses_room_with_open_lease() {
    let transport = MockTransport::new();
    transport.respond(200, json!([lease_json("l1", "r1", "active")]));
    let db = signed_in_db(&transport);

    let err = block_on(db.create_lease(&new_lease())).unwrap_err();

    assert_eq!(err.to_string(), "A room can only have one active contract.");
    assert_eq!(transport.requests().len(), 1);
}

#[test]
fn create_lease_allows_room_with_only_closed_leases() {
    let transport = MockTransport::new();
    transport.respond(200, json!([lease_json("l1", "r1", "expired"), lease_json("l2", "r1", "terminated")]));
    transport.respond(201, lease_json("l3", "r1", "draft"));
    let db = signed_in_db(&transport);

    let created = block_on(db.create_lease(&new_lease())).expect("create");
    assert_eq!(created.id, "l3");
}

#[test]
fn expiring_leases_filters_active_window() {
    let transport = MockTransport::new();
    transport.respond(200, json!([]));
    let db = signed_in_db(&transport);

    block_on(db.expiring_leases("c1", 30, date!(2025 - 06 - 01))).expect("expiring");

    let url = transport.last_request().url;
    assert!(url.contains("status=eq.active"), "{url}");
    assert!(url.contains("end_date=gte.2025-06-01"), "{url}");
    assert!(url.contains("end_date=lte.2025-07-01"), "{url}");
}

#[test]
fn reopening_lease_checks_other_open_leases() {
    let transport = MockTransport::new();
    transport.respond(200, lease_json("l1", "r1", "expired"));
    transport.respond(200, json!([lease_json("l1", "r1", "expired"), lease_json("l2", "r1", "active")]));
    let db = signed_in_db(&transport);

    let err = block_on(db.set_lease_status("l1", LeaseStatus::Active)).unwrap_err();
    assert_eq!(err.error_code(), "E_LEASE_CONFLICT");
}

#[test]
fn closing_lease_patches_status_only() {
    let transport = MockTransport::new();
    transport.respond(200, lease_json("l1", "r1", "terminated"));
    let db = signed_in_db(&transport);

    let lease = block_on(db.set_lease_status("l1", LeaseStatus::Terminated)).expect("status");

    assert_eq!(lease.status, LeaseStatus::Terminated);
    let req = transport.last_request();
    assert_eq!(req.method, Method::Patch);
    assert_eq!(req.body, Some(json!({ "status": "terminated" })));
    assert!(req.url.contains("id=eq.l1"));
}

#[test]
fn open_lease_for_room_picks_draft_or_active() {
    let transport = MockTransport::new();
    transport.respond(200, json!([lease_json("l1", "r1", "expired"), lease_json("l2", "r1", "draft")]));
    let db = signed_in_db(&transport);

    let lease = block_on(db.open_lease_for_room("r1")).expect("lookup");
    assert_eq!(lease.map(|l| l.id).as_deref(), Some("l2"));
}

// =============================================================================
// profiles
// =============================================================================

#[test]
fn missing_user_profile_is_none() {
    let transport = MockTransport::new();
    transport.respond(200, json!([]));
    let db = signed_in_db(&transport);
    assert_eq!(block_on(db.user_profile("u1")), Ok(None));
}

#[test]
fn create_user_profile_defaults_role_and_status() {
    let transport = MockTransport::new();
    transport.respond(
        201,
        json!({ "id": "u1", "client_id": "c1", "email": "a@b.c", "full_name": "Ann", "phone": null,
                "role": "user", "avatar_url": null, "status": "active" }),
    );
    let db = signed_in_db(&transport);

    let profile = block_on(db.create_user_profile("u1", "c1", "a@b.c", Some("Ann"), None)).expect("profile");

    assert_eq!(profile.client_id, "c1");
    let body = transport.last_request().body.expect("body");
    assert_eq!(body["role"], "user");
    assert_eq!(body["status"], "active");
}
