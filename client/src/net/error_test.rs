use super::*;

#[test]
fn response_message_prefers_auth_description() {
    let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
    assert_eq!(response_message(400, body), "Invalid login credentials");
}

#[test]
fn response_message_reads_gotrue_msg_and_postgrest_message() {
    assert_eq!(response_message(422, r#"{"code":422,"msg":"User already registered"}"#), "User already registered");
    assert_eq!(
        response_message(409, r#"{"code":"23505","message":"duplicate key value"}"#),
        "duplicate key value"
    );
}

#[test]
fn response_message_falls_back_to_status() {
    assert_eq!(response_message(502, "<html>bad gateway</html>"), "request failed: 502");
    assert_eq!(response_message(500, r#"{"message":""}"#), "request failed: 500");
}

#[test]
fn http_error_displays_backend_message() {
    let err = BackendError::from_response(400, r#"{"msg":"Email not confirmed"}"#);
    assert_eq!(err.to_string(), "Email not confirmed");
    assert_eq!(err.error_code(), "E_HTTP");
}

#[test]
fn retryable_covers_network_and_server_errors() {
    assert!(BackendError::Network("offline".to_owned()).retryable());
    assert!(BackendError::from_response(503, "").retryable());
    assert!(BackendError::from_response(429, "").retryable());
    assert!(!BackendError::from_response(400, "").retryable());
    assert!(!BackendError::NotConfigured.retryable());
}

#[test]
fn lease_conflict_keeps_its_message() {
    let err: BackendError =
        LeaseConflict { room_id: "r1".to_owned(), existing_lease_id: "l1".to_owned() }.into();
    assert_eq!(err.error_code(), "E_LEASE_CONFLICT");
    assert_eq!(err.to_string(), "A room can only have one active contract.");
}
