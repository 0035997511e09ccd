use super::*;

#[test]
fn header_replaces_case_insensitively() {
    let req = ApiRequest::new(Method::Get, "https://x.test")
        .header("Accept", "application/json")
        .header("accept", "application/vnd.pgrst.object+json");
    assert_eq!(req.headers.len(), 1);
    assert_eq!(req.header_value("ACCEPT"), Some("application/vnd.pgrst.object+json"));
}

#[test]
fn json_sets_body_and_content_type() {
    let req = ApiRequest::new(Method::Post, "https://x.test").json(serde_json::json!({ "a": 1 }));
    assert_eq!(req.body, Some(serde_json::json!({ "a": 1 })));
    assert_eq!(req.header_value("content-type"), Some("application/json"));
}

#[test]
fn error_for_status_passes_success_through() {
    let resp = ApiResponse { status: 201, body: "[]".to_owned() };
    assert!(resp.clone().error_for_status().is_ok());
    let resp = ApiResponse { status: 404, body: r#"{"message":"nope"}"#.to_owned() };
    assert_eq!(
        resp.error_for_status(),
        Err(BackendError::Http { status: 404, message: "nope".to_owned() })
    );
}

#[test]
fn json_reports_decode_errors() {
    let resp = ApiResponse { status: 200, body: "not json".to_owned() };
    let err = resp.json::<Vec<u8>>().unwrap_err();
    assert_eq!(err.error_code(), "E_DECODE");
}

#[test]
fn offline_transport_is_unavailable() {
    let result = futures::executor::block_on(OfflineTransport.send(ApiRequest::new(Method::Get, "https://x.test")));
    assert_eq!(result, Err(BackendError::Unavailable));
}

#[test]
fn method_names() {
    assert_eq!(Method::Patch.as_str(), "PATCH");
    assert_eq!(Method::Delete.as_str(), "DELETE");
}
