use axum::body::Body;
use axum::http::{Request, StatusCode};
use client::net::supabase::SupabaseConfig;
use tower::ServiceExt;

use super::*;

fn test_config() -> ServerConfig {
    ServerConfig {
        port: 0,
        backend: SupabaseConfig::new("https://demo.supabase.co", "anon-key"),
        site_root: Some("/nonexistent-site".to_owned()),
    }
}

fn test_options() -> LeptosOptions {
    LeptosOptions::builder().output_name("propdesk").build()
}

#[tokio::test]
async fn healthz_returns_ok() {
    let router = app(&test_config(), test_options());
    let response = router
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_asset_is_not_found() {
    let router = app(&test_config(), test_options());
    let response = router
        .oneshot(Request::builder().uri("/pkg/propdesk.wasm").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn page_requests_render_shell_with_backend_settings() {
    let _ = any_spawner::Executor::init_tokio();
    let router = app(&test_config(), test_options());
    let response = router
        .oneshot(Request::builder().uri("/buildings/b1").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8_lossy(&bytes);
    assert!(html.contains("https://demo.supabase.co"));
    assert!(html.contains("anon-key"));
    assert!(html.contains("Initializing..."));
}
