//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server has no API of its own: the browser talks to the hosted backend
//! directly. This router serves the health check, the hydration bundle under
//! `/pkg`, and the Leptos SSR shell for every other path. Client-side routing
//! takes over after hydration.

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use leptos::prelude::*;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Health check + hydration assets + SSR shell.
pub fn app(config: &ServerConfig, options: LeptosOptions) -> Router {
    let site_root = config
        .site_root
        .clone()
        .map_or_else(|| PathBuf::from(options.site_root.as_ref()), PathBuf::from);

    let render = leptos_axum::render_app_to_stream({
        let backend = config.backend.clone();
        move || client::app::shell(options.clone(), backend.clone())
    });

    Router::new()
        .route("/healthz", get(healthz))
        .nest_service("/pkg", ServeDir::new(site_root.join("pkg")))
        .fallback(render)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
