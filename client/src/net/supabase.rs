//! Backend configuration and the injected `Backend` handle.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server renders the public project URL and anon key into `<meta>` tags
//! of the SSR shell. After hydration the browser reads them back and builds
//! one `Backend`, which `App` places in Leptos context. Pages reach the auth
//! and data clients only through that context value.

#[cfg(test)]
#[path = "supabase_test.rs"]
mod supabase_test;

use std::sync::Arc;

use super::auth::AuthProvider;
use super::database::Database;
use super::session_store::{SessionStore, default_session_store};
use super::supabase_auth::SupabaseAuth;
use super::transport::{Transport, default_transport};

pub const URL_META: &str = "supabase-url";
pub const ANON_KEY_META: &str = "supabase-anon-key";

/// Public connection settings of the backend project.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

impl SupabaseConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let url = url.into().trim().trim_end_matches('/').to_owned();
        Self { url, anon_key: anon_key.into().trim().to_owned() }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.anon_key.is_empty()
    }

    #[must_use]
    pub fn auth_endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.url)
    }

    #[must_use]
    pub fn rest_endpoint(&self, resource: &str) -> String {
        format!("{}/rest/v1/{resource}", self.url)
    }

    /// Read the settings from the `<meta>` tags written by the SSR shell.
    /// Returns an unconfigured value outside the browser.
    #[must_use]
    pub fn from_document() -> Self {
        #[cfg(feature = "hydrate")]
        {
            let meta = |name: &str| -> String {
                web_sys::window()
                    .and_then(|w| w.document())
                    .and_then(|doc| doc.query_selector(&format!("meta[name=\"{name}\"]")).ok().flatten())
                    .and_then(|el| el.get_attribute("content"))
                    .unwrap_or_default()
            };
            Self::new(meta(URL_META), meta(ANON_KEY_META))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Self::default()
        }
    }
}

/// Auth and data clients sharing one configuration and session.
#[derive(Clone)]
pub struct Backend {
    pub auth: SupabaseAuth,
    pub db: Database,
}

impl Backend {
    pub fn new(config: SupabaseConfig, transport: Arc<dyn Transport>, store: Arc<dyn SessionStore>) -> Self {
        let auth = SupabaseAuth::new(config.clone(), transport.clone(), store);
        let db = Database::new(config, transport, auth.clone());
        Self { auth, db }
    }

    /// Backend for the current page, configured from the document.
    #[must_use]
    pub fn from_document() -> Self {
        let config = SupabaseConfig::from_document();
        #[cfg(feature = "hydrate")]
        if !config.is_configured() {
            log::warn!("backend URL or anon key missing; backend calls will fail");
        }
        Self::new(config, default_transport(), default_session_store())
    }

    /// The auth client as the session gate sees it.
    #[must_use]
    pub fn auth_provider(&self) -> Arc<dyn AuthProvider> {
        Arc::new(self.auth.clone())
    }
}
