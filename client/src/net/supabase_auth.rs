//! Auth client over the backend's GoTrue REST endpoints.
//!
//! SYSTEM CONTEXT
//! ==============
//! Owns the current session for the whole page: the data client reads its
//! bearer token from here, and the session gate observes it through the
//! `AuthProvider` impl. Sign-in, sign-up, sign-out, password reset and
//! password update are the only writers.
//!
//! DESIGN
//! ======
//! - The session is mirrored into a `SessionStore` so it survives reloads.
//! - `get_session` refreshes an expired session with its refresh token.
//! - Every session change emits an `AuthEvent` to subscribers after the
//!   stored session has been updated.
//!
//! ERROR HANDLING
//! ==============
//! A failed refresh clears the session and returns the error. Sign-out
//! always clears the local session and emits `SIGNED_OUT`, even if the
//! logout request fails; the request error is still returned.

#[cfg(test)]
#[path = "supabase_auth_test.rs"]
mod supabase_auth_test;

use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use records::form::{Credentials, Registration};
use serde_json::json;

use super::auth::{AuthEvent, AuthListener, AuthListeners, AuthProvider, AuthUser, Session, Subscription};
use super::error::BackendError;
use super::session_store::SessionStore;
use super::supabase::SupabaseConfig;
use super::transport::{ApiRequest, Method, Transport};
use crate::util::clock;

#[derive(Clone)]
pub struct SupabaseAuth {
    config: SupabaseConfig,
    transport: Arc<dyn Transport>,
    store: Arc<dyn SessionStore>,
    session: Arc<RwLock<Option<Session>>>,
    listeners: AuthListeners,
    clock: fn() -> i64,
}

impl SupabaseAuth {
    pub fn new(config: SupabaseConfig, transport: Arc<dyn Transport>, store: Arc<dyn SessionStore>) -> Self {
        let session = store.load();
        Self {
            config,
            transport,
            store,
            session: Arc::new(RwLock::new(session)),
            listeners: AuthListeners::new(),
            clock: clock::now_unix_secs,
        }
    }

    /// Replace the clock used for expiry checks.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn config(&self) -> &SupabaseConfig {
        &self.config
    }

    /// Stored session without any refresh attempt.
    #[must_use]
    pub fn current_session(&self) -> Option<Session> {
        self.session.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<AuthUser> {
        self.current_session().map(|s| s.user)
    }

    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.current_session().map(|s| s.access_token)
    }

    fn set_session(&self, session: Option<Session>) {
        match &session {
            Some(s) => self.store.save(s),
            None => self.store.clear(),
        }
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = session;
    }

    fn request(&self, method: Method, path: &str) -> Result<ApiRequest, BackendError> {
        if !self.config.is_configured() {
            return Err(BackendError::NotConfigured);
        }
        Ok(ApiRequest::new(method, self.config.auth_endpoint(path)).header("apikey", self.config.anon_key.clone()))
    }

    fn authorized(&self, method: Method, path: &str) -> Result<ApiRequest, BackendError> {
        let token = self.access_token().ok_or(BackendError::Unauthenticated)?;
        Ok(self.request(method, path)?.header("Authorization", format!("Bearer {token}")))
    }

    fn decode_session(&self, value: serde_json::Value) -> Result<Session, BackendError> {
        let session: Session = serde_json::from_value(value).map_err(|e| BackendError::Decode(e.to_string()))?;
        Ok(session.with_expiry((self.clock)()))
    }

    /// Password sign-in.
    ///
    /// # Errors
    ///
    /// Returns the backend's message (e.g. invalid credentials) as
    /// [`BackendError::Http`], or a transport error.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Session, BackendError> {
        let req = self
            .request(Method::Post, "token?grant_type=password")?
            .json(json!({ "email": credentials.email, "password": credentials.password }));
        let resp = self.transport.send(req).await?.error_for_status()?;
        let session = self.decode_session(resp.json()?)?;
        self.set_session(Some(session.clone()));
        log::info!("signed in user {}", session.user.id);
        self.listeners.emit(AuthEvent::SignedIn, Some(&session));
        Ok(session)
    }

    /// Register a new account. Returns a session only when the backend
    /// confirms the account immediately; otherwise the user must verify
    /// their email first.
    ///
    /// # Errors
    ///
    /// Returns the backend's message (e.g. already registered) or a
    /// transport error.
    pub async fn sign_up(&self, registration: &Registration) -> Result<Option<Session>, BackendError> {
        let req = self.request(Method::Post, "signup")?.json(json!({
            "email": registration.email,
            "password": registration.password,
            "data": {
                "full_name": registration.full_name,
                "phone": registration.phone,
            },
        }));
        let resp = self.transport.send(req).await?.error_for_status()?;
        let body: serde_json::Value = resp.json()?;
        if body.get("access_token").is_none() {
            return Ok(None);
        }
        let session = self.decode_session(body)?;
        self.set_session(Some(session.clone()));
        self.listeners.emit(AuthEvent::SignedIn, Some(&session));
        Ok(Some(session))
    }

    /// Sign out locally and on the backend.
    ///
    /// # Errors
    ///
    /// Returns the logout request's error after the local session has
    /// already been cleared.
    pub async fn sign_out(&self) -> Result<(), BackendError> {
        let result = match self.authorized(Method::Post, "logout") {
            Ok(req) => self.transport.send(req).await.and_then(|r| r.error_for_status()).map(|_| ()),
            Err(BackendError::Unauthenticated) => Ok(()),
            Err(e) => Err(e),
        };
        self.set_session(None);
        if let Err(e) = &result {
            log::warn!("logout request failed: {e}");
        }
        self.listeners.emit(AuthEvent::SignedOut, None);
        result
    }

    /// Send a password-reset email.
    ///
    /// # Errors
    ///
    /// Returns the backend's message or a transport error.
    pub async fn reset_password(&self, email: &str) -> Result<(), BackendError> {
        let req = self.request(Method::Post, "recover")?.json(json!({ "email": email }));
        self.transport.send(req).await?.error_for_status()?;
        Ok(())
    }

    /// Change the signed-in user's password.
    ///
    /// # Errors
    ///
    /// [`BackendError::Unauthenticated`] without a session, otherwise the
    /// backend's message or a transport error.
    pub async fn update_password(&self, password: &str) -> Result<(), BackendError> {
        let req = self.authorized(Method::Put, "user")?.json(json!({ "password": password }));
        let resp = self.transport.send(req).await?.error_for_status()?;
        let user: AuthUser = resp.json()?;
        let updated = self.current_session().map(|s| Session { user, ..s });
        if let Some(session) = &updated {
            self.set_session(Some(session.clone()));
        }
        self.listeners.emit(AuthEvent::UserUpdated, updated.as_ref());
        Ok(())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, BackendError> {
        let req = self
            .request(Method::Post, "token?grant_type=refresh_token")?
            .json(json!({ "refresh_token": refresh_token }));
        let resp = self.transport.send(req).await?.error_for_status()?;
        self.decode_session(resp.json()?)
    }
}

#[async_trait(?Send)]
impl AuthProvider for SupabaseAuth {
    async fn get_session(&self) -> Result<Option<Session>, BackendError> {
        let Some(session) = self.current_session() else {
            return Ok(None);
        };
        if !session.is_expired((self.clock)()) {
            return Ok(Some(session));
        }
        match self.refresh(&session.refresh_token).await {
            Ok(refreshed) => {
                self.set_session(Some(refreshed.clone()));
                self.listeners.emit(AuthEvent::TokenRefreshed, Some(&refreshed));
                Ok(Some(refreshed))
            }
            Err(e) => {
                log::warn!("session refresh failed: {e}");
                self.set_session(None);
                Err(e)
            }
        }
    }

    fn subscribe(&self, listener: AuthListener) -> Subscription {
        self.listeners.subscribe(listener)
    }
}
