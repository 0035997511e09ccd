//! Auth collaborator seam: sessions, auth events and listener handles.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session gate only needs two things from the auth backend: a one-shot
//! "is there a session?" query and a stream of auth-change notifications.
//! `AuthProvider` is that seam; `SupabaseAuth` implements it for the real
//! backend and tests implement it with mocks.
//!
//! DESIGN
//! ======
//! A listener registration is an explicit `Subscription` value. Dropping or
//! disposing it unregisters the listener; the release closure runs at most
//! once. `AuthListeners` holds only a weak link back from each subscription,
//! so a subscription outliving its registry is harmless.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::BackendError;

/// Seconds before `expires_at` at which a session counts as expired.
pub const EXPIRY_MARGIN_SECS: i64 = 30;

// =============================================================================
// TYPES
// =============================================================================

/// Auth-change notification kinds, named as the auth backend names them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
    PasswordRecovery,
}

impl AuthEvent {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SignedIn => "SIGNED_IN",
            Self::SignedOut => "SIGNED_OUT",
            Self::TokenRefreshed => "TOKEN_REFRESHED",
            Self::UserUpdated => "USER_UPDATED",
            Self::PasswordRecovery => "PASSWORD_RECOVERY",
        }
    }
}

/// Identity of the signed-in user as reported by the auth backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: serde_json::Value,
}

/// Bearer credentials plus the user they belong to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Unix seconds.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

impl Session {
    /// Fill `expires_at` from `expires_in` when the backend only sent the latter.
    #[must_use]
    pub fn with_expiry(mut self, now_secs: i64) -> Self {
        if self.expires_at.is_none() {
            self.expires_at = self.expires_in.map(|secs| now_secs + secs);
        }
        self
    }

    /// Sessions without an expiry never expire locally.
    #[must_use]
    pub fn is_expired(&self, now_secs: i64) -> bool {
        self.expires_at.is_some_and(|at| at <= now_secs + EXPIRY_MARGIN_SECS)
    }
}

pub type AuthListener = Arc<dyn Fn(AuthEvent, Option<Session>) + Send + Sync>;

// =============================================================================
// SUBSCRIPTION
// =============================================================================

/// Handle for one registered auth listener.
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self { release: Some(Box::new(release)) }
    }

    /// Unregister the listener now.
    pub fn dispose(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("active", &self.release.is_some()).finish()
    }
}

// =============================================================================
// LISTENER REGISTRY
// =============================================================================

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, AuthListener)>,
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Listener set owned by an auth implementation.
#[derive(Clone, Default)]
pub struct AuthListeners {
    inner: Arc<Mutex<Registry>>,
}

impl AuthListeners {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: AuthListener) -> Subscription {
        let id = {
            let mut registry = lock(&self.inner);
            let id = registry.next_id;
            registry.next_id += 1;
            registry.listeners.push((id, listener));
            id
        };
        let weak: Weak<Mutex<Registry>> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                lock(&inner).listeners.retain(|(entry, _)| *entry != id);
            }
        })
    }

    /// Notify every listener. Listeners run outside the registry lock so they
    /// may subscribe or unsubscribe while handling an event.
    pub fn emit(&self, event: AuthEvent, session: Option<&Session>) {
        let snapshot: Vec<AuthListener> = lock(&self.inner)
            .listeners
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        log::debug!("auth event {} to {} listeners", event.as_str(), snapshot.len());
        for listener in snapshot {
            listener(event, session.cloned());
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.inner).listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// PROVIDER
// =============================================================================

/// What the session gate needs from the auth backend.
#[async_trait(?Send)]
pub trait AuthProvider: Send + Sync {
    /// The current session, if any.
    async fn get_session(&self) -> Result<Option<Session>, BackendError>;

    /// Register for auth-change notifications.
    fn subscribe(&self, listener: AuthListener) -> Subscription;
}
