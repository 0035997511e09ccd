//! Persistence of the auth session between page loads.
//!
//! TRADE-OFFS
//! ==========
//! Browser builds keep the session in `localStorage`, which is best-effort:
//! storage failures are logged and the session simply lives in memory for
//! this page. SSR and tests use `MemorySessionStore`.

#[cfg(test)]
#[path = "session_store_test.rs"]
mod session_store_test;

use std::sync::{Arc, Mutex, PoisonError};

use super::auth::Session;

/// `localStorage` key holding the serialized session.
pub const SESSION_STORAGE_KEY: &str = "propdesk.session";

pub trait SessionStore: Send + Sync {
    fn load(&self) -> Option<Session>;
    fn save(&self, session: &Session);
    fn clear(&self);
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn with_session(session: Session) -> Self {
        Self { slot: Mutex::new(Some(session)) }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<Session> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn save(&self, session: &Session) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
    }

    fn clear(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Decode a stored session, discarding unreadable values.
pub(crate) fn decode_session(raw: &str) -> Option<Session> {
    match serde_json::from_str(raw) {
        Ok(session) => Some(session),
        Err(e) => {
            log::warn!("discarding stored session: {e}");
            None
        }
    }
}

#[cfg(feature = "hydrate")]
#[derive(Debug, Default)]
pub struct LocalStorageSessionStore;

#[cfg(feature = "hydrate")]
impl LocalStorageSessionStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

#[cfg(feature = "hydrate")]
impl SessionStore for LocalStorageSessionStore {
    fn load(&self) -> Option<Session> {
        let raw = Self::storage()?.get_item(SESSION_STORAGE_KEY).ok().flatten()?;
        decode_session(&raw)
    }

    fn save(&self, session: &Session) {
        let Some(storage) = Self::storage() else {
            return;
        };
        match serde_json::to_string(session) {
            Ok(raw) => {
                if storage.set_item(SESSION_STORAGE_KEY, &raw).is_err() {
                    log::warn!("failed to persist session");
                }
            }
            Err(e) => log::warn!("failed to encode session: {e}"),
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(SESSION_STORAGE_KEY);
        }
    }
}

/// The store matching the current build.
#[must_use]
pub fn default_session_store() -> Arc<dyn SessionStore> {
    #[cfg(feature = "hydrate")]
    {
        Arc::new(LocalStorageSessionStore)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Arc::new(MemorySessionStore::default())
    }
}
