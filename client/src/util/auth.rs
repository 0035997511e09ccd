//! Shared auth helpers for main-flow screens.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every main-flow screen resolves the signed-in user's profile before it
//! loads data, because the profile carries the `client_id` all queries are
//! scoped to. A user without a profile is signed out; the session gate then
//! swaps back to the auth flow. Screens never navigate there themselves.
//!
//! ERROR HANDLING
//! ==============
//! Backend errors while reading the profile are returned to the screen and
//! do not sign the user out.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::future::Future;

use leptos::prelude::*;
use records::UserProfile;

use crate::net::error::BackendError;
use crate::net::supabase::Backend;

/// Shown on the login screen when an account has no profile row.
pub const PROFILE_MISSING: &str = "Your user profile is not set up. Please contact your administrator.";

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("not signed in")]
    SignedOut,
    #[error("Your user profile is not set up. Please contact your administrator.")]
    Missing,
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Message for the login screen from a screen that signed the user out.
///
/// Provided above the session gate so it survives the swap between trees.
#[derive(Clone, Copy, Debug)]
pub struct AuthNotice(pub RwSignal<Option<String>>);

impl AuthNotice {
    #[must_use]
    pub fn new() -> Self {
        Self(RwSignal::new(None))
    }

    pub fn post(self, message: impl Into<String>) {
        let _ = self.0.try_set(Some(message.into()));
    }

    pub fn clear(self) {
        let _ = self.0.try_set(None);
    }
}

impl Default for AuthNotice {
    fn default() -> Self {
        Self::new()
    }
}

/// Screen text for a backend failure; transient failures ask for a retry.
#[must_use]
pub fn failure_message(error: &BackendError) -> String {
    if error.retryable() {
        format!("{error} (please try again)")
    } else {
        error.to_string()
    }
}

/// Sign out, logging instead of returning a failed logout request.
pub async fn sign_out_quietly(backend: &Backend) {
    if let Err(e) = backend.auth.sign_out().await {
        log::warn!("sign out failed ({}): {e}", e.error_code());
    }
}

/// Profile of the signed-in user.
///
/// Signs out when there is no user or no profile row.
///
/// # Errors
///
/// [`ProfileError::SignedOut`] or [`ProfileError::Missing`] after signing
/// out, or the backend error that prevented reading the profile.
pub async fn load_client_profile(backend: &Backend) -> Result<UserProfile, ProfileError> {
    let Some(user) = backend.auth.current_user() else {
        sign_out_quietly(backend).await;
        return Err(ProfileError::SignedOut);
    };
    match backend.db.user_profile(&user.id).await? {
        Some(profile) => Ok(profile),
        None => {
            log::warn!("no profile row for user {}", user.id);
            sign_out_quietly(backend).await;
            Err(ProfileError::Missing)
        }
    }
}

/// Runs a screen's backend work after resolving the user's profile.
///
/// Built once while the screen is set up, so the backend and the auth notice
/// come from context even when `spawn` is later called from an event
/// handler.
#[derive(Clone)]
pub struct ScreenLoader {
    backend: Backend,
    notice: Option<AuthNotice>,
    error: RwSignal<Option<String>>,
}

impl ScreenLoader {
    /// Backend failures while resolving the profile land in `error`.
    pub fn new(error: RwSignal<Option<String>>) -> Self {
        Self { backend: expect_context::<Backend>(), notice: use_context::<AuthNotice>(), error }
    }

    /// Resolve the profile, then run `task` with it on the UI task queue.
    ///
    /// A missing profile is posted to the login screen; the gate unmounts
    /// this screen after the sign-out.
    pub fn spawn<F, Fut>(&self, task: F)
    where
        F: FnOnce(Backend, UserProfile) -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        #[cfg(feature = "hydrate")]
        {
            let Self { backend, notice, error } = self.clone();
            leptos::task::spawn_local(async move {
                match load_client_profile(&backend).await {
                    Ok(profile) => task(backend, profile).await,
                    Err(ProfileError::Backend(e)) => {
                        let _ = error.try_set(Some(failure_message(&e)));
                    }
                    Err(e @ ProfileError::Missing) => {
                        if let Some(notice) = notice {
                            notice.post(e.to_string());
                        }
                    }
                    Err(ProfileError::SignedOut) => log::debug!("screen left main flow: not signed in"),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (task, &self.backend, self.notice, self.error);
        }
    }

    /// Sign out; the gate swaps to the auth flow.
    pub fn sign_out(&self) {
        #[cfg(feature = "hydrate")]
        {
            let backend = self.backend.clone();
            leptos::task::spawn_local(async move { sign_out_quietly(&backend).await });
        }
    }
}
