//! Session gate state: which of the two app trees is showing.
//!
//! SYSTEM CONTEXT
//! ==============
//! The whole app sits behind one gate. While the auth state is unknown it
//! shows a loading indicator; afterwards it shows the auth flow or the main
//! flow. Screens never navigate between the two trees themselves: signing in
//! or out produces an auth event, and the gate follows it.
//!
//! DESIGN
//! ======
//! - `reduce` maps each input to the next state. The previous state does not
//!   matter: the latest input wins.
//! - `MountedGate` ties the gate's lifetime to one subscription and one
//!   session check. Once unmounted, no input reaches `apply`, including a
//!   session check that resolves afterwards.
//!
//! ERROR HANDLING
//! ==============
//! A failed session check is logged and treated as "no session".

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use crate::net::auth::{AuthEvent, AuthProvider, Session, Subscription};
use crate::net::error::BackendError;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum AuthState {
    #[default]
    Unknown,
    Unauthenticated,
    Authenticated(Session),
}

impl AuthState {
    #[must_use]
    pub fn view(&self) -> GateView {
        match self {
            Self::Unknown => GateView::Loading,
            Self::Unauthenticated => GateView::AuthFlow,
            Self::Authenticated(_) => GateView::MainFlow,
        }
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    fn from_session(session: Option<Session>) -> Self {
        session.map_or(Self::Unauthenticated, Self::Authenticated)
    }
}

/// The tree the gate renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateView {
    Loading,
    AuthFlow,
    MainFlow,
}

#[derive(Debug)]
pub enum GateInput {
    SessionChecked(Result<Option<Session>, BackendError>),
    AuthChanged(AuthEvent, Option<Session>),
}

/// Next auth state for an input.
#[must_use]
pub fn reduce(input: GateInput) -> AuthState {
    match input {
        GateInput::SessionChecked(Ok(session)) => AuthState::from_session(session),
        GateInput::SessionChecked(Err(e)) => {
            log::warn!("session check failed ({}): {e}", e.error_code());
            AuthState::Unauthenticated
        }
        GateInput::AuthChanged(event, session) => {
            log::debug!("auth changed: {}", event.as_str());
            AuthState::from_session(session)
        }
    }
}

/// A live gate: one auth subscription plus a liveness flag for its session
/// check.
pub struct MountedGate {
    alive: Arc<AtomicBool>,
    subscription: Option<Subscription>,
}

impl MountedGate {
    /// Subscribe to auth changes and prepare the initial session check.
    ///
    /// The returned future performs the check; the caller spawns it. Both
    /// it and the subscription deliver new states through `apply` only while
    /// the gate is mounted.
    pub fn mount<F>(provider: Arc<dyn AuthProvider>, apply: F) -> (Self, LocalBoxFuture<'static, ()>)
    where
        F: Fn(AuthState) + Send + Sync + 'static,
    {
        let alive = Arc::new(AtomicBool::new(true));
        let apply = Arc::new(apply);

        let listener_alive = alive.clone();
        let listener_apply = apply.clone();
        let subscription = provider.subscribe(Arc::new(move |event: AuthEvent, session: Option<Session>| {
            if listener_alive.load(Ordering::Acquire) {
                listener_apply(reduce(GateInput::AuthChanged(event, session)));
            }
        }));

        let check_alive = alive.clone();
        let check = async move {
            let result = provider.get_session().await;
            if check_alive.load(Ordering::Acquire) {
                apply(reduce(GateInput::SessionChecked(result)));
            } else {
                log::debug!("session check resolved after unmount; ignored");
            }
        }
        .boxed_local();

        (Self { alive, subscription: Some(subscription) }, check)
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Stop delivering input and release the subscription.
    pub fn unmount(mut self) {
        self.release();
    }

    fn release(&mut self) {
        self.alive.store(false, Ordering::Release);
        if let Some(subscription) = self.subscription.take() {
            subscription.dispose();
        }
    }
}

impl Drop for MountedGate {
    fn drop(&mut self) {
        self.release();
    }
}
