//! Top-level gate choosing between the auth flow and the main flow.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted once under the router. It owns the `RwSignal<AuthState>` that
//! screens read through context, and it is the only place that decides which
//! tree renders. Screens sign in or out through the backend; the resulting
//! auth event reaches the gate through its subscription.
//!
//! DESIGN
//! ======
//! The rendered tree follows a `Memo` of the gate view, so a token refresh
//! that keeps the user signed in does not remount the main flow. The session
//! check only runs in the browser: the server always renders the loading
//! indicator, which is also the first client render.

use leptos::prelude::*;

use crate::components::loading::Loading;
use crate::net::supabase::Backend;
use crate::state::session::{AuthState, GateView, MountedGate};

#[component]
pub fn SessionGate(#[prop(into)] auth_flow: ViewFn, #[prop(into)] main_flow: ViewFn) -> impl IntoView {
    let backend = expect_context::<Backend>();
    let auth = RwSignal::new(AuthState::default());
    provide_context(auth);

    let (gate, check) = MountedGate::mount(backend.auth_provider(), move |state| {
        let _ = auth.try_set(state);
    });
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(check);
    #[cfg(not(feature = "hydrate"))]
    drop(check);
    on_cleanup(move || gate.unmount());

    let view_kind = Memo::new(move |_| auth.with(AuthState::view));

    move || match view_kind.get() {
        GateView::Loading => view! { <Loading message="Initializing..."/> }.into_any(),
        GateView::AuthFlow => auth_flow.run(),
        GateView::MainFlow => main_flow.run(),
    }
}
