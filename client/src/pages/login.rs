//! Sign-in screen of the auth flow.
//!
//! SYSTEM CONTEXT
//! ==============
//! Successful sign-in emits `SIGNED_IN`, which moves the session gate to the
//! main flow. This screen never navigates there itself. The profile check
//! that follows may sign the user straight back out; its message comes back
//! through `AuthNotice` because this screen is remounted by then.

use leptos::prelude::*;
use records::form::LoginDraft;

use crate::components::error_message::ErrorMessage;
use crate::components::field::{TextField, bind};
use crate::net::supabase::Backend;
use crate::util::auth::AuthNotice;

#[component]
pub fn LoginPage() -> impl IntoView {
    let backend = expect_context::<Backend>();
    let notice = use_context::<AuthNotice>().unwrap_or_default();
    let draft = RwSignal::new(LoginDraft::default());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let credentials = match draft.with(LoginDraft::validate) {
            Ok(credentials) => credentials,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        error.set(None);
        notice.clear();
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            use crate::util::auth::{ProfileError, load_client_profile};

            let backend = backend.clone();
            leptos::task::spawn_local(async move {
                if let Err(e) = backend.auth.sign_in(&credentials).await {
                    let _ = error.try_set(Some(e.to_string()));
                    let _ = busy.try_set(false);
                    return;
                }
                match load_client_profile(&backend).await {
                    Ok(profile) => log::debug!("signed in as {}", profile.email),
                    Err(e @ ProfileError::Missing) => notice.post(e.to_string()),
                    Err(e) => log::warn!("profile check after sign-in failed: {e}"),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&backend, credentials);
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Property Manager"</h1>
                <p class="auth-card__subtitle">"Sign in to your account"</p>
                <ErrorMessage message=notice.0/>
                <ErrorMessage message=error/>
                <form class="auth-form" on:submit=on_submit>
                    <TextField label="Email" bind=bind!(draft, email) input_type="email" placeholder="you@example.com"/>
                    <TextField label="Password" bind=bind!(draft, password) input_type="password"/>
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <a class="auth-card__link" href="/forgot-password">"Forgot password?"</a>
                <p class="auth-card__footer">
                    "Don't have an account? "
                    <a href="/signup">"Sign up"</a>
                </p>
            </div>
        </div>
    }
}
