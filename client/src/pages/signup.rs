//! Account registration screen.

use leptos::prelude::*;
use records::form::SignUpDraft;

use crate::components::error_message::ErrorMessage;
use crate::components::field::{TextField, bind};
use crate::net::supabase::Backend;

const CREATED_NOTICE: &str = "Account created successfully! Please check your email for verification. \
                              Contact your administrator to set up your profile.";

#[component]
pub fn SignUpPage() -> impl IntoView {
    let backend = expect_context::<Backend>();
    let draft = RwSignal::new(SignUpDraft::default());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let created = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let registration = match draft.with(SignUpDraft::validate) {
            Ok(registration) => registration,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        error.set(None);
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let backend = backend.clone();
            leptos::task::spawn_local(async move {
                match backend.auth.sign_up(&registration).await {
                    Ok(_) => {
                        let _ = created.try_set(true);
                    }
                    Err(e) => {
                        let _ = error.try_set(Some(e.to_string()));
                    }
                }
                let _ = busy.try_set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&backend, registration);
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Create Account"</h1>
                <Show
                    when=move || created.get()
                    fallback=move || {
                        view! {
                            <p class="auth-card__subtitle">"Sign up to get started"</p>
                            <ErrorMessage message=error/>
                            <form class="auth-form" on:submit=on_submit.clone()>
                                <TextField label="Full Name" bind=bind!(draft, full_name) required=true/>
                                <TextField label="Email" bind=bind!(draft, email) input_type="email" required=true/>
                                <TextField label="Phone" bind=bind!(draft, phone) input_type="tel"/>
                                <TextField
                                    label="Password"
                                    bind=bind!(draft, password)
                                    input_type="password"
                                    required=true
                                />
                                <TextField
                                    label="Confirm Password"
                                    bind=bind!(draft, confirm_password)
                                    input_type="password"
                                    required=true
                                />
                                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                                    {move || if busy.get() { "Creating account..." } else { "Sign Up" }}
                                </button>
                            </form>
                        }
                    }
                >
                    <p class="auth-card__notice">{CREATED_NOTICE}</p>
                    <a class="btn btn--primary" href="/login">
                        "OK"
                    </a>
                </Show>
                <p class="auth-card__footer">
                    "Already have an account? "
                    <a href="/login">"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
