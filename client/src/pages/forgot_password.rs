//! Password reset request screen.

use leptos::prelude::*;
use records::form::validate_reset_email;

use crate::components::error_message::ErrorMessage;
use crate::net::supabase::Backend;

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let backend = expect_context::<Backend>();
    let email = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let sent = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let address = match email.with(|e| validate_reset_email(e)) {
            Ok(address) => address,
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
                match backend.auth.reset_password(&address).await {
                    Ok(()) => {
                        let _ = sent.try_set(true);
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
            let _ = (&backend, address);
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Reset Password"</h1>
                <Show
                    when=move || sent.get()
                    fallback=move || {
                        view! {
                            <p class="auth-card__subtitle">
                                "Enter your email address and we'll send you instructions to reset your password."
                            </p>
                            <ErrorMessage message=error/>
                            <form class="auth-form" on:submit=on_submit.clone()>
                                <label class="form-field">
                                    <span class="form-field__label">"Email"</span>
                                    <input
                                        class="form-field__input"
                                        type="email"
                                        placeholder="you@example.com"
                                        prop:value=move || email.get()
                                        on:input=move |ev| email.set(event_target_value(&ev))
                                    />
                                </label>
                                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                                    {move || if busy.get() { "Sending..." } else { "Send Reset Link" }}
                                </button>
                            </form>
                        }
                    }
                >
                    <p class="auth-card__notice">"Please check your email for password reset instructions."</p>
                    <a class="btn btn--primary" href="/login">
                        "OK"
                    </a>
                </Show>
                <a class="auth-card__link" href="/login">"Back to Sign In"</a>
            </div>
        </div>
    }
}
