//! Inline error banner for forms and screens.

use leptos::prelude::*;

/// Renders nothing while `message` is `None`.
#[component]
pub fn ErrorMessage(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.with(Option::is_some)>
            <p class="error-message" role="alert">{move || message.get().unwrap_or_default()}</p>
        </Show>
    }
}
