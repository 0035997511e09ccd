//! Neutral loading indicator.

use leptos::prelude::*;

#[component]
pub fn Loading(#[prop(optional)] message: Option<&'static str>) -> impl IntoView {
    view! {
        <div class="loading" role="status" aria-live="polite">
            <span class="loading__spinner" aria-hidden="true"></span>
            <span class="loading__text">{message.unwrap_or("Loading...")}</span>
        </div>
    }
}
