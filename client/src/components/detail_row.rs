//! Label/value row on detail screens.

use leptos::prelude::*;

/// Renders nothing for `None`.
#[component]
pub fn DetailRow(label: &'static str, #[prop(into)] value: Option<String>) -> impl IntoView {
    value.map(|value| {
        view! {
            <div class="detail-row">
                <span class="detail-row__label">{label}</span>
                <span class="detail-row__value">{value}</span>
            </div>
        }
    })
}
