//! Colored status pill used by lease lists and details.

use leptos::prelude::*;
use records::LeaseStatus;

#[component]
pub fn StatusBadge(status: LeaseStatus) -> impl IntoView {
    view! {
        <span class="status-badge" style=format!("background-color: {}", status.color())>
            {status.as_str().to_uppercase()}
        </span>
    }
}
