//! Top bar shared by main-flow screens.

use leptos::prelude::*;

#[component]
pub fn PageHeader(
    #[prop(into)] title: Signal<String>,
    #[prop(optional, into)] back: Option<String>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <header class="page-header toolbar">
            {back.map(|href| view! { <a class="toolbar__back" href=href>"‹ Back"</a> })}
            <span class="toolbar__title">{move || title.get()}</span>
            <span class="toolbar__spacer"></span>
            {children.map(|children| children())}
        </header>
    }
}
