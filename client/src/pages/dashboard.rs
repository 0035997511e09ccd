//! Main-flow landing screen: greeting, quick links and the building list.
//!
//! SYSTEM CONTEXT
//! ==============
//! First screen after sign-in. Resolves the user's profile (signing out when
//! it is missing) and lists the buildings of the profile's client.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use records::{Building, UserProfile};

use crate::components::error_message::ErrorMessage;
use crate::components::loading::Loading;
use crate::state::resource::Loadable;
use crate::util::auth::ScreenLoader;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let error = RwSignal::new(None::<String>);
    let loader = ScreenLoader::new(error);
    let navigate = use_navigate();
    let profile = RwSignal::new(None::<UserProfile>);
    let buildings = RwSignal::new(Loadable::<Vec<Building>>::Loading);

    let load = {
        let loader = loader.clone();
        move || {
            error.set(None);
            loader.spawn(move |backend, user| async move {
                let result = backend.db.buildings(&user.client_id).await;
                let _ = profile.try_set(Some(user));
                let _ = buildings.try_set(Loadable::from_result(result));
            });
        }
    };
    load();

    let on_refresh = {
        let load = load.clone();
        move |_| load()
    };
    let on_logout = move |_| loader.sign_out();

    let greeting = move || {
        profile.with(|p| {
            let name = p.as_ref().and_then(|p| p.full_name.clone()).unwrap_or_else(|| "User".to_owned());
            format!("Welcome back, {name}!")
        })
    };
    let role = move || profile.with(|p| p.as_ref().map_or("N/A", |p| p.role.as_str()));

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header toolbar">
                <div class="toolbar__identity">
                    <span class="toolbar__greeting">{greeting}</span>
                    <span class="toolbar__role">"Role: " {role}</span>
                </div>
                <span class="toolbar__spacer"></span>
                <button class="btn toolbar__refresh" on:click=on_refresh title="Refresh">
                    "Refresh"
                </button>
                <button class="btn toolbar__logout" on:click=on_logout title="Logout">
                    "Logout"
                </button>
            </header>

            <ErrorMessage message=error/>

            <section class="dashboard-page__section">
                <h2 class="section-title">"Quick Access"</h2>
                <div class="quick-access">
                    <a class="quick-access__card" href="/tenants">
                        <span class="quick-access__icon">"👤"</span>
                        <span class="quick-access__label">"Tenants"</span>
                    </a>
                    <a class="quick-access__card" href="/leases">
                        <span class="quick-access__icon">"📄"</span>
                        <span class="quick-access__label">"Leases"</span>
                    </a>
                </div>
            </section>

            <section class="dashboard-page__section">
                <div class="section-header">
                    <h2 class="section-title">"My Buildings"</h2>
                    <a class="btn btn--small" href="/buildings/new">"+ Add"</a>
                </div>
                {move || match buildings.get() {
                    Loadable::Loading => view! { <Loading/> }.into_any(),
                    Loadable::Failed(message) => view! { <p class="error-message">{message}</p> }.into_any(),
                    Loadable::Ready(items) if items.is_empty() => {
                        view! {
                            <div class="card card--empty">
                                <p class="card__empty-title">"No buildings yet"</p>
                                <p class="card__empty-hint">
                                    "Use the \"+ Add\" button to create your first building"
                                </p>
                            </div>
                        }
                            .into_any()
                    }
                    Loadable::Ready(items) => {
                        let navigate = navigate.clone();
                        items
                            .into_iter()
                            .map(|b| {
                                let navigate = navigate.clone();
                                let href = format!("/buildings/{}", b.id);
                                view! {
                                    <div
                                        class="card building-card"
                                        on:click=move |_| navigate(&href, NavigateOptions::default())
                                    >
                                        <span class="building-card__name">{b.name}</span>
                                        <span class="building-card__address">
                                            {format!("{}, {}", b.address, b.city)}
                                        </span>
                                        <span class="building-card__stats">
                                            <span>{format!("🏢 {} floors", b.total_floors)}</span>
                                            <span>{format!("🚪 {} rooms", b.total_rooms)}</span>
                                            <span>{format!("📊 {}", b.status.as_str())}</span>
                                        </span>
                                    </div>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }
                }}
            </section>
        </div>
    }
}
