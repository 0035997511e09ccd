//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server renders `shell` for every page request. The shell carries the
//! public backend settings in `<meta>` tags; the browser reads them back when
//! `App` builds the `Backend`. Routing only happens after hydration, because
//! the session gate renders its loading indicator until the first session
//! check resolves.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::session_gate::SessionGate;
use crate::net::supabase::{ANON_KEY_META, Backend, SupabaseConfig, URL_META};
use crate::pages::buildings::{BuildingDetailsPage, BuildingFormPage};
use crate::pages::contracts::{ContractDetailsPage, ContractFormPage, LeasesPage};
use crate::pages::dashboard::DashboardPage;
use crate::pages::forgot_password::ForgotPasswordPage;
use crate::pages::login::LoginPage;
use crate::pages::rooms::{RoomDetailsPage, RoomFormPage};
use crate::pages::signup::SignUpPage;
use crate::pages::tenants::{TenantDetailsPage, TenantFormPage, TenantsPage};
use crate::util::auth::AuthNotice;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions, config: SupabaseConfig) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <meta name=URL_META content=config.url/>
                <meta name=ANON_KEY_META content=config.anon_key/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the backend and the auth notice, then lets the session gate pick
/// the route tree.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let backend = use_context::<Backend>().unwrap_or_else(Backend::from_document);
    provide_context(backend);
    provide_context(AuthNotice::new());

    view! {
        <Stylesheet id="leptos" href="/pkg/propdesk.css"/>
        <Title text="PropDesk"/>

        <Router>
            <SessionGate auth_flow=|| view! { <AuthRoutes/> } main_flow=|| view! { <MainRoutes/> }/>
        </Router>
    }
}

/// Screens reachable while signed out.
#[component]
fn AuthRoutes() -> impl IntoView {
    view! {
        <Routes fallback=|| view! { <Redirect path="/login"/> }>
            <Route path=StaticSegment("") view=LoginPage/>
            <Route path=StaticSegment("login") view=LoginPage/>
            <Route path=StaticSegment("signup") view=SignUpPage/>
            <Route path=StaticSegment("forgot-password") view=ForgotPasswordPage/>
        </Routes>
    }
}

/// Screens reachable while signed in. Static `new` segments come before the
/// `:id` routes they would otherwise match.
#[component]
fn MainRoutes() -> impl IntoView {
    view! {
        <Routes fallback=|| view! { <Redirect path="/"/> }>
            <Route path=StaticSegment("") view=DashboardPage/>

            <Route path=(StaticSegment("buildings"), StaticSegment("new")) view=BuildingFormPage/>
            <Route path=(StaticSegment("buildings"), ParamSegment("id")) view=BuildingDetailsPage/>
            <Route
                path=(StaticSegment("buildings"), ParamSegment("id"), StaticSegment("edit"))
                view=BuildingFormPage
            />

            <Route path=(StaticSegment("rooms"), StaticSegment("new")) view=RoomFormPage/>
            <Route path=(StaticSegment("rooms"), ParamSegment("id")) view=RoomDetailsPage/>
            <Route path=(StaticSegment("rooms"), ParamSegment("id"), StaticSegment("edit")) view=RoomFormPage/>

            <Route path=StaticSegment("tenants") view=TenantsPage/>
            <Route path=(StaticSegment("tenants"), StaticSegment("new")) view=TenantFormPage/>
            <Route path=(StaticSegment("tenants"), ParamSegment("id")) view=TenantDetailsPage/>
            <Route
                path=(StaticSegment("tenants"), ParamSegment("id"), StaticSegment("edit"))
                view=TenantFormPage
            />

            <Route path=StaticSegment("leases") view=LeasesPage/>
            <Route path=(StaticSegment("contracts"), StaticSegment("new")) view=ContractFormPage/>
            <Route path=(StaticSegment("contracts"), ParamSegment("id")) view=ContractDetailsPage/>
            <Route
                path=(StaticSegment("contracts"), ParamSegment("id"), StaticSegment("edit"))
                view=ContractFormPage
            />
        </Routes>
    }
}
