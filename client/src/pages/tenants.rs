//! Tenant list, details and the add/edit tenant form.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};
use records::form::TenantDraft;
use records::{Lease, Tenant, TenantStatus};

use crate::components::detail_row::DetailRow;
use crate::components::error_message::ErrorMessage;
use crate::components::field::{Binding, SelectField, TextArea, TextField, bind};
use crate::components::list_view::ListView;
use crate::components::loading::Loading;
use crate::components::page_header::PageHeader;
use crate::components::status_badge::StatusBadge;
use crate::state::resource::Loadable;
use crate::util::auth::ScreenLoader;
use crate::util::browser::{confirm, money};
use crate::util::filter::Accessor;

// =============================================================================
// LIST
// =============================================================================

#[component]
pub fn TenantsPage() -> impl IntoView {
    let error = RwSignal::new(None::<String>);
    let loader = ScreenLoader::new(error);
    let navigate = use_navigate();
    let tenants = RwSignal::new(Loadable::<Vec<Tenant>>::Loading);

    loader.spawn(move |backend, profile| async move {
        let result = backend.db.tenants(&profile.client_id).await;
        let _ = tenants.try_set(Loadable::from_result(result));
    });

    let on_select = Callback::new(move |tenant: Tenant| {
        navigate(&format!("/tenants/{}", tenant.id), NavigateOptions::default());
    });
    let items = Signal::derive(move || tenants.with(|t| t.ready().cloned().unwrap_or_default()));

    view! {
        <div class="list-page">
            <PageHeader title="Tenants".to_owned() back="/">
                <a class="btn btn--small" href="/tenants/new">"+ Add"</a>
            </PageHeader>
            <ErrorMessage message=error/>
            {move || match tenants.with(|t| t.error().map(str::to_owned)) {
                Some(message) => view! { <p class="error-message">{message}</p> }.into_any(),
                None if tenants.with(Loadable::is_loading) => view! { <Loading/> }.into_any(),
                None => {
                    view! {
                        <ListView
                            records=items
                            primary=Accessor::derive(Tenant::full_name)
                            secondary=Accessor::from("phone")
                            on_select=on_select
                            search_placeholder="Search tenants..."
                            empty_text="No tenants yet"
                        />
                    }
                        .into_any()
                }
            }}
        </div>
    }
}

// =============================================================================
// DETAILS
// =============================================================================

#[component]
pub fn TenantDetailsPage() -> impl IntoView {
    let error = RwSignal::new(None::<String>);
    let loader = ScreenLoader::new(error);
    let navigate = use_navigate();
    let params = use_params_map();
    let tenant_id = Memo::new(move |_| params.read().get("id").unwrap_or_default());
    let data = RwSignal::new(Loadable::<(Tenant, Vec<Lease>)>::Loading);

    Effect::new({
        let loader = loader.clone();
        move || {
            let id = tenant_id.get();
            loader.spawn(move |backend, _| async move {
                let (tenant, leases) =
                    futures::future::join(backend.db.tenant(&id), backend.db.leases_by_tenant(&id)).await;
                let result = tenant.and_then(|t| leases.map(|l| (t, l)));
                let _ = data.try_set(Loadable::from_result(result));
            });
        }
    });

    let on_delete = move |_| {
        if !confirm("Are you sure you want to delete this tenant? This action cannot be undone.") {
            return;
        }
        let id = tenant_id.get_untracked();
        let navigate = navigate.clone();
        loader.spawn(move |backend, _| async move {
            match backend.db.delete_tenant(&id).await {
                Ok(()) => navigate("/tenants", NavigateOptions::default()),
                Err(e) => {
                    let _ = error.try_set(Some(format!("Failed to delete tenant: {e}")));
                }
            }
        });
    };

    let title = Signal::derive(move || data.with(|d| d.ready().map(|(t, _)| t.full_name()).unwrap_or_default()));

    view! {
        <div class="details-page">
            <PageHeader title=title back="/tenants">
                <a class="btn btn--small" href=move || format!("/tenants/{}/edit", tenant_id.get())>
                    "Edit"
                </a>
                <button class="btn btn--small btn--danger" on:click=on_delete>
                    "Delete"
                </button>
            </PageHeader>
            <ErrorMessage message=error/>
            {move || match data.get() {
                Loadable::Loading => view! { <Loading/> }.into_any(),
                Loadable::Failed(message) => view! { <p class="error-message">{message}</p> }.into_any(),
                Loadable::Ready((tenant, leases)) => view! { <TenantBody tenant=tenant leases=leases/> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn TenantBody(tenant: Tenant, leases: Vec<Lease>) -> impl IntoView {
    let income = tenant.monthly_income.map(|m| money("USD", m));
    view! {
        <section class="card">
            <h2 class="section-title">"Contact"</h2>
            <DetailRow label="Phone:" value=tenant.phone/>
            <DetailRow label="Email:" value=tenant.email/>
            <DetailRow label="Current Address:" value=tenant.current_address/>
            <DetailRow label="Status:" value=tenant.status.as_str().to_owned()/>
        </section>
        <section class="card">
            <h2 class="section-title">"Personal"</h2>
            <DetailRow label="Date of Birth:" value=tenant.date_of_birth/>
            <DetailRow label="National ID:" value=tenant.national_id/>
            <DetailRow label="Occupation:" value=tenant.occupation/>
            <DetailRow label="Employer:" value=tenant.employer/>
            <DetailRow label="Monthly Income:" value=income/>
        </section>
        <section class="card">
            <h2 class="section-title">"Emergency Contact"</h2>
            <DetailRow label="Name:" value=tenant.emergency_contact_name/>
            <DetailRow label="Phone:" value=tenant.emergency_contact_phone/>
        </section>
        <DetailRow label="Notes:" value=tenant.notes/>
        <section class="card">
            <h2 class="section-title">{format!("Contracts ({})", leases.len())}</h2>
            {if leases.is_empty() {
                view! { <p class="card__empty-title">"No contracts yet"</p> }.into_any()
            } else {
                leases
                    .into_iter()
                    .map(|lease| {
                        view! {
                            <a class="lease-row" href=format!("/contracts/{}", lease.id)>
                                <span class="lease-row__room">{lease.room_label()}</span>
                                <span class="lease-row__dates">
                                    {format!("{} to {}", lease.start_date, lease.end_date)}
                                </span>
                                <StatusBadge status=lease.status/>
                            </a>
                        }
                    })
                    .collect_view()
                    .into_any()
            }}
        </section>
    }
}

// =============================================================================
// FORM
// =============================================================================

/// Add (`/tenants/new`) or edit (`/tenants/:id/edit`) a tenant.
#[component]
pub fn TenantFormPage() -> impl IntoView {
    let error = RwSignal::new(None::<String>);
    let loader = ScreenLoader::new(error);
    let navigate = use_navigate();
    let params = use_params_map();
    let editing = Memo::new(move |_| params.read().get("id"));
    let draft = RwSignal::new(TenantDraft::default());
    let busy = RwSignal::new(false);

    Effect::new({
        let loader = loader.clone();
        move || {
            let Some(id) = editing.get() else {
                return;
            };
            loader.spawn(move |backend, _| async move {
                match backend.db.tenant(&id).await {
                    Ok(tenant) => {
                        let _ = draft.try_set(TenantDraft::from_tenant(&tenant));
                    }
                    Err(e) => {
                        let _ = error.try_set(Some(e.to_string()));
                    }
                }
            });
        }
    });

    Effect::new(move || {
        if error.with(Option::is_some) {
            busy.set(false);
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let snapshot = draft.get();
        if let Err(e) = snapshot.validate("") {
            error.set(Some(e.to_string()));
            return;
        }
        busy.set(true);
        error.set(None);
        let editing = editing.get();
        let navigate = navigate.clone();
        loader.spawn(move |backend, profile| async move {
            let payload = match snapshot.validate(&profile.client_id) {
                Ok(payload) => payload,
                Err(e) => {
                    let _ = error.try_set(Some(e.to_string()));
                    return;
                }
            };
            let saved = match &editing {
                Some(id) => backend.db.update_tenant(id, &payload).await,
                None => backend.db.create_tenant(&payload).await,
            };
            match saved {
                Ok(tenant) => navigate(&format!("/tenants/{}", tenant.id), NavigateOptions::default()),
                Err(e) => {
                    let _ = error.try_set(Some(e.to_string()));
                }
            }
        });
    };

    let title = Signal::derive(move || {
        let text = if editing.with(Option::is_some) { "Edit Tenant" } else { "Add New Tenant" };
        text.to_owned()
    });
    let status = Binding {
        value: Signal::derive(move || draft.with(|d| d.status.as_str().to_owned())),
        set: Callback::new(move |raw: String| draft.update(|d| d.status = TenantStatus::parse(&raw))),
    };
    let status_options = TenantStatus::ALL.iter().map(|s| (s.as_str(), s.as_str())).collect::<Vec<_>>();
    let cancel_href = move || editing.get().map_or_else(|| "/tenants".to_owned(), |id| format!("/tenants/{id}"));

    view! {
        <div class="form-page">
            <PageHeader title=title back="/tenants"/>
            <ErrorMessage message=error/>
            <form class="form" on:submit=on_submit>
                <h3 class="form__section">"Basic Information"</h3>
                <TextField label="First Name" bind=bind!(draft, first_name) required=true/>
                <TextField label="Last Name" bind=bind!(draft, last_name) required=true/>
                <TextField label="Phone" bind=bind!(draft, phone) input_type="tel" required=true/>
                <TextField label="Email" bind=bind!(draft, email) input_type="email"/>
                <TextField label="Date of Birth" bind=bind!(draft, date_of_birth) placeholder="YYYY-MM-DD"/>
                <TextField label="National ID" bind=bind!(draft, national_id)/>
                <TextField label="Current Address" bind=bind!(draft, current_address)/>

                <h3 class="form__section">"Employment"</h3>
                <TextField label="Occupation" bind=bind!(draft, occupation)/>
                <TextField label="Employer" bind=bind!(draft, employer)/>
                <TextField label="Monthly Income" bind=bind!(draft, monthly_income) input_type="number"/>

                <h3 class="form__section">"Emergency Contact"</h3>
                <TextField label="Contact Name" bind=bind!(draft, emergency_contact_name)/>
                <TextField label="Contact Phone" bind=bind!(draft, emergency_contact_phone) input_type="tel"/>

                <SelectField label="Status" bind=status options=status_options/>
                <TextArea label="Notes" bind=bind!(draft, notes)/>
                <div class="form__actions">
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        {move || if editing.with(Option::is_some) { "Update Tenant" } else { "Create Tenant" }}
                    </button>
                    <a class="btn" href=cancel_href>"Cancel"</a>
                </div>
            </form>
        </div>
    }
}
