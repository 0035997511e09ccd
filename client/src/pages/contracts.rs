//! Lease list, contract details and the add/edit contract form.
//!
//! SYSTEM CONTEXT
//! ==============
//! A contract is a lease row joined with its tenant and room/building. The
//! list at `/leases` shows every lease of the client; a room's details screen
//! links to `/contracts/new?room=ID` for new contracts.
//!
//! DESIGN
//! ======
//! - The "Expiring Soon" view is computed locally from the loaded list with
//!   today's date, so both toggle counts come from one fetch.
//! - One open lease per room is enforced by the data service on create and
//!   on status changes; its conflict message is shown as-is.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map, use_query_map};
use records::form::LeaseDraft;
use records::lease::{EXPIRY_WINDOW_DAYS, days_until_expiry, expiring_leases, expiry_banner, is_expiring_soon};
use records::{Lease, LeaseStatus, PaymentFrequency, Tenant};

use crate::components::detail_row::DetailRow;
use crate::components::error_message::ErrorMessage;
use crate::components::field::{Binding, SelectField, TextArea, TextField, bind};
use crate::components::loading::Loading;
use crate::components::lookup_input::LookupInput;
use crate::components::page_header::PageHeader;
use crate::components::status_badge::StatusBadge;
use crate::state::resource::Loadable;
use crate::util::auth::ScreenLoader;
use crate::util::browser::{confirm, money};
use crate::util::clock;
use crate::util::filter::{Accessor, SelectionChange};

// =============================================================================
// LIST
// =============================================================================

#[component]
pub fn LeasesPage() -> impl IntoView {
    let error = RwSignal::new(None::<String>);
    let loader = ScreenLoader::new(error);
    let leases = RwSignal::new(Loadable::<Vec<Lease>>::Loading);
    let expiring_only = RwSignal::new(false);
    let today = clock::today();

    loader.spawn(move |backend, profile| async move {
        let result = backend.db.leases(&profile.client_id).await;
        let _ = leases.try_set(Loadable::from_result(result));
    });

    let all_count = move || leases.with(|l| l.ready().map_or(0, Vec::len));
    let expiring = Memo::new(move |_| {
        leases.with(|l| l.ready().map(|all| expiring_leases(all, today, EXPIRY_WINDOW_DAYS)).unwrap_or_default())
    });

    view! {
        <div class="list-page">
            <PageHeader title="Leases".to_owned() back="/"/>
            <ErrorMessage message=error/>
            <div class="filter-toggle">
                <button
                    class="filter-toggle__option"
                    class:filter-toggle__option--active=move || !expiring_only.get()
                    on:click=move |_| expiring_only.set(false)
                >
                    {move || format!("All ({})", all_count())}
                </button>
                <button
                    class="filter-toggle__option"
                    class:filter-toggle__option--active=move || expiring_only.get()
                    on:click=move |_| expiring_only.set(true)
                >
                    {move || format!("Expiring Soon ({})", expiring.with(Vec::len))}
                </button>
            </div>
            {move || match leases.get() {
                Loadable::Loading => view! { <Loading/> }.into_any(),
                Loadable::Failed(message) => view! { <p class="error-message">{message}</p> }.into_any(),
                Loadable::Ready(all) => {
                    let shown = if expiring_only.get() { expiring.get() } else { all };
                    if shown.is_empty() {
                        let text = if expiring_only.get() { "No leases expiring soon" } else { "No leases yet" };
                        return view! { <p class="card__empty-title">{text}</p> }.into_any();
                    }
                    shown
                        .into_iter()
                        .map(|lease| view! { <LeaseCard lease=lease today=today/> })
                        .collect_view()
                        .into_any()
                }
            }}
        </div>
    }
}

#[component]
fn LeaseCard(lease: Lease, today: time::Date) -> impl IntoView {
    let banner = is_expiring_soon(&lease, today, EXPIRY_WINDOW_DAYS)
        .then(|| days_until_expiry(&lease, today))
        .flatten()
        .map(|days| view! { <div class="lease-card__banner">{expiry_banner(days)}</div> });
    let tenant = lease.tenant_name().unwrap_or_else(|| "Unknown tenant".to_owned());
    view! {
        <a class="card lease-card" href=format!("/contracts/{}", lease.id)>
            {banner}
            <div class="lease-card__header">
                <span class="lease-card__tenant">{tenant}</span>
                <StatusBadge status=lease.status/>
            </div>
            <span class="lease-card__room">{lease.room_label()}</span>
            <span class="lease-card__dates">{format!("{} to {}", lease.start_date, lease.end_date)}</span>
            <span class="lease-card__rent">
                {format!("{}/{}", money("USD", lease.rent_amount), lease.payment_frequency.as_str())}
            </span>
        </a>
    }
}

// =============================================================================
// DETAILS
// =============================================================================

#[component]
pub fn ContractDetailsPage() -> impl IntoView {
    let error = RwSignal::new(None::<String>);
    let loader = ScreenLoader::new(error);
    let navigate = use_navigate();
    let params = use_params_map();
    let lease_id = Memo::new(move |_| params.read().get("id").unwrap_or_default());
    let data = RwSignal::new(Loadable::<Lease>::Loading);

    Effect::new({
        let loader = loader.clone();
        move || {
            let id = lease_id.get();
            loader.spawn(move |backend, _| async move {
                let result = backend.db.lease(&id).await;
                let _ = data.try_set(Loadable::from_result(result));
            });
        }
    });

    let set_status = {
        let loader = loader.clone();
        move |status: LeaseStatus| {
            let id = lease_id.get_untracked();
            error.set(None);
            loader.spawn(move |backend, _| async move {
                match backend.db.set_lease_status(&id, status).await {
                    Ok(updated) => {
                        let _ = data.try_update(|d| {
                            if let Loadable::Ready(lease) = d {
                                lease.status = updated.status;
                            }
                        });
                    }
                    Err(e) => {
                        let _ = error.try_set(Some(e.to_string()));
                    }
                }
            });
        }
    };

    let on_delete = move |_| {
        if !confirm("Are you sure you want to delete this contract? This action cannot be undone.") {
            return;
        }
        let id = lease_id.get_untracked();
        let back = data.with_untracked(|d| d.ready().map(|l| format!("/rooms/{}", l.room_id)));
        let navigate = navigate.clone();
        loader.spawn(move |backend, _| async move {
            match backend.db.delete_lease(&id).await {
                Ok(()) => navigate(back.as_deref().unwrap_or("/leases"), NavigateOptions::default()),
                Err(e) => {
                    let _ = error.try_set(Some(format!("Failed to delete contract: {e}")));
                }
            }
        });
    };

    let title = Signal::derive(move || {
        data.with(|d| {
            d.ready()
                .and_then(|l| l.lease_number.clone())
                .unwrap_or_else(|| "Contract Details".to_owned())
        })
    });

    view! {
        <div class="details-page">
            <PageHeader title=title back="/leases">
                <a class="btn btn--small" href=move || format!("/contracts/{}/edit", lease_id.get())>
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
                Loadable::Ready(lease) => {
                    let set_status = set_status.clone();
                    view! {
                        <ContractBody lease=lease on_status=Callback::new(move |status| set_status(status))/>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}

#[component]
fn ContractBody(lease: Lease, on_status: Callback<LeaseStatus>) -> impl IntoView {
    let current = lease.status;
    let tenant = lease.tenant_name();
    let tenant_phone = lease.tenants.as_ref().and_then(|t| t.phone.clone());
    let room = lease.room_label();
    let rent = money("USD", lease.rent_amount);
    let deposit = lease.deposit_amount.map(|d| money("USD", d));

    view! {
        <section class="card">
            <div class="section-header">
                <h2 class="section-title">"Status"</h2>
                <StatusBadge status=current/>
            </div>
            <div class="status-buttons">
                {LeaseStatus::SETTABLE
                    .into_iter()
                    .map(|status| {
                        view! {
                            <button
                                class="btn btn--small"
                                class:btn--active=status == current
                                disabled=status == current
                                on:click=move |_| on_status.run(status)
                            >
                                {status.as_str()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
        <section class="card">
            <h2 class="section-title">"Parties"</h2>
            <a class="detail-link" href=format!("/tenants/{}", lease.tenant_id)>
                <DetailRow label="Tenant:" value=tenant/>
            </a>
            <DetailRow label="Phone:" value=tenant_phone/>
            <a class="detail-link" href=format!("/rooms/{}", lease.room_id)>
                <DetailRow label="Room:" value=room/>
            </a>
        </section>
        <section class="card">
            <h2 class="section-title">"Terms"</h2>
            <DetailRow label="Start Date:" value=lease.start_date/>
            <DetailRow label="End Date:" value=lease.end_date/>
            <DetailRow label="Rent:" value=rent/>
            <DetailRow label="Deposit:" value=deposit/>
            <DetailRow label="Payment Due Day:" value=lease.payment_due_day.to_string()/>
            <DetailRow label="Payment Frequency:" value=lease.payment_frequency.as_str().to_owned()/>
            <DetailRow label="Notes:" value=lease.notes/>
        </section>
    }
}

// =============================================================================
// FORM
// =============================================================================

/// Add (`/contracts/new?room=ID`) or edit (`/contracts/:id/edit`) a contract.
#[component]
pub fn ContractFormPage() -> impl IntoView {
    let error = RwSignal::new(None::<String>);
    let loader = ScreenLoader::new(error);
    let navigate = use_navigate();
    let params = use_params_map();
    let query = use_query_map();
    let editing = Memo::new(move |_| params.read().get("id"));
    let room_id = RwSignal::new(query.read_untracked().get("room"));
    let room_label = RwSignal::new(None::<String>);
    // Tenant of the lease being edited; the picker is locked to it.
    let fixed_tenant = RwSignal::new(None::<String>);
    let draft = RwSignal::new(LeaseDraft::default());
    let tenants = RwSignal::new(Vec::<Tenant>::new());
    let busy = RwSignal::new(false);

    loader.spawn(move |backend, profile| async move {
        match backend.db.tenants(&profile.client_id).await {
            Ok(items) => {
                let _ = tenants.try_set(items);
            }
            Err(e) => {
                let _ = error.try_set(Some(format!("Failed to load tenants: {e}")));
            }
        }
    });

    Effect::new({
        let loader = loader.clone();
        move || match editing.get() {
            Some(id) => loader.spawn(move |backend, _| async move {
                match backend.db.lease(&id).await {
                    Ok(lease) => {
                        let _ = room_id.try_set(Some(lease.room_id.clone()));
                        let _ = room_label.try_set(lease.room_label());
                        let _ = fixed_tenant.try_set(Some(lease.tenant_id.clone()));
                        let _ = draft.try_set(LeaseDraft::from_lease(&lease));
                    }
                    Err(e) => {
                        let _ = error.try_set(Some(e.to_string()));
                    }
                }
            }),
            None => {
                let Some(id) = room_id.get_untracked() else {
                    return;
                };
                loader.spawn(move |backend, _| async move {
                    match backend.db.room(&id).await {
                        Ok(room) => {
                            let _ = room_label.try_set(Some(format!("Room {}", room.room_number)));
                            let _ = draft.try_set(LeaseDraft::for_room(&room));
                        }
                        Err(e) => {
                            let _ = error.try_set(Some(e.to_string()));
                        }
                    }
                });
            }
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
        let editing = editing.get();
        let creating = editing.is_none();
        let Some(room) = room_id.get() else {
            error.set(Some("No room selected for this contract".to_owned()));
            return;
        };
        let snapshot = draft.get();
        if let Err(e) = snapshot.validate("", &room, creating) {
            error.set(Some(e.to_string()));
            return;
        }
        busy.set(true);
        error.set(None);
        let navigate = navigate.clone();
        loader.spawn(move |backend, profile| async move {
            let payload = match snapshot.validate(&profile.client_id, &room, creating) {
                Ok(payload) => payload,
                Err(e) => {
                    let _ = error.try_set(Some(e.to_string()));
                    return;
                }
            };
            let saved = match &editing {
                Some(id) => backend.db.update_lease(id, &payload).await,
                None => backend.db.create_lease(&payload).await,
            };
            match saved {
                Ok(lease) => navigate(&format!("/contracts/{}", lease.id), NavigateOptions::default()),
                Err(e) => {
                    let _ = error.try_set(Some(e.to_string()));
                }
            }
        });
    };

    let selected_tenant = Signal::derive(move || {
        let id = draft.with(|d| d.tenant_id.clone()).or_else(|| fixed_tenant.get())?;
        tenants.with(|all| all.iter().find(|t| t.id == id).cloned())
    });
    let on_tenant = Callback::new(move |change: SelectionChange<Tenant>| {
        draft.update(|d| {
            d.tenant_id = match change {
                SelectionChange::Selected(tenant) => Some(tenant.id),
                SelectionChange::Cleared => None,
            };
        });
    });

    let frequency = Binding {
        value: Signal::derive(move || draft.with(|d| d.payment_frequency.as_str().to_owned())),
        set: Callback::new(move |raw: String| draft.update(|d| d.payment_frequency = PaymentFrequency::parse(&raw))),
    };
    let frequency_options = PaymentFrequency::ALL.iter().map(|f| (f.as_str(), f.as_str())).collect::<Vec<_>>();

    let title = Signal::derive(move || {
        let text = if editing.with(Option::is_some) { "Edit Contract" } else { "New Contract" };
        text.to_owned()
    });
    let cancel_href = move || match (editing.get(), room_id.get()) {
        (Some(id), _) => format!("/contracts/{id}"),
        (None, Some(room)) => format!("/rooms/{room}"),
        (None, None) => "/leases".to_owned(),
    };

    view! {
        <div class="form-page">
            <PageHeader title=title back="/leases"/>
            <ErrorMessage message=error/>
            {move || room_label.get().map(|label| view! { <p class="form__context">{label}</p> })}
            <form class="form" on:submit=on_submit>
                <LookupInput
                    label="Tenant *"
                    records=tenants
                    primary=Accessor::derive(Tenant::full_name)
                    secondary=Accessor::from("phone")
                    value=selected_tenant
                    on_select=on_tenant
                    placeholder="Select a tenant"
                    search_placeholder="Search tenants..."
                    empty_text="No tenants found. Please create a tenant first."
                    disabled=Signal::derive(move || editing.with(Option::is_some))
                />
                <TextField label="Lease Number" bind=bind!(draft, lease_number)/>
                <TextField label="Start Date" bind=bind!(draft, start_date) placeholder="YYYY-MM-DD" required=true/>
                <TextField label="End Date" bind=bind!(draft, end_date) placeholder="YYYY-MM-DD" required=true/>
                <TextField label="Monthly Rent" bind=bind!(draft, rent_amount) input_type="number" required=true/>
                <TextField label="Deposit" bind=bind!(draft, deposit_amount) input_type="number"/>
                <TextField label="Payment Due Day" bind=bind!(draft, payment_due_day) input_type="number"/>
                <SelectField label="Payment Frequency" bind=frequency options=frequency_options/>
                <TextArea label="Notes" bind=bind!(draft, notes)/>
                <div class="form__actions">
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        {move || if editing.with(Option::is_some) { "Update Contract" } else { "Create Contract" }}
                    </button>
                    <a class="btn" href=cancel_href>"Cancel"</a>
                </div>
            </form>
        </div>
    }
}
