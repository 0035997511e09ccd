//! Room details and the add/edit room form.

#[cfg(test)]
#[path = "rooms_test.rs"]
mod rooms_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map, use_query_map};
use records::form::RoomDraft;
use records::{Building, Lease, Room, RoomStatus, RoomType};

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
use crate::util::filter::{Accessor, SelectionChange};

// =============================================================================
// DETAILS
// =============================================================================

/// Everything the details screen shows for one room.
#[derive(Clone, Debug, PartialEq)]
struct RoomOverview {
    room: Room,
    building_name: String,
    leases: Vec<Lease>,
}

impl RoomOverview {
    fn open_lease(&self) -> Option<&Lease> {
        self.leases.iter().find(|l| l.status.is_open())
    }
}

#[component]
pub fn RoomDetailsPage() -> impl IntoView {
    let error = RwSignal::new(None::<String>);
    let loader = ScreenLoader::new(error);
    let navigate = use_navigate();
    let params = use_params_map();
    let room_id = Memo::new(move |_| params.read().get("id").unwrap_or_default());
    let data = RwSignal::new(Loadable::<RoomOverview>::Loading);

    Effect::new({
        let loader = loader.clone();
        move || {
            let id = room_id.get();
            loader.spawn(move |backend, _| async move {
                let room = match backend.db.room(&id).await {
                    Ok(room) => room,
                    Err(e) => {
                        let _ = data.try_set(Loadable::Failed(e.to_string()));
                        return;
                    }
                };
                let (building, leases) =
                    futures::future::join(backend.db.building(&room.building_id), backend.db.leases_by_room(&id))
                        .await;
                let result = leases.map(|leases| RoomOverview {
                    building_name: building.map(|b| b.name).unwrap_or_default(),
                    room,
                    leases,
                });
                let _ = data.try_set(Loadable::from_result(result));
            });
        }
    });

    let set_status = {
        let loader = loader.clone();
        move |status: RoomStatus| {
            let id = room_id.get_untracked();
            loader.spawn(move |backend, _| async move {
                match backend.db.set_room_status(&id, status).await {
                    Ok(room) => {
                        let _ = data.try_update(|d| {
                            if let Loadable::Ready(overview) = d {
                                overview.room = room;
                            }
                        });
                    }
                    Err(e) => {
                        let _ = error.try_set(Some(format!("Failed to update status: {e}")));
                    }
                }
            });
        }
    };

    let on_delete = move |_| {
        if !confirm("Are you sure you want to delete this room? This action cannot be undone.") {
            return;
        }
        let id = room_id.get_untracked();
        let back = data.with_untracked(|d| d.ready().map(|o| format!("/buildings/{}", o.room.building_id)));
        let navigate = navigate.clone();
        loader.spawn(move |backend, _| async move {
            match backend.db.delete_room(&id).await {
                Ok(()) => navigate(back.as_deref().unwrap_or("/"), NavigateOptions::default()),
                Err(e) => {
                    let _ = error.try_set(Some(format!("Failed to delete room: {e}")));
                }
            }
        });
    };

    let title = Signal::derive(move || {
        data.with(|d| d.ready().map(|o| format!("Room {}", o.room.room_number)).unwrap_or_default())
    });
    view! {
        <div class="details-page">
            <PageHeader title=title back="/">
                <a class="btn btn--small" href=move || format!("/rooms/{}/edit", room_id.get())>
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
                Loadable::Ready(overview) => {
                    let set_status = set_status.clone();
                    view! {
                        <RoomBody
                            overview=overview
                            on_status=Callback::new(move |status| set_status(status))
                        />
                    }
                        .into_any()
                }
            }}
        </div>
    }
}

#[component]
fn RoomBody(overview: RoomOverview, on_status: Callback<RoomStatus>) -> impl IntoView {
    let contract = match overview.open_lease() {
        Some(lease) => {
            let tenant = lease.tenant_name().unwrap_or_else(|| "Unknown tenant".to_owned());
            view! {
                <div class="contract-summary">
                    <span class="contract-summary__tenant">{tenant}</span>
                    <span class="contract-summary__dates">
                        {format!("{} to {}", lease.start_date, lease.end_date)}
                    </span>
                    <StatusBadge status=lease.status/>
                    <a class="btn btn--small" href=format!("/contracts/{}", lease.id)>
                        "View Contract Details"
                    </a>
                </div>
            }
                .into_any()
        }
        None => {
            view! {
                <div class="contract-summary contract-summary--empty">
                    <p class="card__empty-title">"No active contract"</p>
                    <a class="btn btn--small" href=format!("/contracts/new?room={}", overview.room.id)>
                        "+ Add Contract"
                    </a>
                </div>
            }
                .into_any()
        }
    };

    let RoomOverview { room, building_name, leases } = overview;
    let current = room.status;
    let rent = format!("{}/month", money(&room.currency, room.rent_amount));
    let deposit = room.deposit_amount.map(|d| money(&room.currency, d));

    view! {
        <section class="card">
            <h2 class="section-title">"Details"</h2>
            <DetailRow label="Building:" value=building_name/>
            <DetailRow label="Floor:" value=room.floor_number.map(|f| f.to_string())/>
            <DetailRow label="Type:" value=room.room_type.label().to_owned()/>
            <DetailRow label="Area:" value=room.area_sqft.map(|a| format!("{a} sq ft"))/>
            <DetailRow label="Bedrooms:" value=room.bedrooms.to_string()/>
            <DetailRow label="Bathrooms:" value=room.bathrooms.to_string()/>
            <DetailRow label="Status:" value=room.status.as_str().to_owned()/>
            <DetailRow label="Available From:" value=room.available_from/>
            <DetailRow label="Description:" value=room.description/>
        </section>
        <section class="card">
            <h2 class="section-title">"Pricing"</h2>
            <DetailRow label="Rent:" value=rent/>
            <DetailRow label="Deposit:" value=deposit/>
        </section>
        <section class="card">
            <h2 class="section-title">"Update Status"</h2>
            <div class="status-buttons">
                {RoomStatus::ALL
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
            <h2 class="section-title">"Contract"</h2>
            {contract}
        </section>
        <section class="card">
            <h2 class="section-title">{format!("Contract History ({})", leases.len())}</h2>
            {if leases.is_empty() {
                view! { <p class="card__empty-title">"No contracts yet"</p> }.into_any()
            } else {
                leases
                    .into_iter()
                    .map(|lease| {
                        view! {
                            <a class="lease-row" href=format!("/contracts/{}", lease.id)>
                                <span class="lease-row__tenant">{lease.tenant_name()}</span>
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

/// Secondary line of the building picker, searchable by street or city.
fn building_location() -> Accessor<Building> {
    Accessor::derive(|b: &Building| format!("{}, {}", b.address, b.city))
}

/// Add (`/rooms/new?building=ID`) or edit (`/rooms/:id/edit`) a room. A
/// room's building is fixed once created.
#[component]
pub fn RoomFormPage() -> impl IntoView {
    let error = RwSignal::new(None::<String>);
    let loader = ScreenLoader::new(error);
    let navigate = use_navigate();
    let params = use_params_map();
    let query = use_query_map();
    let editing = Memo::new(move |_| params.read().get("id"));
    let draft = RwSignal::new(RoomDraft {
        building_id: query.read_untracked().get("building"),
        ..RoomDraft::default()
    });
    let buildings = RwSignal::new(Vec::<Building>::new());
    let busy = RwSignal::new(false);

    loader.spawn(move |backend, profile| async move {
        match backend.db.buildings(&profile.client_id).await {
            Ok(items) => {
                let _ = buildings.try_set(items);
            }
            Err(e) => {
                let _ = error.try_set(Some(format!("Failed to load buildings: {e}")));
            }
        }
    });

    Effect::new({
        let loader = loader.clone();
        move || {
            let Some(id) = editing.get() else {
                return;
            };
            loader.spawn(move |backend, _| async move {
                match backend.db.room(&id).await {
                    Ok(room) => {
                        let _ = draft.try_set(RoomDraft::from_room(&room));
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
                Some(id) => backend.db.update_room(id, &payload).await,
                None => backend.db.create_room(&payload).await,
            };
            match saved {
                Ok(room) => navigate(&format!("/rooms/{}", room.id), NavigateOptions::default()),
                Err(e) => {
                    let _ = error.try_set(Some(e.to_string()));
                }
            }
        });
    };

    let selected_building = Signal::derive(move || {
        draft.with(|d| {
            let id = d.building_id.as_deref()?;
            buildings.with(|all| all.iter().find(|b| b.id == id).cloned())
        })
    });
    let on_building = Callback::new(move |change: SelectionChange<Building>| {
        draft.update(|d| {
            d.building_id = match change {
                SelectionChange::Selected(building) => Some(building.id),
                SelectionChange::Cleared => None,
            };
        });
    });

    let room_type = Binding {
        value: Signal::derive(move || draft.with(|d| d.room_type.as_str().to_owned())),
        set: Callback::new(move |raw: String| draft.update(|d| d.room_type = RoomType::parse(&raw))),
    };
    let type_options = RoomType::ALL.iter().map(|t| (t.as_str(), t.label())).collect::<Vec<_>>();
    let status = Binding {
        value: Signal::derive(move || draft.with(|d| d.status.as_str().to_owned())),
        set: Callback::new(move |raw: String| draft.update(|d| d.status = RoomStatus::parse(&raw))),
    };
    let status_options = RoomStatus::ALL.iter().map(|s| (s.as_str(), s.as_str())).collect::<Vec<_>>();

    let title = Signal::derive(move || {
        let text = if editing.with(Option::is_some) { "Edit Room" } else { "Add New Room" };
        text.to_owned()
    });
    let cancel_href = move || match editing.get() {
        Some(id) => format!("/rooms/{id}"),
        None => draft.with(|d| d.building_id.as_ref().map_or_else(|| "/".to_owned(), |b| format!("/buildings/{b}"))),
    };

    view! {
        <div class="form-page">
            <PageHeader title=title back="/"/>
            <ErrorMessage message=error/>
            <form class="form" on:submit=on_submit>
                <LookupInput
                    label="Building *"
                    records=buildings
                    primary=Accessor::from("name")
                    secondary=building_location()
                    value=selected_building
                    on_select=on_building
                    disabled=Signal::derive(move || editing.with(Option::is_some))
                    placeholder="Select a building"
                    search_placeholder="Search buildings..."
                    empty_text="No buildings found. Please create a building first."
                />
                <TextField label="Room Number" bind=bind!(draft, room_number) required=true/>
                <TextField label="Floor Number" bind=bind!(draft, floor_number) input_type="number"/>
                <SelectField label="Room Type" bind=room_type options=type_options/>
                <TextField label="Area (sq ft)" bind=bind!(draft, area_sqft) input_type="number"/>
                <TextField label="Bedrooms" bind=bind!(draft, bedrooms) input_type="number" required=true/>
                <TextField label="Bathrooms" bind=bind!(draft, bathrooms) input_type="number" required=true/>
                <TextField label="Monthly Rent" bind=bind!(draft, rent_amount) input_type="number" required=true/>
                <TextField label="Deposit" bind=bind!(draft, deposit_amount) input_type="number"/>
                <TextField label="Currency" bind=bind!(draft, currency) placeholder="USD"/>
                <SelectField label="Status" bind=status options=status_options/>
                <TextArea label="Description" bind=bind!(draft, description)/>
                <div class="form__actions">
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        {move || if editing.with(Option::is_some) { "Update Room" } else { "Create Room" }}
                    </button>
                    <a class="btn" href=cancel_href>"Cancel"</a>
                </div>
            </form>
        </div>
    }
}
