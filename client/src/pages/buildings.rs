//! Building details and the add/edit building form.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};
use records::form::BuildingDraft;
use records::{Building, BuildingType, Room};

use crate::components::detail_row::DetailRow;
use crate::components::error_message::ErrorMessage;
use crate::components::field::{Binding, SelectField, TextArea, TextField, bind};
use crate::components::loading::Loading;
use crate::components::page_header::PageHeader;
use crate::state::resource::Loadable;
use crate::util::auth::ScreenLoader;
use crate::util::browser::{confirm, money};

// =============================================================================
// DETAILS
// =============================================================================

#[component]
pub fn BuildingDetailsPage() -> impl IntoView {
    let error = RwSignal::new(None::<String>);
    let loader = ScreenLoader::new(error);
    let navigate = use_navigate();
    let params = use_params_map();
    let building_id = Memo::new(move |_| params.read().get("id").unwrap_or_default());
    let data = RwSignal::new(Loadable::<(Building, Vec<Room>)>::Loading);

    Effect::new({
        let loader = loader.clone();
        move || {
            let id = building_id.get();
            loader.spawn(move |backend, _| async move {
                let (building, rooms) =
                    futures::future::join(backend.db.building(&id), backend.db.rooms_by_building(&id)).await;
                let result = building.and_then(|b| rooms.map(|r| (b, r)));
                let _ = data.try_set(Loadable::from_result(result));
            });
        }
    });

    let on_delete = move |_| {
        if !confirm("Are you sure you want to delete this building? This action cannot be undone.") {
            return;
        }
        let id = building_id.get_untracked();
        let navigate = navigate.clone();
        loader.spawn(move |backend, _| async move {
            match backend.db.delete_building(&id).await {
                Ok(()) => navigate("/", NavigateOptions::default()),
                Err(e) => {
                    let _ = error.try_set(Some(format!("Failed to delete building: {e}")));
                }
            }
        });
    };

    let title = Signal::derive(move || data.with(|d| d.ready().map(|(b, _)| b.name.clone()).unwrap_or_default()));

    view! {
        <div class="details-page">
            <PageHeader title=title back="/">
                <a class="btn btn--small" href=move || format!("/buildings/{}/edit", building_id.get())>
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
                Loadable::Ready((building, rooms)) => view! { <BuildingBody building=building rooms=rooms/> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn BuildingBody(building: Building, rooms: Vec<Room>) -> impl IntoView {
    let add_room_href = format!("/rooms/new?building={}", building.id);
    let room_count = rooms.len();
    view! {
        <section class="card">
            <h2 class="section-title">"Details"</h2>
            <DetailRow label="Address:" value=building.address/>
            <DetailRow label="City:" value=building.city/>
            <DetailRow label="State:" value=building.state/>
            <DetailRow label="Country:" value=building.country/>
            <DetailRow label="Postal Code:" value=building.postal_code/>
            <DetailRow label="Type:" value=building.building_type.as_str().to_owned()/>
            <DetailRow label="Status:" value=building.status.as_str().to_owned()/>
            <DetailRow label="Floors:" value=building.total_floors.to_string()/>
            <DetailRow label="Total Rooms:" value=building.total_rooms.to_string()/>
            <DetailRow label="Year Built:" value=building.year_built.map(|y| y.to_string())/>
            <DetailRow label="Description:" value=building.description/>
        </section>
        <section class="card">
            <div class="section-header">
                <h2 class="section-title">{format!("Rooms ({room_count})")}</h2>
                <a class="btn btn--small" href=add_room_href>"+ Add Room"</a>
            </div>
            {if rooms.is_empty() {
                view! { <p class="card__empty-title">"No rooms yet"</p> }.into_any()
            } else {
                rooms
                    .into_iter()
                    .map(|room| {
                        view! {
                            <a class="room-row" href=format!("/rooms/{}", room.id)>
                                <span class="room-row__number">{format!("Room {}", room.room_number)}</span>
                                <span class=format!("room-row__status room-row__status--{}", room.status.as_str())>
                                    {room.status.as_str()}
                                </span>
                                <span class="room-row__type">{room.room_type.label()}</span>
                                <span class="room-row__rent">
                                    {format!("{}/month", money(&room.currency, room.rent_amount))}
                                </span>
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

/// Add (`/buildings/new`) or edit (`/buildings/:id/edit`) a building.
#[component]
pub fn BuildingFormPage() -> impl IntoView {
    let error = RwSignal::new(None::<String>);
    let loader = ScreenLoader::new(error);
    let navigate = use_navigate();
    let params = use_params_map();
    let editing = Memo::new(move |_| params.read().get("id"));
    let draft = RwSignal::new(BuildingDraft::default());
    let busy = RwSignal::new(false);

    Effect::new({
        let loader = loader.clone();
        move || {
            let Some(id) = editing.get() else {
                return;
            };
            loader.spawn(move |backend, _| async move {
                match backend.db.building(&id).await {
                    Ok(building) => {
                        let _ = draft.try_set(BuildingDraft::from_building(&building));
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
                Some(id) => backend.db.update_building(id, &payload).await,
                None => backend.db.create_building(&payload).await,
            };
            match saved {
                Ok(building) => navigate(&format!("/buildings/{}", building.id), NavigateOptions::default()),
                Err(e) => {
                    let _ = error.try_set(Some(e.to_string()));
                }
            }
        });
    };

    let title = Signal::derive(move || {
        let text = if editing.with(Option::is_some) { "Edit Building" } else { "Add New Building" };
        text.to_owned()
    });
    let building_type = Binding {
        value: Signal::derive(move || draft.with(|d| d.building_type.as_str().to_owned())),
        set: Callback::new(move |raw: String| draft.update(|d| d.building_type = BuildingType::parse(&raw))),
    };
    let type_options = BuildingType::ALL.iter().map(|t| (t.as_str(), t.as_str())).collect::<Vec<_>>();

    view! {
        <div class="form-page">
            <PageHeader title=title back="/"/>
            <ErrorMessage message=error/>
            <form class="form" on:submit=on_submit>
                <TextField label="Building Name" bind=bind!(draft, name) required=true/>
                <TextField label="Address" bind=bind!(draft, address) required=true/>
                <TextField label="City" bind=bind!(draft, city) required=true/>
                <TextField label="State/Province" bind=bind!(draft, state)/>
                <TextField label="Country" bind=bind!(draft, country) required=true/>
                <TextField label="Postal Code" bind=bind!(draft, postal_code)/>
                <SelectField label="Building Type" bind=building_type options=type_options/>
                <TextField label="Total Floors" bind=bind!(draft, total_floors) input_type="number" required=true/>
                <TextField label="Total Rooms" bind=bind!(draft, total_rooms) input_type="number" required=true/>
                <TextField label="Year Built" bind=bind!(draft, year_built) input_type="number"/>
                <TextArea label="Description" bind=bind!(draft, description)/>
                <div class="form__actions">
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        {move || if editing.with(Option::is_some) { "Update Building" } else { "Create Building" }}
                    </button>
                    <a class="btn" href="/">"Cancel"</a>
                </div>
            </form>
        </div>
    }
}
