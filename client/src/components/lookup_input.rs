//! Searchable record picker.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by forms that reference another record (a room's building, a
//! contract's tenant). The owning form loads the records and holds the
//! selected value; the picker only browses, filters and proposes changes
//! through `on_select`. It never fetches.
//!
//! DESIGN
//! ======
//! - The affordance shows the current value's primary text or the
//!   placeholder; clicking it opens the browsing surface unless disabled.
//! - Filter text and open state live in one `SelectorState` per mounted
//!   picker, so replacing `records` between renders keeps both.
//! - Filtering runs on every keystroke through `filter_records`.

use leptos::prelude::*;
use records::Record;

use crate::util::filter::{Accessor, SelectionChange, SelectorState, display_text, filter_records};

#[component]
pub fn LookupInput<T>(
    #[prop(into)] records: Signal<Vec<T>>,
    primary: Accessor<T>,
    #[prop(optional)] secondary: Option<Accessor<T>>,
    #[prop(into)] value: Signal<Option<T>>,
    on_select: Callback<SelectionChange<T>>,
    #[prop(default = true)] filterable: bool,
    #[prop(default = "Select...")] placeholder: &'static str,
    #[prop(default = "Search...")] search_placeholder: &'static str,
    #[prop(default = "No items found")] empty_text: &'static str,
    #[prop(optional)] label: Option<&'static str>,
    #[prop(optional, into)] error: MaybeProp<String>,
    #[prop(optional, into)] disabled: MaybeProp<bool>,
) -> impl IntoView
where
    T: Record + Clone + Send + Sync + 'static,
{
    let state = RwSignal::new(SelectorState::default());
    let accessors = StoredValue::new((primary, secondary));
    let is_disabled = move || disabled.get().unwrap_or(false);

    let current_text = move || {
        value.with(|v| {
            v.as_ref()
                .map(|record| accessors.with_value(|(primary, _)| display_text(record, primary)))
        })
    };

    let visible = move || {
        let query = state.with(|s| s.query.clone());
        records.with(|all| {
            accessors.with_value(|(primary, secondary)| {
                filter_records(all, primary, secondary.as_ref(), &query, filterable)
                    .into_iter()
                    .cloned()
                    .collect::<Vec<T>>()
            })
        })
    };

    Effect::new(move || {
        if is_disabled() {
            state.update(SelectorState::close);
        }
    });

    let choose = move |record: T| {
        if let Some(change) = state.try_update(|s| s.choose(record)) {
            on_select.run(change);
        }
    };

    view! {
        <div class="lookup-input" class:lookup-input--disabled=is_disabled>
            {label.map(|text| view! { <span class="lookup-input__label">{text}</span> })}
            <div
                class="lookup-input__value"
                class:lookup-input__value--error=move || error.get().is_some()
                role="button"
                tabindex="0"
                on:click=move |_| {
                    let disabled = is_disabled();
                    state.update(|s| {
                        s.open(disabled);
                    });
                }
            >
                <span
                    class="lookup-input__text"
                    class:lookup-input__text--placeholder=move || current_text().is_none()
                >
                    {move || current_text().unwrap_or_else(|| placeholder.to_owned())}
                </span>
                <Show when=move || value.with(Option::is_some) && !is_disabled()>
                    <button
                        class="lookup-input__clear"
                        type="button"
                        aria-label="Clear selection"
                        on:click=move |ev: leptos::ev::MouseEvent| {
                            ev.stop_propagation();
                            let has_value = value.with_untracked(Option::is_some);
                            let disabled = disabled.get_untracked().unwrap_or(false);
                            if let Some(change) = state.with_untracked(|s| s.clear(has_value, disabled)) {
                                on_select.run(change);
                            }
                        }
                    >
                        "✕"
                    </button>
                </Show>
            </div>
            <Show when=move || error.get().is_some()>
                <span class="lookup-input__error">{move || error.get().unwrap_or_default()}</span>
            </Show>

            <Show when=move || state.with(|s| s.open)>
                <div class="lookup-input__backdrop" on:click=move |_| state.update(SelectorState::close)></div>
                <div class="lookup-input__surface" role="dialog">
                    <div class="lookup-input__header">
                        <span>{label.unwrap_or(placeholder)}</span>
                        <button
                            class="lookup-input__close"
                            type="button"
                            on:click=move |_| state.update(SelectorState::close)
                        >
                            "Close"
                        </button>
                    </div>
                    <Show when=move || filterable>
                        <input
                            class="lookup-input__search"
                            type="text"
                            placeholder=search_placeholder
                            prop:value=move || state.with(|s| s.query.clone())
                            on:input=move |ev| {
                                let query = event_target_value(&ev);
                                state.update(|s| s.query = query);
                            }
                        />
                    </Show>
                    <ul class="lookup-input__list">
                        {move || {
                            let items = visible();
                            if items.is_empty() {
                                return view! { <li class="lookup-input__empty">{empty_text}</li> }.into_any();
                            }
                            items
                                .into_iter()
                                .map(|record| {
                                    let (main, sub) = accessors.with_value(|(primary, secondary)| {
                                        (
                                            display_text(&record, primary),
                                            secondary.as_ref().map(|acc| display_text(&record, acc)),
                                        )
                                    });
                                    view! {
                                        <li
                                            class="lookup-input__item"
                                            on:click=move |_| choose(record.clone())
                                        >
                                            <span class="lookup-input__primary">{main}</span>
                                            {sub.map(|text| view! { <span class="lookup-input__secondary">{text}</span> })}
                                        </li>
                                    }
                                })
                                .collect_view()
                                .into_any()
                        }}
                    </ul>
                </div>
            </Show>
        </div>
    }
}
