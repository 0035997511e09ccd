//! Searchable list of records that reports the tapped row.

use leptos::prelude::*;
use records::Record;

use crate::util::filter::{Accessor, display_text, filter_records};

#[component]
pub fn ListView<T>(
    #[prop(into)] records: Signal<Vec<T>>,
    primary: Accessor<T>,
    #[prop(optional)] secondary: Option<Accessor<T>>,
    on_select: Callback<T>,
    #[prop(default = true)] searchable: bool,
    #[prop(default = "Search...")] search_placeholder: &'static str,
    #[prop(default = "No items found")] empty_text: &'static str,
) -> impl IntoView
where
    T: Record + Clone + Send + Sync + 'static,
{
    let query = RwSignal::new(String::new());
    let accessors = StoredValue::new((primary, secondary));

    let rows = move || {
        let query = query.get();
        records.with(|all| {
            accessors.with_value(|(primary, secondary)| {
                filter_records(all, primary, secondary.as_ref(), &query, searchable)
                    .into_iter()
                    .map(|record| {
                        let main = display_text(record, primary);
                        let sub = secondary.as_ref().map(|acc| display_text(record, acc));
                        (record.clone(), main, sub)
                    })
                    .collect::<Vec<_>>()
            })
        })
    };

    view! {
        <div class="list-view">
            <Show when=move || searchable>
                <input
                    class="list-view__search"
                    type="search"
                    placeholder=search_placeholder
                    prop:value=move || query.get()
                    on:input=move |ev| query.set(event_target_value(&ev))
                />
            </Show>
            <ul class="list-view__items">
                {move || {
                    let rows = rows();
                    if rows.is_empty() {
                        return view! { <li class="list-view__empty">{empty_text}</li> }.into_any();
                    }
                    rows.into_iter()
                        .map(|(record, main, sub)| {
                            view! {
                                <li class="list-view__item" on:click=move |_| on_select.run(record.clone())>
                                    <span class="list-view__primary">{main}</span>
                                    {sub.map(|text| view! { <span class="list-view__secondary">{text}</span> })}
                                </li>
                            }
                        })
                        .collect_view()
                        .into_any()
                }}
            </ul>
        </div>
    }
}
