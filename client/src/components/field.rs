//! Labelled form inputs bound to one field of a draft.
//!
//! DESIGN
//! ======
//! Form screens keep the whole draft in one `RwSignal` and validate it on
//! submit. `Binding` is the read half and write half of one string field;
//! `bind!` builds it from a field name so each input stays a one-liner.

use leptos::prelude::*;

/// Read/write view of one string value.
#[derive(Clone, Copy)]
pub struct Binding {
    pub value: Signal<String>,
    pub set: Callback<String>,
}

impl Binding {
    pub fn new<D>(draft: RwSignal<D>, get: fn(&D) -> &String, set: fn(&mut D) -> &mut String) -> Self
    where
        D: Send + Sync + 'static,
    {
        Self {
            value: Signal::derive(move || draft.with(|d| get(d).clone())),
            set: Callback::new(move |value: String| draft.update(|d| *set(d) = value)),
        }
    }
}

macro_rules! bind {
    ($draft:expr, $field:ident) => {
        $crate::components::field::Binding::new($draft, |d| &d.$field, |d| &mut d.$field)
    };
}
pub(crate) use bind;

#[component]
pub fn TextField(
    label: &'static str,
    bind: Binding,
    #[prop(optional)] input_type: Option<&'static str>,
    #[prop(optional)] placeholder: Option<&'static str>,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <label class="form-field">
            <span class="form-field__label">{label} {required.then_some(" *")}</span>
            <input
                class="form-field__input"
                type=input_type.unwrap_or("text")
                placeholder=placeholder.unwrap_or_default()
                prop:value=move || bind.value.get()
                on:input=move |ev| bind.set.run(event_target_value(&ev))
            />
        </label>
    }
}

#[component]
pub fn TextArea(label: &'static str, bind: Binding) -> impl IntoView {
    view! {
        <label class="form-field">
            <span class="form-field__label">{label}</span>
            <textarea
                class="form-field__input form-field__input--multiline"
                rows="3"
                prop:value=move || bind.value.get()
                on:input=move |ev| bind.set.run(event_target_value(&ev))
            ></textarea>
        </label>
    }
}

/// A `<select>` over fixed `(value, label)` options.
#[component]
pub fn SelectField(label: &'static str, bind: Binding, options: Vec<(&'static str, &'static str)>) -> impl IntoView {
    view! {
        <label class="form-field">
            <span class="form-field__label">{label}</span>
            <select
                class="form-field__input"
                prop:value=move || bind.value.get()
                on:change=move |ev| bind.set.run(event_target_value(&ev))
            >
                {options
                    .into_iter()
                    .map(|(value, text)| {
                        view! {
                            <option value=value selected=move || bind.value.get() == value>
                                {text}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </label>
    }
}
