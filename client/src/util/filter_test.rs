use std::sync::Arc;

use super::*;

#[derive(Clone, Debug, PartialEq)]
struct Person {
    id: &'static str,
    name: &'static str,
    phone: Option<&'static str>,
}

impl Record for Person {
    fn id(&self) -> &str {
        self.id
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            "name" => Some(self.name.to_owned()),
            "phone" => self.phone.map(str::to_owned),
            _ => None,
        }
    }
}

fn people() -> Vec<Person> {
    vec![
        Person { id: "1", name: "Alice Smith", phone: Some("555-0001") },
        Person { id: "2", name: "Bob Jones", phone: Some("555-0002") },
        Person { id: "3", name: "Carol White", phone: None },
    ]
}

fn ids(records: &[&Person]) -> Vec<&'static str> {
    records.iter().map(|p| p.id).collect()
}

// =============================================================================
// display_text
// =============================================================================

#[test]
fn field_accessor_reads_record_field() {
    let p = &people()[0];
    assert_eq!(display_text(p, &Accessor::Field("name")), "Alice Smith");
}

#[test]
fn missing_and_unknown_fields_are_empty() {
    let p = &people()[2];
    assert_eq!(display_text(p, &Accessor::Field("phone")), "");
    assert_eq!(display_text(p, &Accessor::Field("nope")), "");
}

#[test]
fn derive_accessor_runs_closure() {
    let upper = Accessor::derive(|p: &Person| p.name.to_uppercase());
    assert_eq!(display_text(&people()[1], &upper), "BOB JONES");
}

#[test]
fn failed_derivation_blanks_only_that_record() {
    let partial: Accessor<Person> = Accessor::Derive(Arc::new(|p: &Person| p.phone.map(|ph| format!("tel {ph}"))));
    assert_eq!(display_text(&people()[2], &partial), "");
    assert_eq!(display_text(&people()[0], &partial), "tel 555-0001");

    let records = people();
    let visible = filter_records(&records, &partial, None, "tel", true);
    assert_eq!(ids(&visible), vec!["1", "2"]);
}

// =============================================================================
// filter_records
// =============================================================================

#[test]
fn phone_query_matches_secondary_only() {
    let records = people();
    let visible = filter_records(&records, &"name".into(), Some(&"phone".into()), "0002", true);
    assert_eq!(ids(&visible), vec!["2"]);
}

#[test]
fn empty_or_blank_query_keeps_order() {
    let records = people();
    for query in ["", "   "] {
        let visible = filter_records(&records, &"name".into(), None, query, true);
        assert_eq!(ids(&visible), vec!["1", "2", "3"]);
    }
}

#[test]
fn disabled_filter_shows_everything() {
    let records = people();
    let visible = filter_records(&records, &"name".into(), None, "zzz", false);
    assert_eq!(ids(&visible), vec!["1", "2", "3"]);
}

#[test]
fn match_is_case_insensitive_substring() {
    let records = people();
    let visible = filter_records(&records, &"name".into(), None, "JON", true);
    assert_eq!(ids(&visible), vec!["2"]);
}

#[test]
fn query_is_not_trimmed_before_matching() {
    let records = people();
    let visible = filter_records(&records, &"name".into(), None, " smith", true);
    assert_eq!(ids(&visible), vec!["1"]);
    let visible = filter_records(&records, &"name".into(), None, "smith ", true);
    assert!(visible.is_empty());
}

#[test]
fn secondary_ignored_when_not_configured() {
    let records = people();
    let visible = filter_records(&records, &"name".into(), None, "555", true);
    assert!(visible.is_empty());
}

#[test]
fn empty_collection_stays_empty() {
    let records: Vec<Person> = Vec::new();
    let visible = filter_records(&records, &"name".into(), None, "a", true);
    assert!(visible.is_empty());
}

#[test]
fn filtered_result_is_subset_in_input_order() {
    let records = people();
    let visible = filter_records(&records, &"name".into(), Some(&"phone".into()), "o", true);
    assert_eq!(ids(&visible), vec!["2", "3"]);
    assert_eq!(records.len(), 3);
}

// =============================================================================
// SelectorState
// =============================================================================

#[test]
fn disabled_selector_does_not_open() {
    let mut state = SelectorState::default();
    assert!(!state.open(true));
    assert!(!state.open);
    assert!(state.open(false));
}

#[test]
fn open_reports_only_the_opening_call() {
    let mut state = SelectorState::default();
    assert!(state.open(false));
    assert!(!state.open(false));
    assert!(state.open);
}

#[test]
fn disabling_an_open_selector_closes_it() {
    let mut state = SelectorState { query: String::new(), open: true };
    assert!(!state.open(true));
    assert!(!state.open);
}

#[test]
fn query_survives_close_and_reopen() {
    let mut state = SelectorState::default();
    state.open(false);
    state.query = "bob".to_owned();
    state.close();
    state.open(false);
    assert_eq!(state.query, "bob");
}

#[test]
fn choosing_closes_and_emits_selection() {
    let mut state = SelectorState { query: "al".to_owned(), open: true };
    let change = state.choose(people()[0].clone());
    assert!(!state.open);
    assert_eq!(change, SelectionChange::Selected(people()[0].clone()));
}

#[test]
fn select_then_clear_emits_two_distinct_changes() {
    let mut state = SelectorState::default();
    state.open(false);
    let mut emitted = vec![state.choose(people()[1].clone())];
    emitted.extend(state.clear::<Person>(true, false));
    assert_eq!(emitted, vec![SelectionChange::Selected(people()[1].clone()), SelectionChange::Cleared]);
}

#[test]
fn clear_leaves_surface_state_alone() {
    let closed = SelectorState::default();
    assert_eq!(closed.clear::<Person>(true, false), Some(SelectionChange::Cleared));
    assert!(!closed.open);

    let open = SelectorState { query: "bo".to_owned(), open: true };
    assert_eq!(open.clear::<Person>(true, false), Some(SelectionChange::Cleared));
    assert!(open.open);
    assert_eq!(open.query, "bo");
}

#[test]
fn clear_refused_without_value_or_when_disabled() {
    let state = SelectorState::default();
    assert_eq!(state.clear::<Person>(false, false), None);
    assert_eq!(state.clear::<Person>(true, true), None);
    assert_eq!(state.clear::<Person>(false, true), None);
}
