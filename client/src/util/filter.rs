//! Search filtering for record pickers and searchable lists.
//!
//! DESIGN
//! ======
//! A display column is either a field key resolved through `Record::field`
//! or a derivation closure. Derivations report failure as `None` rather than
//! panicking (a panic aborts the wasm module). Both go through
//! `display_text`, so missing fields and failed derivations read as the
//! empty string for that record only.
//!
//! Filtering is a pure function of (records, accessors, query, enabled) and
//! never reorders or mutates its input.

#[cfg(test)]
#[path = "filter_test.rs"]
mod filter_test;

use std::sync::Arc;

use records::Record;

/// How to get a display string out of a record.
pub enum Accessor<T> {
    Field(&'static str),
    Derive(Arc<dyn Fn(&T) -> Option<String> + Send + Sync>),
}

impl<T> Accessor<T> {
    /// Derivation that always produces text.
    pub fn derive(f: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        Self::Derive(Arc::new(move |record: &T| Some(f(record))))
    }
}

impl<T> Clone for Accessor<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Field(key) => Self::Field(key),
            Self::Derive(f) => Self::Derive(f.clone()),
        }
    }
}

impl<T> std::fmt::Debug for Accessor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Field(key) => f.debug_tuple("Field").field(key).finish(),
            Self::Derive(_) => f.write_str("Derive(..)"),
        }
    }
}

impl<T> From<&'static str> for Accessor<T> {
    fn from(key: &'static str) -> Self {
        Self::Field(key)
    }
}

/// Display text for one record; missing values and failed derivations
/// yield `""`.
pub fn display_text<T: Record>(record: &T, accessor: &Accessor<T>) -> String {
    match accessor {
        Accessor::Field(key) => record.field(key).unwrap_or_default(),
        Accessor::Derive(f) => f(record).unwrap_or_else(|| {
            log::warn!("display accessor failed for record {}", record.id());
            String::new()
        }),
    }
}

fn matches<T: Record>(record: &T, primary: &Accessor<T>, secondary: Option<&Accessor<T>>, needle: &str) -> bool {
    display_text(record, primary).to_lowercase().contains(needle)
        || secondary.is_some_and(|acc| display_text(record, acc).to_lowercase().contains(needle))
}

/// Records visible for `query`, in input order.
///
/// With filtering disabled or a blank query every record is visible.
/// Otherwise the lower-cased query (not trimmed) must appear in the
/// lower-cased primary or secondary text.
pub fn filter_records<'a, T: Record>(
    records: &'a [T],
    primary: &Accessor<T>,
    secondary: Option<&Accessor<T>>,
    query: &str,
    enabled: bool,
) -> Vec<&'a T> {
    if !enabled || query.trim().is_empty() {
        return records.iter().collect();
    }
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|r| matches(*r, primary, secondary, &needle))
        .collect()
}

/// Selection proposed by a picker to its owner.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectionChange<T> {
    Selected(T),
    Cleared,
}

/// Open/closed state and filter text of one mounted picker.
///
/// The query is kept across close and reopen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectorState {
    pub query: String,
    pub open: bool,
}

impl SelectorState {
    /// Open the browsing surface unless the picker is disabled. Returns
    /// whether this call opened it; a disabled picker is closed.
    pub fn open(&mut self, disabled: bool) -> bool {
        if disabled {
            self.open = false;
            return false;
        }
        let opened = !self.open;
        self.open = true;
        opened
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Clear the owner's selection. Only offered while a value is set and the
    /// picker is enabled; the surface stays as it is.
    #[must_use]
    pub fn clear<T>(&self, has_value: bool, disabled: bool) -> Option<SelectionChange<T>> {
        (has_value && !disabled).then_some(SelectionChange::Cleared)
    }

    /// Choose a record: closes the surface and yields the change to emit.
    pub fn choose<T>(&mut self, record: T) -> SelectionChange<T> {
        self.open = false;
        SelectionChange::Selected(record)
    }
}
