//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session_gate` picks the auth or main flow from the shared auth state.
//! `lookup_input` and `list_view` browse records through `util::filter`.
//! The rest are presentational pieces shared by forms and detail screens.

pub mod detail_row;
pub mod error_message;
pub mod field;
pub mod list_view;
pub mod loading;
pub mod lookup_input;
pub mod page_header;
pub mod session_gate;
pub mod status_badge;
