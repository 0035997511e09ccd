//! Shared domain model for the property-management app.
//!
//! This crate owns the row shapes exchanged with the backend data API
//! (buildings, rooms, tenants, leases, user profiles), the form validation
//! rules the screens apply before writing, and the lease rules that are not
//! left to the backend. Everything here is pure: no I/O, no clock reads.

pub mod form;
pub mod lease;
pub mod model;
pub mod record;

pub use form::FormError;
pub use lease::LeaseConflict;
pub use model::*;
pub use record::Record;
