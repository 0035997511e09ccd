//! Networking modules for the hosted backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` defines the auth seam the session gate depends on,
//! `supabase_auth` and `database` implement the auth and data clients,
//! `transport` carries their HTTP requests, and `supabase` wires them into
//! the injected `Backend`.

pub mod auth;
pub mod database;
pub mod error;
pub mod session_store;
pub mod supabase;
pub mod supabase_auth;
pub mod transport;

#[cfg(test)]
pub(crate) mod transport_mock;
