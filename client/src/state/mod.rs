//! Client-side state shared through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` owns the gate's auth state machine; `resource` is the load state
//! screens keep for the data they fetch.

pub mod resource;
pub mod session;
