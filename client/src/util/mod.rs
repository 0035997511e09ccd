//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from page and component
//! logic so the logic can be tested natively.

pub mod auth;
pub mod browser;
pub mod clock;
pub mod filter;
