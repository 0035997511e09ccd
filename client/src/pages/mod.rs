//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Auth-flow pages (`login`, `signup`, `forgot_password`) talk to the auth
//! client only. Main-flow pages resolve the signed-in profile through
//! `util::auth::ScreenLoader` before touching client-scoped data, and
//! delegate rendering details to `components`.

pub mod buildings;
pub mod contracts;
pub mod dashboard;
pub mod forgot_password;
pub mod login;
pub mod rooms;
pub mod signup;
pub mod tenants;
