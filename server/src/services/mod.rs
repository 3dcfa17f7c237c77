//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own validation and storage so route handlers can stay
//! focused on protocol translation.

pub mod maps;
pub mod store;
