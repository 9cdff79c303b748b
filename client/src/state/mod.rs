//! Client-side reactive state.
//!
//! SYSTEM CONTEXT
//! ==============
//! State structs are plain data wrapped in `RwSignal` and provided through
//! Leptos context by `app::App`.

pub mod auth;
