//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render shared chrome and recipe fragments, reading the auth
//! store from Leptos context where they need identity.

pub mod nav_bar;
pub mod recipe_card;
pub mod recipe_form;
