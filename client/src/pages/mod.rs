//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped loading and mutation and delegates rendering
//! details to `components`. Failures surface as an inline message; nothing
//! retries.

pub mod edit_recipe;
pub mod login;
pub mod my_recipes;
pub mod new_recipe;
pub mod recipe_detail;
pub mod recipes;
